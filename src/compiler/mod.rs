pub mod compile_error;
pub use compile_error::*;

pub mod clause_kind;
pub use clause_kind::*;

pub mod compile_context;
pub use compile_context::*;

pub mod expression_compiler;
pub use expression_compiler::*;

pub mod clause_compiler;
pub use clause_compiler::*;

pub mod query_compiler;
pub use query_compiler::*;
