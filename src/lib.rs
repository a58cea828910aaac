pub mod ast;
pub mod catalog;
pub mod compiler;
pub mod database;
pub mod resolved;

mod test_fixtures;

pub use ast::{AliasCreate, SelectQueryInput};
pub use catalog::Catalog;
pub use compiler::{CompileError, QueryCompiler};
pub use database::{Config, MemoryKvCache, MemorySchema, MemoryStore, ResolutionCache};
pub use resolved::CompiledQuery;
