pub mod sql_node;
pub use sql_node::*;

pub mod expression;
pub use expression::*;

pub mod boolean;
pub use boolean::*;

pub mod clauses;
pub use clauses::*;

pub mod query;
pub use query::*;
