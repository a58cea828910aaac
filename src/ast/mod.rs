pub mod keywords;
pub use keywords::*;

pub mod literal;
pub use literal::*;

pub mod reference;
pub use reference::*;

pub mod expression;
pub use expression::*;

pub mod boolean_expression;
pub use boolean_expression::*;

pub mod clauses;
pub use clauses::*;

pub mod query;
pub use query::*;
