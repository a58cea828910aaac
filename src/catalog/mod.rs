pub mod alias_builder;
pub use alias_builder::*;

#[allow(clippy::module_inception)]
pub mod catalog;
pub use catalog::*;
