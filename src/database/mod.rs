pub mod config;
pub use config::*;

pub mod id_manager;
pub use id_manager::*;

pub mod lookup;
pub use lookup::*;

pub mod alias;
pub use alias::*;

pub mod stored_query;
pub use stored_query::*;

pub mod entity_store;
pub use entity_store::*;

pub mod memory_store;
pub use memory_store::*;

pub mod kv_cache;
pub use kv_cache::*;

pub mod resolution_cache;
pub use resolution_cache::*;

pub mod schema;
pub use schema::*;
