use async_trait::async_trait;

use crate::database::StoreError;

pub mod table_schema;
pub use table_schema::*;

pub mod memory_schema;
pub use memory_schema::*;

/// Physical schema introspection, consulted only when aliases are created.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// Every table name, system tables included; callers filter.
    async fn table_names(&self) -> Result<Vec<String>, StoreError>;

    /// Given a table name, return its schema if the table exists.
    async fn schema_of(&self, table: &str) -> Result<Option<TableSchema>, StoreError>;
}
