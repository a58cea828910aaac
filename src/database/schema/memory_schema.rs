use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::database::{SchemaProvider, StoreError, TableSchema};

/// In-memory schema catalog, used where no live database is attached.
#[derive(Debug, Clone, Default)]
pub struct MemorySchema {
    tables: Arc<RwLock<IndexMap<String, TableSchema>>>,
}

impl MemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: Vec<TableSchema>) -> Self {
        let map = tables.into_iter().map(|t| (t.name.clone(), t)).collect();
        Self { tables: Arc::new(RwLock::new(map)) }
    }

    pub async fn add_table(&self, table: TableSchema) {
        self.tables.write().await.insert(table.name.clone(), table);
    }

    pub async fn drop_table(&self, name: &str) -> bool {
        self.tables.write().await.shift_remove(name).is_some()
    }
}

#[async_trait]
impl SchemaProvider for MemorySchema {
    async fn table_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.tables.read().await.keys().cloned().collect())
    }

    async fn schema_of(&self, table: &str) -> Result<Option<TableSchema>, StoreError> {
        Ok(self.tables.read().await.get(table).cloned())
    }
}
