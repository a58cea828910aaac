use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column names and declared types of one physical table.
///
/// Columns keep their declaration order so listings are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    /// column name -> declared SQL type
    pub columns: IndexMap<String, String>,
}

impl TableSchema {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), columns: IndexMap::new() }
    }

    /// Builder-style helper: append a column.
    pub fn column(mut self, name: &str, dtype: &str) -> Self {
        self.columns.insert(name.to_string(), dtype.to_string());
        self
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }
}
