use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::OwnerId;

/// Column count recorded for `SELECT *` queries.
pub const ALL_COLUMNS: i64 = -1;

/// A previously compiled SELECT statement saved under an owner-scoped name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuery {
    pub id: u64,
    pub owner_id: OwnerId,
    /// unique per owner
    pub name: String,
    /// full statement, terminated by `;`
    pub sql: String,
    /// number of output columns, or `ALL_COLUMNS`
    pub column_count: i64,
    pub created_at: DateTime<Utc>,
}

impl StoredQuery {
    /// Statement text without the trailing terminator, ready to be embedded.
    pub fn body(&self) -> &str {
        let trimmed = self.sql.trim_end();
        trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuery {
    pub owner_id: OwnerId,
    pub name: String,
    pub sql: String,
    pub column_count: i64,
}

impl NewQuery {
    pub fn into_query(self, id: u64) -> StoredQuery {
        StoredQuery {
            id,
            owner_id: self.owner_id,
            name: self.name,
            sql: self.sql,
            column_count: self.column_count,
            created_at: Utc::now(),
        }
    }
}
