use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::OwnerId;

/// Owner-scoped named pointer to a table or to an expression fragment.
///
/// `target` is SQL text computed once when the alias was created, together with
/// `is_table` and `is_aggregate`. The compiler treats all three as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub id: u64,
    pub owner_id: OwnerId,
    /// unique per owner
    pub name: String,
    /// already valid SQL, e.g. `` `orders` `` or `SUM(`orders`.`total`)`
    pub target: String,
    pub is_table: bool,
    pub is_aggregate: bool,
    pub created_at: DateTime<Utc>,
}

/// Alias fields supplied by the caller; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlias {
    pub owner_id: OwnerId,
    pub name: String,
    pub target: String,
    pub is_table: bool,
    pub is_aggregate: bool,
}

impl NewAlias {
    pub fn into_alias(self, id: u64) -> Alias {
        Alias {
            id,
            owner_id: self.owner_id,
            name: self.name,
            target: self.target,
            is_table: self.is_table,
            is_aggregate: self.is_aggregate,
            created_at: Utc::now(),
        }
    }
}
