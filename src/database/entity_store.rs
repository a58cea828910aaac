use async_trait::async_trait;
use thiserror::Error;

use crate::database::{Alias, EntityKind, Lookup, NewAlias, NewQuery, OwnerId, StoredQuery};

/// Failures reported by the backing store or the key-value cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} named '{name}' already exists")]
    AlreadyExists { kind: EntityKind, name: String },

    #[error("backing service unavailable: {0}")]
    Unavailable(String),
}

/// Owner-scoped persistence for aliases and stored queries.
///
/// Every read is filtered by owner; there is no global lookup.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_alias(&self, lookup: &Lookup, owner: OwnerId) -> Result<Option<Alias>, StoreError>;
    async fn get_query(&self, lookup: &Lookup, owner: OwnerId) -> Result<Option<StoredQuery>, StoreError>;

    async fn insert_alias(&self, alias: NewAlias) -> Result<Alias, StoreError>;
    async fn insert_query(&self, query: NewQuery) -> Result<StoredQuery, StoreError>;

    /// Returns `true` if something was deleted.
    async fn delete_alias(&self, id: u64, owner: OwnerId) -> Result<bool, StoreError>;
    async fn delete_query(&self, id: u64, owner: OwnerId) -> Result<bool, StoreError>;

    async fn list_aliases(&self, owner: OwnerId) -> Result<Vec<Alias>, StoreError>;
    async fn list_queries(&self, owner: OwnerId) -> Result<Vec<StoredQuery>, StoreError>;
}
