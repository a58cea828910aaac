use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::database::{
    Alias, EntityKind, EntityStore, IdManager, Lookup, NewAlias, NewQuery, OwnerId, StoreError, StoredQuery
};

/// Thread-safe handle to the in-memory entity store.
pub type MemoryStore = Arc<RwLock<InternalStore>>;

/// In-memory aliases and stored queries, keyed by id in insertion order.
#[derive(Debug, Default)]
pub struct InternalStore {
    aliases: IndexMap<u64, Alias>,
    queries: IndexMap<u64, StoredQuery>,
    alias_ids: IdManager,
    query_ids: IdManager,
}

impl InternalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_protected(self) -> MemoryStore {
        Arc::new(RwLock::new(self))
    }

    pub fn find_alias(&self, lookup: &Lookup, owner: OwnerId) -> Option<&Alias> {
        match lookup {
            Lookup::Id(id) => self.aliases.get(id).filter(|alias| alias.owner_id == owner),
            Lookup::Name(name) => self.aliases.values()
                .find(|alias| alias.owner_id == owner && alias.name == *name),
        }
    }

    pub fn find_query(&self, lookup: &Lookup, owner: OwnerId) -> Option<&StoredQuery> {
        match lookup {
            Lookup::Id(id) => self.queries.get(id).filter(|query| query.owner_id == owner),
            Lookup::Name(name) => self.queries.values()
                .find(|query| query.owner_id == owner && query.name == *name),
        }
    }

    pub fn add_alias(&mut self, alias: NewAlias) -> Result<Alias, StoreError> {
        if self.find_alias(&Lookup::Name(alias.name.clone()), alias.owner_id).is_some() {
            return Err(StoreError::AlreadyExists { kind: EntityKind::Alias, name: alias.name });
        }
        let id = self.alias_ids.next()
            .ok_or_else(|| StoreError::Unavailable("alias id sequence exhausted".into()))?;
        let alias = alias.into_alias(id);
        self.aliases.insert(id, alias.clone());
        Ok(alias)
    }

    pub fn add_query(&mut self, query: NewQuery) -> Result<StoredQuery, StoreError> {
        if self.find_query(&Lookup::Name(query.name.clone()), query.owner_id).is_some() {
            return Err(StoreError::AlreadyExists { kind: EntityKind::Query, name: query.name });
        }
        let id = self.query_ids.next()
            .ok_or_else(|| StoreError::Unavailable("query id sequence exhausted".into()))?;
        let query = query.into_query(id);
        self.queries.insert(id, query.clone());
        Ok(query)
    }

    pub fn remove_alias(&mut self, id: u64, owner: OwnerId) -> bool {
        match self.aliases.get(&id) {
            Some(alias) if alias.owner_id == owner => self.aliases.shift_remove(&id).is_some(),
            _ => false,
        }
    }

    pub fn remove_query(&mut self, id: u64, owner: OwnerId) -> bool {
        match self.queries.get(&id) {
            Some(query) if query.owner_id == owner => self.queries.shift_remove(&id).is_some(),
            _ => false,
        }
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get_alias(&self, lookup: &Lookup, owner: OwnerId) -> Result<Option<Alias>, StoreError> {
        Ok(self.read().await.find_alias(lookup, owner).cloned())
    }

    async fn get_query(&self, lookup: &Lookup, owner: OwnerId) -> Result<Option<StoredQuery>, StoreError> {
        Ok(self.read().await.find_query(lookup, owner).cloned())
    }

    async fn insert_alias(&self, alias: NewAlias) -> Result<Alias, StoreError> {
        self.write().await.add_alias(alias)
    }

    async fn insert_query(&self, query: NewQuery) -> Result<StoredQuery, StoreError> {
        self.write().await.add_query(query)
    }

    async fn delete_alias(&self, id: u64, owner: OwnerId) -> Result<bool, StoreError> {
        Ok(self.write().await.remove_alias(id, owner))
    }

    async fn delete_query(&self, id: u64, owner: OwnerId) -> Result<bool, StoreError> {
        Ok(self.write().await.remove_query(id, owner))
    }

    async fn list_aliases(&self, owner: OwnerId) -> Result<Vec<Alias>, StoreError> {
        Ok(self.read().await.aliases.values().filter(|a| a.owner_id == owner).cloned().collect())
    }

    async fn list_queries(&self, owner: OwnerId) -> Result<Vec<StoredQuery>, StoreError> {
        Ok(self.read().await.queries.values().filter(|q| q.owner_id == owner).cloned().collect())
    }
}
