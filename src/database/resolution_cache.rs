//! Cache-aside resolution of aliases and stored queries.
//!
//! Two pointer records (`{kind}:id:{id}` and `{kind}:name:{owner}:{name}`) both hold the key
//! of one object record (`{kind}:obj:{id}:{owner}:{name}`), so either dimension resolves the
//! same payload and all three expire together. Nothing invalidates them; a mutated or
//! deleted entity can be served until the TTL runs out.

use std::{future::Future, sync::Arc, time::Duration};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    compiler::{CompileError, Result},
    database::{Alias, Config, EntityKind, EntityStore, KeyValueCache, Lookup, OwnerId, StoredQuery},
};

/// Entities that can live in the resolution cache.
pub trait CachedEntity: Serialize + DeserializeOwned + Send + Sync {
    const KIND: EntityKind;

    fn id(&self) -> u64;
    fn owner_id(&self) -> OwnerId;
    fn name(&self) -> &str;
}

impl CachedEntity for Alias {
    const KIND: EntityKind = EntityKind::Alias;

    fn id(&self) -> u64 { self.id }
    fn owner_id(&self) -> OwnerId { self.owner_id }
    fn name(&self) -> &str { &self.name }
}

impl CachedEntity for StoredQuery {
    const KIND: EntityKind = EntityKind::Query;

    fn id(&self) -> u64 { self.id }
    fn owner_id(&self) -> OwnerId { self.owner_id }
    fn name(&self) -> &str { &self.name }
}

/// Key of the record holding the serialized entity.
pub fn object_key(kind: EntityKind, id: u64, owner: OwnerId, name: &str) -> String {
    format!("{}:obj:{}:{}:{}", kind.key_prefix(), id, owner, name)
}

/// Key of the pointer record for one lookup dimension.
pub fn pointer_key(kind: EntityKind, lookup: &Lookup, owner: OwnerId) -> String {
    match lookup {
        Lookup::Id(id) => format!("{}:id:{}", kind.key_prefix(), id),
        Lookup::Name(name) => format!("{}:name:{}:{}", kind.key_prefix(), owner, name),
    }
}

/// Shared handle used by every compilation; cloning is cheap.
#[derive(Clone)]
pub struct ResolutionCache {
    store: Arc<dyn EntityStore>,
    kv: Arc<dyn KeyValueCache>,
    ttl: Duration,
}

impl ResolutionCache {
    pub fn new(store: Arc<dyn EntityStore>, kv: Arc<dyn KeyValueCache>, config: &Config) -> Self {
        Self { store, kv, ttl: config.cache_ttl() }
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn fetch_alias(&self, lookup: &Lookup, owner: OwnerId) -> Result<Arc<Alias>> {
        self.fetch(lookup, owner, self.store.get_alias(lookup, owner)).await
    }

    pub async fn fetch_query(&self, lookup: &Lookup, owner: OwnerId) -> Result<Arc<StoredQuery>> {
        self.fetch(lookup, owner, self.store.get_query(lookup, owner)).await
    }

    async fn fetch<T, F>(&self, lookup: &Lookup, owner: OwnerId, load: F) -> Result<Arc<T>>
    where
        T: CachedEntity,
        F: Future<Output = std::result::Result<Option<T>, crate::database::StoreError>>,
    {
        if let Some(hit) = self.read_cached::<T>(lookup, owner).await? {
            debug!(kind = %T::KIND, %lookup, owner, "resolution cache hit");
            return Ok(Arc::new(hit));
        }

        debug!(kind = %T::KIND, %lookup, owner, "resolution cache miss, loading from store");
        let entity = load.await?.ok_or_else(|| CompileError::not_found(T::KIND, lookup))?;
        self.populate(&entity).await?;
        Ok(Arc::new(entity))
    }

    async fn read_cached<T: CachedEntity>(&self, lookup: &Lookup, owner: OwnerId) -> Result<Option<T>> {
        let Some(pointer) = self.kv.get(&pointer_key(T::KIND, lookup, owner)).await? else {
            return Ok(None);
        };
        let Ok(real_key) = String::from_utf8(pointer) else {
            warn!(kind = %T::KIND, %lookup, "cache pointer is not valid UTF-8, ignoring");
            return Ok(None);
        };
        let Some(payload) = self.kv.get(&real_key).await? else {
            return Ok(None);
        };

        let entity: T = match serde_json::from_slice(&payload) {
            Ok(entity) => entity,
            Err(err) => {
                warn!(kind = %T::KIND, key = %real_key, error = %err, "undecodable cache payload, ignoring");
                return Ok(None);
            }
        };

        if entity.owner_id() != owner {
            warn!(kind = %T::KIND, %lookup, owner, "cached entity belongs to another owner, ignoring");
            return Ok(None);
        }
        if let Lookup::Name(name) = lookup {
            if entity.name() != name {
                return Ok(None);
            }
        }
        Ok(Some(entity))
    }

    /// Write the object record first, then both pointers to it.
    async fn populate<T: CachedEntity>(&self, entity: &T) -> Result<()> {
        let real_key = object_key(T::KIND, entity.id(), entity.owner_id(), entity.name());
        let payload = serde_json::to_vec(entity)?;
        self.kv.set(&real_key, payload, self.ttl).await?;

        for lookup in [Lookup::Id(entity.id()), Lookup::Name(entity.name().to_string())] {
            let key = pointer_key(T::KIND, &lookup, entity.owner_id());
            self.kv.set(&key, real_key.clone().into_bytes(), self.ttl).await?;
        }
        Ok(())
    }
}
