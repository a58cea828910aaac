use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::{
    ast::{AliasCreate, SelectQueryInput},
    catalog::AliasBuilder,
    compiler::{CompileContext, CompileError, QueryCompiler, Result},
    database::{
        Alias, Config, EntityStore, KeyValueCache, Lookup, NewQuery, OwnerId, ResolutionCache, SchemaProvider,
        StoredQuery,
    },
    resolved::CompiledQuery,
};

static VALID_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").unwrap());

/// Owner-scoped management of aliases and stored queries on top of the compiler.
///
/// Deletions go straight to the store; cached copies stay readable until they expire.
#[derive(Clone)]
pub struct Catalog {
    cache: ResolutionCache,
    schema: Arc<dyn SchemaProvider>,
    config: Config,
}

impl Catalog {
    pub fn new(
        store: Arc<dyn EntityStore>,
        kv: Arc<dyn KeyValueCache>,
        schema: Arc<dyn SchemaProvider>,
        config: Config,
    ) -> Self {
        let cache = ResolutionCache::new(store, kv, &config);
        Self { cache, schema, config }
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn validate_name(name: &str) -> Result<()> {
        if !VALID_NAME.is_match(name) {
            return CompileError::InvalidName(name.to_string()).err();
        }
        Ok(())
    }

    pub async fn create_alias(&self, owner: OwnerId, request: &AliasCreate) -> Result<Alias> {
        Self::validate_name(&request.alias)?;
        let builder = AliasBuilder::new(self.schema.as_ref(), &self.config);
        let new_alias = builder.build(request, CompileContext::new(owner, &self.cache)).await?;
        let alias = self.cache.store().insert_alias(new_alias).await?;
        info!(owner, id = alias.id, name = %alias.name, is_table = alias.is_table, "alias created");
        Ok(alias)
    }

    /// Compile `input` and persist the result under `name`. Nothing is stored when
    /// compilation fails.
    pub async fn create_query(&self, owner: OwnerId, name: &str, input: &SelectQueryInput) -> Result<StoredQuery> {
        Self::validate_name(name)?;
        let compiled = QueryCompiler::compile(input, owner, &self.cache).await?;
        let query = self.cache.store().insert_query(NewQuery {
            owner_id: owner,
            name: name.to_string(),
            sql: compiled.sql,
            column_count: compiled.column_count,
        }).await?;
        info!(owner, id = query.id, name = %query.name, column_count = query.column_count, "query stored");
        Ok(query)
    }

    pub async fn delete_alias(&self, owner: OwnerId, id: u64) -> Result<bool> {
        let deleted = self.cache.store().delete_alias(id, owner).await?;
        info!(owner, id, deleted, "alias delete requested");
        Ok(deleted)
    }

    pub async fn delete_query(&self, owner: OwnerId, id: u64) -> Result<bool> {
        let deleted = self.cache.store().delete_query(id, owner).await?;
        info!(owner, id, deleted, "query delete requested");
        Ok(deleted)
    }

    pub async fn list_aliases(&self, owner: OwnerId) -> Result<Vec<Alias>> {
        Ok(self.cache.store().list_aliases(owner).await?)
    }

    pub async fn list_queries(&self, owner: OwnerId) -> Result<Vec<StoredQuery>> {
        Ok(self.cache.store().list_queries(owner).await?)
    }

    pub async fn alias(&self, owner: OwnerId, lookup: &Lookup) -> Result<Arc<Alias>> {
        self.cache.fetch_alias(lookup, owner).await
    }

    pub async fn query(&self, owner: OwnerId, lookup: &Lookup) -> Result<Arc<StoredQuery>> {
        self.cache.fetch_query(lookup, owner).await
    }

    /// SQL of a stored query coerced for use as a scalar subquery.
    pub async fn scalarize_query(&self, owner: OwnerId, lookup: &Lookup) -> Result<String> {
        let query = self.cache.fetch_query(lookup, owner).await?;
        QueryCompiler::scalarize(&query)
    }

    pub async fn compile(&self, owner: OwnerId, input: &SelectQueryInput) -> Result<CompiledQuery> {
        QueryCompiler::compile(input, owner, &self.cache).await
    }
}
