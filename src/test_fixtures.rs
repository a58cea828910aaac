#[cfg(test)]
pub mod fixtures {
    use std::sync::Arc;

    use chrono::Utc;

    use crate::database::{
        Alias, Config, EntityStore, InternalStore, MemoryKvCache, MemorySchema, MemoryStore, NewAlias, NewQuery,
        OwnerId, ResolutionCache, StoredQuery, TableSchema,
    };

    pub const OWNER: OwnerId = 1;
    pub const OTHER_OWNER: OwnerId = 2;

    pub fn table_alias(id: u64, table: &str) -> Arc<Alias> {
        Arc::new(Alias {
            id,
            owner_id: OWNER,
            name: table.to_string(),
            target: format!("`{}`", table),
            is_table: true,
            is_aggregate: false,
            created_at: Utc::now(),
        })
    }

    pub fn expr_alias(id: u64, name: &str, target: &str, is_aggregate: bool) -> Arc<Alias> {
        Arc::new(Alias {
            id,
            owner_id: OWNER,
            name: name.to_string(),
            target: target.to_string(),
            is_table: false,
            is_aggregate,
            created_at: Utc::now(),
        })
    }

    pub fn stored_query(id: u64, name: &str, sql: &str, column_count: i64) -> Arc<StoredQuery> {
        Arc::new(StoredQuery {
            id,
            owner_id: OWNER,
            name: name.to_string(),
            sql: sql.to_string(),
            column_count,
            created_at: Utc::now(),
        })
    }

    pub fn fixture_schema() -> MemorySchema {
        MemorySchema::from_tables(vec![
            TableSchema::new("orders")
                .column("id", "int")
                .column("customer_id", "int")
                .column("total", "decimal(10,2)")
                .column("created_at", "datetime"),
            TableSchema::new("customers")
                .column("id", "int")
                .column("name", "varchar(255)")
                .column("city", "varchar(64)"),
            TableSchema::new("__users__")
                .column("id", "int")
                .column("password", "varchar(255)"),
        ])
    }

    fn alias(name: &str, target: &str, is_table: bool, is_aggregate: bool) -> NewAlias {
        NewAlias { owner_id: OWNER, name: name.into(), target: target.into(), is_table, is_aggregate }
    }

    fn query(name: &str, sql: &str, column_count: i64) -> NewQuery {
        NewQuery { owner_id: OWNER, name: name.into(), sql: sql.into(), column_count }
    }

    /// Ids follow insertion order: `orders` is alias 1, `total` is alias 5.
    pub async fn fixture_store() -> MemoryStore {
        let store = InternalStore::new().into_protected();

        let aliases = vec![
            alias("orders", "`orders`", true, false),
            alias("customers", "`customers`", true, false),
            alias("customer_id", "`orders`.`customer_id`", false, false),
            alias("revenue", "SUM(`orders`.`total`)", false, true),
            alias("total", "orders.total", false, false),
            alias("big_order", "(`orders`.`total` > 100)", false, false),
            alias("customer_pk", "`customers`.`id`", false, false),
            alias("has_revenue", "(SUM(`orders`.`total`) > 1000)", false, true),
            NewAlias { owner_id: OTHER_OWNER, ..alias("total", "`orders`.`total`", false, false) },
        ];
        for new_alias in aliases {
            store.insert_alias(new_alias).await.unwrap();
        }

        let queries = vec![
            query("avg_total", "SELECT AVG(`orders`.`total`) AS `avg_total` FROM `orders`;", 1),
            query("pairs", "SELECT `orders`.`id` AS `id`, `orders`.`total` AS `total` FROM `orders`;", 2),
            query("top_one", "SELECT `orders`.`total` AS `total` FROM `orders` LIMIT 1 OFFSET 0;", 1),
            query("top_five", "SELECT `orders`.`total` AS `total` FROM `orders` LIMIT 5 OFFSET 0;", 1),
            query("everything", "SELECT * FROM `orders`;", -1),
        ];
        for new_query in queries {
            store.insert_query(new_query).await.unwrap();
        }

        store
    }

    pub async fn fixture_cache() -> ResolutionCache {
        let store = fixture_store().await;
        ResolutionCache::new(Arc::new(store), Arc::new(MemoryKvCache::new()), &Config::new())
    }
}
