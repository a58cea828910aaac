use tracing::debug;

use crate::{
    ast::{AliasCreate, AliasTarget, Expression},
    compiler::{CompileContext, CompileError, ExpressionCompiler, Result},
    database::{Config, NewAlias, SchemaProvider},
    resolved::SqlNode,
};

/// Validates an alias request against the physical schema and precomputes its
/// target text and flags.
pub struct AliasBuilder<'a> {
    schema: &'a dyn SchemaProvider,
    config: &'a Config,
}

impl<'a> AliasBuilder<'a> {
    pub fn new(schema: &'a dyn SchemaProvider, config: &'a Config) -> Self {
        Self { schema, config }
    }

    pub async fn build(&self, request: &AliasCreate, ctx: CompileContext<'_>) -> Result<NewAlias> {
        let (target, is_table, is_aggregate) = match &request.target {
            AliasTarget::Expr(Expression::Table { table }) => (self.table_target(table).await?, true, false),
            AliasTarget::Expr(expr) => {
                let resolved = ExpressionCompiler::resolve_expression(expr, ctx).await?;
                self.check_columns(&resolved.columns()).await?;
                (resolved.render(), false, resolved.is_aggregate())
            }
            AliasTarget::Bool(condition) => {
                let resolved = ExpressionCompiler::resolve_boolean(condition, ctx).await?;
                self.check_columns(&resolved.columns()).await?;
                (resolved.render(), false, resolved.is_aggregate())
            }
        };

        debug!(alias = %request.alias, %target, is_table, is_aggregate, "alias target validated");
        Ok(NewAlias {
            owner_id: ctx.owner,
            name: request.alias.clone(),
            target,
            is_table,
            is_aggregate,
        })
    }

    /// Table names an alias may point at.
    pub async fn visible_tables(&self) -> Result<Vec<String>> {
        let tables = self.schema.table_names().await?;
        Ok(tables.into_iter().filter(|table| !self.config.is_system_table(table)).collect())
    }

    async fn ensure_visible(&self, table: &str) -> Result<()> {
        if self.config.is_system_table(table) {
            return CompileError::ReservedTarget(format!("table `{}`", table)).err();
        }
        if !self.visible_tables().await?.iter().any(|t| t == table) {
            return CompileError::AliasTargetMissing(format!("table `{}`", table)).err();
        }
        Ok(())
    }

    async fn table_target(&self, table: &str) -> Result<String> {
        self.ensure_visible(table).await?;
        Ok(crate::resolved::quote_ident(table))
    }

    async fn check_columns(&self, columns: &[(&str, &str)]) -> Result<()> {
        for (table, column) in columns {
            self.ensure_visible(table).await?;
            let schema = self.schema.schema_of(table).await?
                .ok_or_else(|| CompileError::AliasTargetMissing(format!("table `{}`", table)))?;
            if !schema.has_column(column) {
                return CompileError::AliasTargetMissing(format!("column `{}`.`{}`", table, column)).err();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_fixtures::fixtures::{OWNER, fixture_cache, fixture_schema};

    async fn build(request: serde_json::Value) -> Result<NewAlias> {
        let cache = fixture_cache().await;
        let schema = fixture_schema();
        let config = Config::new();
        let request: AliasCreate = serde_json::from_value(request).unwrap();
        AliasBuilder::new(&schema, &config).build(&request, CompileContext::new(OWNER, &cache)).await
    }

    #[tokio::test]
    async fn test_table_target() {
        let alias = build(json!({ "alias": "o", "target": { "type": "table", "table": "orders" } })).await.unwrap();
        assert_eq!(alias.target, "`orders`");
        assert!(alias.is_table);
        assert!(!alias.is_aggregate);
    }

    #[tokio::test]
    async fn test_missing_and_reserved_tables() {
        let missing = build(json!({ "alias": "x", "target": { "type": "table", "table": "invoices" } })).await;
        assert!(matches!(missing, Err(CompileError::AliasTargetMissing(_))));

        let reserved = build(json!({ "alias": "x", "target": { "type": "table", "table": "__users__" } })).await;
        assert!(matches!(reserved, Err(CompileError::ReservedTarget(_))));

        let reserved_column = build(json!({
            "alias": "x",
            "target": { "type": "col", "table": "__users__", "column": "password" }
        })).await;
        assert!(matches!(reserved_column, Err(CompileError::ReservedTarget(_))));
    }

    #[tokio::test]
    async fn test_aggregate_expression_target() {
        let alias = build(json!({
            "alias": "revenue_2",
            "target": { "type": "func", "func": "sum", "args": [{ "type": "col", "table": "orders", "column": "total" }] }
        })).await.unwrap();
        assert_eq!(alias.target, "SUM(`orders`.`total`)");
        assert!(!alias.is_table);
        assert!(alias.is_aggregate);
    }

    #[tokio::test]
    async fn test_unknown_column_is_rejected() {
        let err = build(json!({
            "alias": "bad",
            "target": { "type": "col", "table": "orders", "column": "discount" }
        })).await.unwrap_err();
        assert_eq!(err.to_string(), "alias target column `orders`.`discount` does not exist");
    }

    #[tokio::test]
    async fn test_nested_table_operand_is_rejected() {
        let err = build(json!({
            "alias": "bad",
            "target": {
                "type": "op",
                "left": { "type": "table", "table": "orders" },
                "operation": "+",
                "right": { "type": "literal", "value": 5 }
            }
        })).await;
        assert!(matches!(err, Err(CompileError::WrongOperandKind(_))));
    }

    #[tokio::test]
    async fn test_boolean_target_over_existing_alias() {
        let alias = build(json!({
            "alias": "rich",
            "target": {
                "type": "compare",
                "left": { "type": "aliased", "alias_name": "revenue" },
                "operator": ">=",
                "right": { "type": "literal", "value": 5000 }
            }
        })).await.unwrap();
        assert_eq!(alias.target, "(SUM(`orders`.`total`) >= 5000)");
        assert!(alias.is_aggregate);
    }
}
