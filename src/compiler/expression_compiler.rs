use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

use crate::{
    ast::{
        AliasRef, ArithmeticOp, BooleanExpression, CompareOp, DateUnit, Expression, FunctionArg, FunctionName,
        InSource, Keyword, LogicalOp, QueryRef,
    },
    compiler::{CompileContext, CompileError, QueryCompiler, Result},
    database::{Alias, StoredQuery},
    resolved::{ResolvedArg, ResolvedBool, ResolvedCaseItem, ResolvedExpr, ResolvedInSource, ScalarSubquery},
};

/// Turns input expression and boolean nodes into their resolved counterparts.
pub struct ExpressionCompiler;

impl ExpressionCompiler {
    pub fn resolve_expression<'a>(input: &'a Expression, ctx: CompileContext<'a>) -> BoxFuture<'a, Result<ResolvedExpr>> {
        Box::pin(async move {
            Ok(match input {
                Expression::Literal { value } => ResolvedExpr::Literal(value.clone()),
                Expression::Op { left, operation, right } => {
                    let op = ArithmeticOp::parse(operation)?;
                    let left = Self::resolve_expression(left, ctx).await?;
                    let right = Self::resolve_expression(right, ctx).await?;
                    ResolvedExpr::Binary { left: Box::new(left), op, right: Box::new(right) }
                }
                Expression::Func { func, args } => {
                    let func = FunctionName::parse(func)?;
                    let args = Self::resolve_args(func, args, ctx).await?;
                    ResolvedExpr::Function { func, args }
                }
                Expression::Interval { value, unit } => {
                    ResolvedExpr::Interval { value: *value, unit: DateUnit::parse(unit)? }
                }
                Expression::Case { cases, default } => {
                    let mut resolved = Vec::with_capacity(cases.len());
                    for item in cases {
                        let when = Self::resolve_boolean(&item.case, ctx).await?;
                        let then = Self::resolve_expression(&item.then, ctx).await?;
                        resolved.push(ResolvedCaseItem { when, then });
                    }
                    let default = Self::resolve_expression(default, ctx).await?;
                    ResolvedExpr::Case { cases: resolved, default: Box::new(default) }
                }
                Expression::Table { table } => {
                    return CompileError::WrongOperandKind(format!(
                        "table `{}` can only be an alias target, not part of an expression",
                        table
                    )).err();
                }
                Expression::Col { table, column } => {
                    ResolvedExpr::Column { table: table.clone(), column: column.clone() }
                }
                Expression::Aliased(reference) => ResolvedExpr::Aliased(Self::resolve_operand_alias(reference, ctx).await?),
                Expression::Subquery(reference) => ResolvedExpr::Subquery(Self::resolve_scalar_subquery(reference, ctx).await?),
            })
        })
    }

    pub fn resolve_boolean<'a>(input: &'a BooleanExpression, ctx: CompileContext<'a>) -> BoxFuture<'a, Result<ResolvedBool>> {
        Box::pin(async move {
            Ok(match input {
                BooleanExpression::Not { operand } => {
                    ResolvedBool::Not(Box::new(Self::resolve_boolean(operand, ctx).await?))
                }
                BooleanExpression::AndOr { left, bool_op, right } => {
                    let op = LogicalOp::parse(bool_op)?;
                    let left = Self::resolve_boolean(left, ctx).await?;
                    let right = Self::resolve_boolean(right, ctx).await?;
                    ResolvedBool::AndOr { left: Box::new(left), op, right: Box::new(right) }
                }
                BooleanExpression::Compare { left, operator, right } => {
                    let op = CompareOp::parse(operator)?;
                    let left = Self::resolve_expression(left, ctx).await?;
                    let right = Self::resolve_expression(right, ctx).await?;
                    ResolvedBool::Compare { left, op, right }
                }
                BooleanExpression::Between { expr, lower, upper, negate } => ResolvedBool::Between {
                    expr: Self::resolve_expression(expr, ctx).await?,
                    lower: Self::resolve_expression(lower, ctx).await?,
                    upper: Self::resolve_expression(upper, ctx).await?,
                    negate: *negate,
                },
                BooleanExpression::IsNull { expr, negate } => ResolvedBool::IsNull {
                    expr: Self::resolve_expression(expr, ctx).await?,
                    negate: *negate,
                },
                BooleanExpression::In { expr, source, negate } => {
                    let expr = Self::resolve_expression(expr, ctx).await?;
                    let source = match source {
                        InSource::List(items) => {
                            let mut resolved = Vec::with_capacity(items.len());
                            for item in items {
                                resolved.push(Self::resolve_expression(item, ctx).await?);
                            }
                            ResolvedInSource::List(resolved)
                        }
                        InSource::Query(reference) => ResolvedInSource::Query(Self::resolve_in_subquery(reference, ctx).await?),
                    };
                    ResolvedBool::In { expr, source, negate: *negate }
                }
                BooleanExpression::Exists { query, negate } => ResolvedBool::Exists {
                    query: Self::fetch_query(query, ctx).await?,
                    negate: *negate,
                },
                BooleanExpression::Aliased(reference) => ResolvedBool::Aliased(Self::resolve_operand_alias(reference, ctx).await?),
            })
        })
    }

    /// Alias used as a value or a condition. Both positions go through here, so a boolean
    /// alias behaves the same wherever it is referenced.
    pub async fn resolve_operand_alias(reference: &AliasRef, ctx: CompileContext<'_>) -> Result<Arc<Alias>> {
        let alias = ctx.cache.fetch_alias(&reference.lookup, ctx.owner).await?;
        if alias.is_table {
            return CompileError::WrongOperandKind(format!(
                "alias '{}' points at a table and cannot be used inside an expression",
                alias.name
            )).err();
        }
        debug!(alias = %alias.name, aggregate = alias.is_aggregate, "resolved expression alias");
        Ok(alias)
    }

    pub async fn fetch_query(reference: &QueryRef, ctx: CompileContext<'_>) -> Result<Arc<StoredQuery>> {
        ctx.cache.fetch_query(&reference.lookup, ctx.owner).await
    }

    /// Stored query in a value position, coerced to a single row and column.
    pub async fn resolve_scalar_subquery(reference: &QueryRef, ctx: CompileContext<'_>) -> Result<ScalarSubquery> {
        let query = Self::fetch_query(reference, ctx).await?;
        let sql = QueryCompiler::scalarize(&query)?;
        Ok(ScalarSubquery { query, sql })
    }

    /// Right-hand side of `IN`: one column required, rows unrestricted.
    async fn resolve_in_subquery(reference: &QueryRef, ctx: CompileContext<'_>) -> Result<Arc<StoredQuery>> {
        let query = Self::fetch_query(reference, ctx).await?;
        if query.column_count != 1 {
            return CompileError::SubqueryColumnArityError {
                name: query.name.clone(),
                column_count: query.column_count,
            }.err();
        }
        Ok(query)
    }

    async fn resolve_args(func: FunctionName, args: &[FunctionArg], ctx: CompileContext<'_>) -> Result<Vec<ResolvedArg>> {
        let mut resolved = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                FunctionArg::Wildcard(_) => {
                    if func != FunctionName::Count || args.len() != 1 {
                        return CompileError::WrongOperandKind(format!(
                            "`*` is only allowed as the single argument of COUNT, not in {}",
                            func
                        )).err();
                    }
                    resolved.push(ResolvedArg::Wildcard);
                }
                FunctionArg::Expr(expr) => resolved.push(ResolvedArg::Expr(Self::resolve_expression(expr, ctx).await?)),
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        database::{EntityKind, OwnerId},
        resolved::SqlNode,
        test_fixtures::fixtures::{OTHER_OWNER, OWNER, fixture_cache},
    };

    async fn expr(value: serde_json::Value, owner: OwnerId) -> Result<ResolvedExpr> {
        let cache = fixture_cache().await;
        let input: Expression = serde_json::from_value(value).unwrap();
        ExpressionCompiler::resolve_expression(&input, CompileContext::new(owner, &cache)).await
    }

    async fn boolean(value: serde_json::Value) -> Result<ResolvedBool> {
        let cache = fixture_cache().await;
        let input: BooleanExpression = serde_json::from_value(value).unwrap();
        ExpressionCompiler::resolve_boolean(&input, CompileContext::new(OWNER, &cache)).await
    }

    #[tokio::test]
    async fn test_resolve_arithmetic_over_alias() {
        let resolved = expr(json!({
            "type": "op",
            "left": { "type": "aliased", "alias_name": "total" },
            "operation": "div",
            "right": { "type": "literal", "value": 2 }
        }), OWNER).await.unwrap();

        assert_eq!(resolved.render(), "(orders.total DIV 2)");
        assert!(!resolved.is_aggregate());
    }

    #[tokio::test]
    async fn test_function_names_are_checked() {
        let resolved = expr(json!({
            "type": "func",
            "func": "round",
            "args": [{ "type": "aliased", "alias_name": "revenue" }, { "type": "literal", "value": 2 }]
        }), OWNER).await.unwrap();
        assert_eq!(resolved.render(), "ROUND(SUM(`orders`.`total`), 2)");
        assert!(resolved.is_aggregate());

        let err = expr(json!({ "type": "func", "func": "SLEEP", "args": [] }), OWNER).await.unwrap_err();
        match err {
            CompileError::InvalidEnumValue { category, used, allowed } => {
                assert_eq!(category, "function");
                assert_eq!(used, "SLEEP");
                assert_eq!(allowed.len(), 14);
                assert!(allowed.contains(&"COUNT"));
            }
            other => panic!("expected InvalidEnumValue, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wildcard_only_inside_count() {
        let count = expr(json!({ "type": "func", "func": "COUNT", "args": ["*"] }), OWNER).await.unwrap();
        assert_eq!(count.render(), "COUNT(*)");
        assert!(count.is_aggregate());

        let sum = expr(json!({ "type": "func", "func": "SUM", "args": ["*"] }), OWNER).await;
        assert!(matches!(sum, Err(CompileError::WrongOperandKind(_))));
    }

    #[tokio::test]
    async fn test_table_operand_is_rejected() {
        let err = expr(json!({ "type": "table", "table": "orders" }), OWNER).await.unwrap_err();
        assert!(matches!(err, CompileError::WrongOperandKind(_)));

        let nested = expr(json!({
            "type": "op",
            "left": { "type": "table", "table": "orders" },
            "operation": "+",
            "right": { "type": "literal", "value": 5 }
        }), OWNER).await;
        assert!(matches!(nested, Err(CompileError::WrongOperandKind(_))));
    }

    #[tokio::test]
    async fn test_table_alias_in_expression_is_rejected() {
        let err = expr(json!({ "type": "aliased", "alias_name": "orders" }), OWNER).await.unwrap_err();
        assert!(matches!(err, CompileError::WrongOperandKind(_)));
    }

    #[tokio::test]
    async fn test_foreign_alias_is_not_found() {
        // owner 2 has its own `total`, but not `revenue`
        let own = expr(json!({ "type": "aliased", "alias_name": "total" }), OTHER_OWNER).await.unwrap();
        assert_eq!(own.render(), "`orders`.`total`");

        let err = expr(json!({ "type": "aliased", "alias_name": "revenue" }), OTHER_OWNER).await;
        assert!(matches!(err, Err(CompileError::ReferenceNotFound { kind: EntityKind::Alias, .. })));

        let err = expr(json!({ "type": "aliased", "alias_id": 4 }), OTHER_OWNER).await.unwrap_err();
        assert_eq!(err.to_string(), "alias with id 4 does not exist");
    }

    #[tokio::test]
    async fn test_interval_and_case() {
        let interval = expr(json!({ "type": "interval", "value": 7, "unit": "day" }), OWNER).await.unwrap();
        assert_eq!(interval.render(), "INTERVAL 7 DAY");

        let bad_unit = expr(json!({ "type": "interval", "value": 7, "unit": "fortnight" }), OWNER).await;
        assert!(matches!(bad_unit, Err(CompileError::InvalidEnumValue { category: "date unit", .. })));

        let case = expr(json!({
            "type": "case",
            "cases": [{
                "case": { "type": "aliased", "alias_name": "big_order" },
                "then": { "type": "literal", "value": "big" }
            }],
            "default": { "type": "literal", "value": "small" }
        }), OWNER).await.unwrap();
        assert_eq!(case.render(), "CASE WHEN (`orders`.`total` > 100) THEN 'big' ELSE 'small' END");
    }

    #[tokio::test]
    async fn test_scalar_subquery_in_expression() {
        let ok = expr(json!({ "type": "subquery", "query_name": "avg_total" }), OWNER).await.unwrap();
        assert_eq!(ok.render(), "(SELECT AVG(`orders`.`total`) AS `avg_total` FROM `orders` LIMIT 1)");

        let wide = expr(json!({ "type": "subquery", "query_name": "pairs" }), OWNER).await;
        assert!(matches!(wide, Err(CompileError::SubqueryNotScalarizable { .. })));
    }

    #[tokio::test]
    async fn test_boolean_alias_in_both_positions() {
        let as_bool = boolean(json!({ "type": "aliased", "alias_name": "big_order" })).await.unwrap();
        let as_expr = expr(json!({ "type": "aliased", "alias_name": "big_order" }), OWNER).await.unwrap();
        assert_eq!(as_bool.render(), as_expr.render());
        assert_eq!(as_bool.is_aggregate(), as_expr.is_aggregate());
    }

    #[tokio::test]
    async fn test_in_subquery_arity() {
        let ok = boolean(json!({
            "type": "in",
            "expr": { "type": "aliased", "alias_name": "total" },
            "source": { "query_name": "top_five" }
        })).await.unwrap();
        assert_eq!(ok.render(), "(orders.total IN (SELECT `orders`.`total` AS `total` FROM `orders` LIMIT 5 OFFSET 0))");

        let err = boolean(json!({
            "type": "in",
            "expr": { "type": "aliased", "alias_name": "total" },
            "source": { "query_name": "pairs" }
        })).await.unwrap_err();
        match err {
            CompileError::SubqueryColumnArityError { name, column_count } => {
                assert_eq!(name, "pairs");
                assert_eq!(column_count, 2);
            }
            other => panic!("expected SubqueryColumnArityError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_comparison_operator_is_checked() {
        let err = boolean(json!({
            "type": "compare",
            "left": { "type": "aliased", "alias_name": "total" },
            "operator": "LIKE",
            "right": { "type": "literal", "value": "x%" }
        })).await.unwrap_err();
        assert!(matches!(err, CompileError::InvalidEnumValue { category: "comparison operator", .. }));
    }

    #[tokio::test]
    async fn test_exists_and_not() {
        let resolved = boolean(json!({
            "type": "not",
            "operand": { "type": "exists", "query": { "query_name": "everything" }, "negate": false }
        })).await.unwrap();
        assert_eq!(resolved.render(), "(NOT (EXISTS (SELECT * FROM `orders`)))");
    }
}
