use std::fmt;

use serde::Serialize;

use crate::resolved::{GroupByClause, HavingClause, LimitClause, OrderByClause, SelectClause, SqlNode, WhereClause};

/// A fully resolved SELECT statement.
#[derive(Clone, PartialEq)]
pub struct ResolvedQuery {
    pub select: SelectClause,
    pub where_clause: Option<WhereClause>,
    pub group_by: Option<GroupByClause>,
    pub having: Option<HavingClause>,
    pub order_by: Option<OrderByClause>,
    pub limit: Option<LimitClause>,
}

impl ResolvedQuery {
    /// Clause fragments in statement order; absent clauses render empty.
    fn fragments(&self) -> [String; 6] {
        [
            self.select.render(),
            self.where_clause.render(),
            self.group_by.render(),
            self.having.render(),
            self.order_by.render(),
            self.limit.render(),
        ]
    }

    /// `-1` when the select list is `*`.
    pub fn output_column_count(&self) -> i64 {
        self.select.columns.column_count()
    }
}

impl SqlNode for ResolvedQuery {
    fn render(&self) -> String {
        let body = self.fragments()
            .into_iter()
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        format!("{};", body.trim_end())
    }

    fn is_aggregate(&self) -> bool {
        self.select.is_aggregate() || self.having.is_aggregate() || self.order_by.is_aggregate()
    }
}

impl fmt::Debug for ResolvedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResolvedQuery({})", self.render())
    }
}

/// Result handed to callers: statement text plus its output shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub column_count: i64,
}

impl From<&ResolvedQuery> for CompiledQuery {
    fn from(query: &ResolvedQuery) -> Self {
        Self { sql: query.render(), column_count: query.output_column_count() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{CompareOp, Direction, LiteralValue},
        resolved::{OrderByItem, ResolvedBool, ResolvedExpr, ResolvedSelectItem, ResolvedSource, SelectList},
        test_fixtures::fixtures::{expr_alias, table_alias},
    };

    fn select_total() -> SelectClause {
        SelectClause {
            columns: SelectList::Items(vec![ResolvedSelectItem::Aliased(expr_alias(5, "total", "orders.total", false))]),
            from: ResolvedSource::Table(table_alias(1, "orders")),
            join: None,
        }
    }

    fn bare(select: SelectClause) -> ResolvedQuery {
        ResolvedQuery { select, where_clause: None, group_by: None, having: None, order_by: None, limit: None }
    }

    #[test]
    fn test_render_skips_absent_clauses() {
        let query = bare(select_total());
        assert_eq!(query.render(), "SELECT orders.total AS `total` FROM `orders`;");
        assert_eq!(query.output_column_count(), 1);
        assert_eq!(query.render(), query.render());
    }

    #[test]
    fn test_render_all_clauses_in_order() {
        let query = ResolvedQuery {
            where_clause: Some(WhereClause {
                expression: ResolvedBool::Compare {
                    left: ResolvedExpr::Aliased(expr_alias(5, "total", "orders.total", false)),
                    op: CompareOp::Gt,
                    right: ResolvedExpr::Literal(LiteralValue::Int(0)),
                },
            }),
            group_by: Some(GroupByClause { items: vec![ResolvedExpr::Aliased(expr_alias(3, "customer_id", "`orders`.`customer_id`", false))] }),
            having: Some(HavingClause { expression: ResolvedBool::Aliased(expr_alias(8, "has_revenue", "(SUM(`orders`.`total`) > 1000)", true)) }),
            order_by: Some(OrderByClause {
                items: vec![OrderByItem { operand: ResolvedExpr::Aliased(expr_alias(4, "revenue", "SUM(`orders`.`total`)", true)), direction: Direction::Desc }],
            }),
            limit: Some(LimitClause { limit: 5, offset: 10 }),
            ..bare(select_total())
        };

        assert_eq!(
            query.render(),
            "SELECT orders.total AS `total` FROM `orders` WHERE (orders.total > 0) \
             GROUP BY `orders`.`customer_id` HAVING (SUM(`orders`.`total`) > 1000) \
             ORDER BY SUM(`orders`.`total`) DESC LIMIT 5 OFFSET 10;"
        );
        assert!(query.is_aggregate());
    }

    #[test]
    fn test_compiled_query_carries_shape() {
        let query = bare(SelectClause { columns: SelectList::All, ..select_total() });
        let compiled = CompiledQuery::from(&query);
        assert_eq!(compiled, CompiledQuery { sql: "SELECT * FROM `orders`;".into(), column_count: -1 });
    }
}
