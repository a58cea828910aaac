use std::{fmt, sync::Arc};

use crate::{
    ast::{ArithmeticOp, DateUnit, FunctionName, LiteralValue},
    database::{Alias, StoredQuery},
    resolved::{ResolvedBool, SqlNode, quote_ident, render_list},
};

/// Value-producing node whose references have been fetched and checked.
#[derive(Clone, PartialEq)]
pub enum ResolvedExpr {
    Literal(LiteralValue),
    Binary {
        left: Box<ResolvedExpr>,
        op: ArithmeticOp,
        right: Box<ResolvedExpr>,
    },
    Function {
        func: FunctionName,
        args: Vec<ResolvedArg>,
    },
    Interval {
        value: i64,
        unit: DateUnit,
    },
    Case {
        cases: Vec<ResolvedCaseItem>,
        default: Box<ResolvedExpr>,
    },
    Column {
        table: String,
        column: String,
    },
    /// Expression alias; renders its stored target verbatim.
    Aliased(Arc<Alias>),
    Subquery(ScalarSubquery),
}

#[derive(Clone, PartialEq)]
pub enum ResolvedArg {
    Wildcard,
    Expr(ResolvedExpr),
}

#[derive(Clone, PartialEq)]
pub struct ResolvedCaseItem {
    pub when: ResolvedBool,
    pub then: ResolvedExpr,
}

/// A stored query coerced to a single value: its statement body with a `LIMIT 1`.
#[derive(Clone, PartialEq)]
pub struct ScalarSubquery {
    pub query: Arc<StoredQuery>,
    pub sql: String,
}

impl SqlNode for ResolvedExpr {
    fn render(&self) -> String {
        match self {
            ResolvedExpr::Literal(value) => value.to_sql(),
            ResolvedExpr::Binary { left, op, right } => format!("({} {} {})", left.render(), op, right.render()),
            ResolvedExpr::Function { func, args } => format!("{}({})", func, render_list(args)),
            ResolvedExpr::Interval { value, unit } => format!("INTERVAL {} {}", value, unit),
            ResolvedExpr::Case { cases, default } => {
                let branches: Vec<String> = cases.iter().map(SqlNode::render).collect();
                format!("CASE {} ELSE {} END", branches.join(" "), default.render())
            }
            ResolvedExpr::Column { table, column } => format!("{}.{}", quote_ident(table), quote_ident(column)),
            ResolvedExpr::Aliased(alias) => alias.target.clone(),
            ResolvedExpr::Subquery(subquery) => subquery.render(),
        }
    }

    fn is_aggregate(&self) -> bool {
        match self {
            ResolvedExpr::Literal(_)
            | ResolvedExpr::Interval { .. }
            | ResolvedExpr::Column { .. }
            | ResolvedExpr::Subquery(_) => false,
            ResolvedExpr::Binary { left, right, .. } => left.is_aggregate() || right.is_aggregate(),
            ResolvedExpr::Function { func, args } => func.is_aggregate() || args.iter().any(SqlNode::is_aggregate),
            ResolvedExpr::Case { cases, default } => cases.iter().any(SqlNode::is_aggregate) || default.is_aggregate(),
            ResolvedExpr::Aliased(alias) => alias.is_aggregate,
        }
    }
}

impl ResolvedExpr {
    /// Every `table`.`column` pair referenced directly by this subtree.
    pub fn columns(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    pub(crate) fn collect_columns<'a>(&'a self, out: &mut Vec<(&'a str, &'a str)>) {
        match self {
            ResolvedExpr::Column { table, column } => out.push((table.as_str(), column.as_str())),
            ResolvedExpr::Binary { left, right, .. } => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
            ResolvedExpr::Function { args, .. } => {
                for arg in args {
                    if let ResolvedArg::Expr(expr) = arg {
                        expr.collect_columns(out);
                    }
                }
            }
            ResolvedExpr::Case { cases, default } => {
                for item in cases {
                    item.when.collect_columns(out);
                    item.then.collect_columns(out);
                }
                default.collect_columns(out);
            }
            ResolvedExpr::Literal(_)
            | ResolvedExpr::Interval { .. }
            | ResolvedExpr::Aliased(_)
            | ResolvedExpr::Subquery(_) => {}
        }
    }
}

impl SqlNode for ResolvedArg {
    fn render(&self) -> String {
        match self {
            ResolvedArg::Wildcard => "*".to_string(),
            ResolvedArg::Expr(expr) => expr.render(),
        }
    }

    fn is_aggregate(&self) -> bool {
        match self {
            ResolvedArg::Wildcard => false,
            ResolvedArg::Expr(expr) => expr.is_aggregate(),
        }
    }
}

impl SqlNode for ResolvedCaseItem {
    fn render(&self) -> String {
        format!("WHEN {} THEN {}", self.when.render(), self.then.render())
    }

    fn is_aggregate(&self) -> bool {
        self.when.is_aggregate() || self.then.is_aggregate()
    }
}

impl SqlNode for ScalarSubquery {
    fn render(&self) -> String {
        format!("({})", self.sql)
    }

    fn is_aggregate(&self) -> bool {
        false
    }
}

impl fmt::Debug for ResolvedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedExpr::Literal(value) => write!(f, "Literal({:?})", value),
            ResolvedExpr::Aliased(alias) => write!(f, "Aliased({}: {})", alias.name, alias.target),
            ResolvedExpr::Subquery(subquery) => write!(f, "Subquery({}: {})", subquery.query.name, subquery.sql),
            _ => write!(f, "Expr({})", self.render()),
        }
    }
}

impl fmt::Debug for ResolvedArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Arg({})", self.render())
    }
}

impl fmt::Debug for ResolvedCaseItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CaseItem({})", self.render())
    }
}

impl fmt::Debug for ScalarSubquery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarSubquery({}: {})", self.query.name, self.sql)
    }
}

#[cfg(test)]
mod tests {
    use ordered_float::NotNan;

    use super::*;
    use crate::{ast::CompareOp, test_fixtures::fixtures::{expr_alias, stored_query}};

    fn int(i: i64) -> ResolvedExpr {
        ResolvedExpr::Literal(LiteralValue::Int(i))
    }

    fn sum(arg: ResolvedExpr) -> ResolvedExpr {
        ResolvedExpr::Function { func: FunctionName::Sum, args: vec![ResolvedArg::Expr(arg)] }
    }

    #[test]
    fn test_render_literals_and_operators() {
        let expr = ResolvedExpr::Binary {
            left: Box::new(ResolvedExpr::Column { table: "orders".into(), column: "total".into() }),
            op: ArithmeticOp::Mul,
            right: Box::new(ResolvedExpr::Literal(LiteralValue::Float(NotNan::new(1.5).unwrap()))),
        };
        assert_eq!(expr.render(), "(`orders`.`total` * 1.5)");

        let div = ResolvedExpr::Binary { left: Box::new(int(7)), op: ArithmeticOp::IntDiv, right: Box::new(int(2)) };
        assert_eq!(div.render(), "(7 DIV 2)");
    }

    #[test]
    fn test_render_functions() {
        let count = ResolvedExpr::Function { func: FunctionName::Count, args: vec![ResolvedArg::Wildcard] };
        assert_eq!(count.render(), "COUNT(*)");

        let round = ResolvedExpr::Function {
            func: FunctionName::Round,
            args: vec![ResolvedArg::Expr(ResolvedExpr::Aliased(expr_alias(5, "total", "orders.total", false))), ResolvedArg::Expr(int(2))],
        };
        assert_eq!(round.render(), "ROUND(orders.total, 2)");
    }

    #[test]
    fn test_render_interval_and_case() {
        let interval = ResolvedExpr::Interval { value: 3, unit: DateUnit::Day };
        assert_eq!(interval.render(), "INTERVAL 3 DAY");

        let case = ResolvedExpr::Case {
            cases: vec![ResolvedCaseItem {
                when: ResolvedBool::Compare { left: int(1), op: CompareOp::Eq, right: int(1) },
                then: ResolvedExpr::Literal(LiteralValue::String("yes".into())),
            }],
            default: Box::new(ResolvedExpr::Literal(LiteralValue::Null)),
        };
        assert_eq!(case.render(), "CASE WHEN (1 = 1) THEN 'yes' ELSE NULL END");
    }

    #[test]
    fn test_aggregate_propagation() {
        let revenue = ResolvedExpr::Aliased(expr_alias(4, "revenue", "SUM(`orders`.`total`)", true));
        let plain = ResolvedExpr::Column { table: "orders".into(), column: "total".into() };

        assert!(sum(plain.clone()).is_aggregate());
        assert!(!plain.is_aggregate());
        assert!(revenue.is_aggregate());

        let mixed = ResolvedExpr::Binary { left: Box::new(plain.clone()), op: ArithmeticOp::Add, right: Box::new(revenue.clone()) };
        assert!(mixed.is_aggregate());

        let rounded = ResolvedExpr::Function { func: FunctionName::Round, args: vec![ResolvedArg::Expr(revenue)] };
        assert!(rounded.is_aggregate());

        assert!(!int(1).is_aggregate());
        assert!(!ResolvedExpr::Interval { value: 1, unit: DateUnit::Hour }.is_aggregate());
    }

    #[test]
    fn test_case_is_aggregate_if_any_branch_is() {
        let case = ResolvedExpr::Case {
            cases: vec![
                ResolvedCaseItem { when: ResolvedBool::Compare { left: int(1), op: CompareOp::Eq, right: int(1) }, then: int(0) },
                ResolvedCaseItem { when: ResolvedBool::Compare { left: int(2), op: CompareOp::Eq, right: int(2) }, then: sum(int(1)) },
            ],
            default: Box::new(int(0)),
        };
        assert!(case.is_aggregate());
    }

    #[test]
    fn test_scalar_subquery_render_is_parenthesized() {
        let node = ResolvedExpr::Subquery(ScalarSubquery {
            query: stored_query(1, "avg_total", "SELECT AVG(`orders`.`total`) FROM `orders`;", 1),
            sql: "SELECT AVG(`orders`.`total`) FROM `orders` LIMIT 1".into(),
        });
        assert_eq!(node.render(), "(SELECT AVG(`orders`.`total`) FROM `orders` LIMIT 1)");
        assert!(!node.is_aggregate());
        // rendering is deterministic
        assert_eq!(node.render(), node.render());
    }

    #[test]
    fn test_columns_are_collected() {
        let expr = ResolvedExpr::Binary {
            left: Box::new(ResolvedExpr::Column { table: "orders".into(), column: "total".into() }),
            op: ArithmeticOp::Sub,
            right: Box::new(sum(ResolvedExpr::Column { table: "orders".into(), column: "tax".into() })),
        };
        assert_eq!(expr.columns(), vec![("orders", "total"), ("orders", "tax")]);
    }
}
