use serde::Deserialize;

use crate::ast::{AliasRef, BooleanExpression, LiteralValue, QueryRef, non_empty};

/// Value-producing node of an input tree, selected by its `type` field.
///
/// Enumerated fields (`operation`, `func`, `unit`) stay as text here and are checked
/// during resolution, so an unknown value reports the full allowed set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    Literal {
        value: LiteralValue,
    },
    Op {
        left: Box<Expression>,
        operation: String,
        right: Box<Expression>,
    },
    Func {
        func: String,
        #[serde(default)]
        args: Vec<FunctionArg>,
    },
    Interval {
        value: i64,
        unit: String,
    },
    Case {
        #[serde(deserialize_with = "non_empty")]
        cases: Vec<CaseItem>,
        default: Box<Expression>,
    },
    /// Only meaningful as an alias-creation target.
    Table {
        table: String,
    },
    Col {
        table: String,
        column: String,
    },
    Aliased(AliasRef),
    Subquery(QueryRef),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaseItem {
    pub case: BooleanExpression,
    pub then: Expression,
}

/// The `*` token, accepted for `COUNT(*)` and for an all-columns select list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum AllColumns {
    #[default]
    #[serde(rename = "*")]
    All,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FunctionArg {
    Wildcard(AllColumns),
    Expr(Expression),
}

impl Expression {
    pub fn literal(value: LiteralValue) -> Self {
        Expression::Literal { value }
    }

    pub fn alias(id: u64) -> Self {
        Expression::Aliased(AliasRef::id(id))
    }

    pub fn alias_named(name: &str) -> Self {
        Expression::Aliased(AliasRef::name(name))
    }

    pub fn subquery(id: u64) -> Self {
        Expression::Subquery(QueryRef::id(id))
    }

    pub fn col(table: &str, column: &str) -> Self {
        Expression::Col { table: table.to_string(), column: column.to_string() }
    }

    pub fn func(func: &str, args: Vec<Expression>) -> Self {
        Expression::Func { func: func.to_string(), args: args.into_iter().map(FunctionArg::Expr).collect() }
    }

    pub fn op(left: Expression, operation: &str, right: Expression) -> Self {
        Expression::Op { left: Box::new(left), operation: operation.to_string(), right: Box::new(right) }
    }

    /// The tag this node was decoded from.
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Literal { .. } => "literal",
            Expression::Op { .. } => "op",
            Expression::Func { .. } => "func",
            Expression::Interval { .. } => "interval",
            Expression::Case { .. } => "case",
            Expression::Table { .. } => "table",
            Expression::Col { .. } => "col",
            Expression::Aliased(_) => "aliased",
            Expression::Subquery(_) => "subquery",
        }
    }
}
