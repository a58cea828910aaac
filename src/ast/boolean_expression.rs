use serde::Deserialize;

use crate::ast::{AliasRef, Expression, QueryRef, non_empty};

/// Truth-valued node of an input tree, selected by its `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BooleanExpression {
    Not {
        operand: Box<BooleanExpression>,
    },
    AndOr {
        left: Box<BooleanExpression>,
        bool_op: String,
        right: Box<BooleanExpression>,
    },
    Compare {
        left: Expression,
        operator: String,
        right: Expression,
    },
    Between {
        expr: Expression,
        lower: Expression,
        upper: Expression,
        #[serde(default)]
        negate: bool,
    },
    IsNull {
        expr: Expression,
        #[serde(default)]
        negate: bool,
    },
    In {
        expr: Expression,
        source: InSource,
        #[serde(default)]
        negate: bool,
    },
    Exists {
        query: QueryRef,
        #[serde(default)]
        negate: bool,
    },
    /// A boolean-valued alias standing in for a whole condition.
    Aliased(AliasRef),
}

/// Right-hand side of `IN`: a literal list of expressions or a stored query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InSource {
    List(#[serde(deserialize_with = "non_empty")] Vec<Expression>),
    Query(QueryRef),
}

impl BooleanExpression {
    pub fn compare(left: Expression, operator: &str, right: Expression) -> Self {
        BooleanExpression::Compare { left, operator: operator.to_string(), right }
    }

    pub fn and_or(left: BooleanExpression, bool_op: &str, right: BooleanExpression) -> Self {
        BooleanExpression::AndOr { left: Box::new(left), bool_op: bool_op.to_string(), right: Box::new(right) }
    }

    pub fn alias(id: u64) -> Self {
        BooleanExpression::Aliased(AliasRef::id(id))
    }
}
