use serde::{Deserialize, Serialize};

use crate::ast::{AliasRef, AllColumns, BooleanExpression, Expression, QueryRef, non_empty};

/// FROM or JOIN source: a table alias or a stored query used as a derived table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableSource {
    Aliased(AliasRef),
    Subquery(QueryRef),
}

/// One output column of the select list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectItem {
    Aliased(AliasRef),
    Subquery(QueryRef),
}

/// `"*"` or a non-empty list of output items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SelectColumns {
    All(AllColumns),
    List(#[serde(deserialize_with = "non_empty")] Vec<SelectItem>),
}

impl Default for SelectColumns {
    fn default() -> Self {
        SelectColumns::All(AllColumns::All)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectClauseInput {
    #[serde(default)]
    pub columns: SelectColumns,
    #[serde(rename = "from_", alias = "from")]
    pub from: TableSource,
    #[serde(default)]
    pub join_clause: Option<JoinClauseInput>,
}

fn inner_join() -> String {
    "INNER".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JoinClauseInput {
    pub table: TableSource,
    pub on_condition: BooleanExpression,
    #[serde(rename = "type", default = "inner_join")]
    pub join_type: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WhereClauseInput {
    pub expression: BooleanExpression,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HavingClauseInput {
    pub expression: BooleanExpression,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupByClauseInput {
    #[serde(deserialize_with = "non_empty")]
    pub items: Vec<Expression>,
}

fn ascending() -> String {
    "ASC".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderByItemInput {
    pub operand: Expression,
    #[serde(default = "ascending")]
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderByClauseInput {
    #[serde(deserialize_with = "non_empty")]
    pub items: Vec<OrderByItemInput>,
}

/// Carries no references; copied into the resolved query as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitInput {
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}
