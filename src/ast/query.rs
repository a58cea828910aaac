use serde::Deserialize;

use crate::{
    ast::{BooleanExpression, Expression, GroupByClauseInput, HavingClauseInput, LimitInput, OrderByClauseInput, SelectClauseInput, WhereClauseInput},
    compiler::Result,
};

/// Complete input tree of one SELECT statement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectQueryInput {
    pub select: SelectClauseInput,
    #[serde(rename = "where", default)]
    pub where_clause: Option<WhereClauseInput>,
    #[serde(default)]
    pub groupby: Option<GroupByClauseInput>,
    #[serde(default)]
    pub having: Option<HavingClauseInput>,
    #[serde(default)]
    pub orderby: Option<OrderByClauseInput>,
    #[serde(default)]
    pub limit: Option<LimitInput>,
}

impl SelectQueryInput {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// What an alias points at: a table, a value expression or a condition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AliasTarget {
    Expr(Expression),
    Bool(BooleanExpression),
}

/// Request to register a new alias for an owner.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AliasCreate {
    pub alias: String,
    pub target: AliasTarget,
}

impl AliasCreate {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
