use std::{fmt, sync::Arc};

use crate::{
    ast::{Direction, JoinType, LimitInput},
    database::{Alias, StoredQuery},
    resolved::{ResolvedBool, ResolvedExpr, ScalarSubquery, SqlNode, quote_ident, render_list},
};

/// FROM / JOIN source after resolution.
#[derive(Clone, PartialEq)]
pub enum ResolvedSource {
    /// alias with `is_table = true`
    Table(Arc<Alias>),
    /// stored query used as a derived table, named after the query
    Subquery(Arc<StoredQuery>),
}

impl SqlNode for ResolvedSource {
    fn render(&self) -> String {
        match self {
            ResolvedSource::Table(alias) => alias.target.clone(),
            ResolvedSource::Subquery(query) => format!("({}) AS {}", query.body(), quote_ident(&query.name)),
        }
    }

    fn is_aggregate(&self) -> bool {
        false
    }
}

#[derive(Clone, PartialEq)]
pub enum ResolvedSelectItem {
    Aliased(Arc<Alias>),
    Subquery(ScalarSubquery),
}

impl SqlNode for ResolvedSelectItem {
    fn render(&self) -> String {
        match self {
            ResolvedSelectItem::Aliased(alias) => format!("{} AS {}", alias.target, quote_ident(&alias.name)),
            ResolvedSelectItem::Subquery(subquery) => {
                format!("{} AS {}", subquery.render(), quote_ident(&subquery.query.name))
            }
        }
    }

    fn is_aggregate(&self) -> bool {
        match self {
            ResolvedSelectItem::Aliased(alias) => alias.is_aggregate,
            ResolvedSelectItem::Subquery(_) => false,
        }
    }
}

#[derive(Clone, PartialEq)]
pub enum SelectList {
    All,
    Items(Vec<ResolvedSelectItem>),
}

impl SelectList {
    /// `-1` for `*`, otherwise the number of output items.
    pub fn column_count(&self) -> i64 {
        match self {
            SelectList::All => crate::database::ALL_COLUMNS,
            SelectList::Items(items) => items.len() as i64,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub table: ResolvedSource,
    pub on_condition: ResolvedBool,
}

impl SqlNode for JoinClause {
    fn render(&self) -> String {
        format!("{} JOIN {} ON {}", self.join_type, self.table.render(), self.on_condition.render())
    }

    fn is_aggregate(&self) -> bool {
        self.on_condition.is_aggregate()
    }
}

/// Output list, FROM source and the optional JOIN.
#[derive(Clone, PartialEq)]
pub struct SelectClause {
    pub columns: SelectList,
    pub from: ResolvedSource,
    pub join: Option<JoinClause>,
}

impl SqlNode for SelectClause {
    fn render(&self) -> String {
        let columns = match &self.columns {
            SelectList::All => "*".to_string(),
            SelectList::Items(items) => render_list(items),
        };
        let mut sql = format!("SELECT {} FROM {}", columns, self.from.render());
        let join = self.join.render();
        if !join.is_empty() {
            sql.push(' ');
            sql.push_str(&join);
        }
        sql
    }

    fn is_aggregate(&self) -> bool {
        match &self.columns {
            SelectList::All => false,
            SelectList::Items(items) => items.iter().any(SqlNode::is_aggregate),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct WhereClause {
    pub expression: ResolvedBool,
}

impl SqlNode for WhereClause {
    fn render(&self) -> String {
        format!("WHERE {}", self.expression.render())
    }

    fn is_aggregate(&self) -> bool {
        self.expression.is_aggregate()
    }
}

#[derive(Clone, PartialEq)]
pub struct HavingClause {
    pub expression: ResolvedBool,
}

impl SqlNode for HavingClause {
    fn render(&self) -> String {
        format!("HAVING {}", self.expression.render())
    }

    fn is_aggregate(&self) -> bool {
        self.expression.is_aggregate()
    }
}

#[derive(Clone, PartialEq)]
pub struct GroupByClause {
    pub items: Vec<ResolvedExpr>,
}

impl SqlNode for GroupByClause {
    fn render(&self) -> String {
        format!("GROUP BY {}", render_list(&self.items))
    }

    fn is_aggregate(&self) -> bool {
        self.items.iter().any(SqlNode::is_aggregate)
    }
}

#[derive(Clone, PartialEq)]
pub struct OrderByItem {
    pub operand: ResolvedExpr,
    pub direction: Direction,
}

impl SqlNode for OrderByItem {
    fn render(&self) -> String {
        format!("{} {}", self.operand.render(), self.direction)
    }

    fn is_aggregate(&self) -> bool {
        self.operand.is_aggregate()
    }
}

#[derive(Clone, PartialEq)]
pub struct OrderByClause {
    pub items: Vec<OrderByItem>,
}

impl SqlNode for OrderByClause {
    fn render(&self) -> String {
        format!("ORDER BY {}", render_list(&self.items))
    }

    fn is_aggregate(&self) -> bool {
        self.items.iter().any(SqlNode::is_aggregate)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LimitClause {
    pub limit: u64,
    pub offset: u64,
}

impl From<LimitInput> for LimitClause {
    fn from(input: LimitInput) -> Self {
        Self { limit: input.limit, offset: input.offset }
    }
}

impl SqlNode for LimitClause {
    fn render(&self) -> String {
        format!("LIMIT {} OFFSET {}", self.limit, self.offset)
    }

    fn is_aggregate(&self) -> bool {
        false
    }
}

macro_rules! debug_via_render {
    ($($ty:ident),+) => {
        $(
            impl fmt::Debug for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}({})", stringify!($ty), self.render())
                }
            }
        )+
    };
}

debug_via_render!(
    ResolvedSource, ResolvedSelectItem, JoinClause, SelectClause, WhereClause,
    HavingClause, GroupByClause, OrderByItem, OrderByClause, LimitClause
);

impl fmt::Debug for SelectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectList::All => write!(f, "SelectList(*)"),
            SelectList::Items(items) => f.debug_tuple("SelectList").field(items).finish(),
        }
    }
}
