use std::{fmt, sync::Arc};

use crate::{
    ast::{CompareOp, LogicalOp},
    database::{Alias, StoredQuery},
    resolved::{ResolvedExpr, SqlNode, render_list},
};

/// Truth-valued node whose references have been fetched and checked.
#[derive(Clone, PartialEq)]
pub enum ResolvedBool {
    Not(Box<ResolvedBool>),
    AndOr {
        left: Box<ResolvedBool>,
        op: LogicalOp,
        right: Box<ResolvedBool>,
    },
    Compare {
        left: ResolvedExpr,
        op: CompareOp,
        right: ResolvedExpr,
    },
    Between {
        expr: ResolvedExpr,
        lower: ResolvedExpr,
        upper: ResolvedExpr,
        negate: bool,
    },
    IsNull {
        expr: ResolvedExpr,
        negate: bool,
    },
    In {
        expr: ResolvedExpr,
        source: ResolvedInSource,
        negate: bool,
    },
    Exists {
        query: Arc<StoredQuery>,
        negate: bool,
    },
    Aliased(Arc<Alias>),
}

#[derive(Clone, PartialEq)]
pub enum ResolvedInSource {
    List(Vec<ResolvedExpr>),
    /// single-column stored query, embedded without LIMIT coercion
    Query(Arc<StoredQuery>),
}

fn not_prefix(negate: bool) -> &'static str {
    if negate { "NOT " } else { "" }
}

impl SqlNode for ResolvedBool {
    fn render(&self) -> String {
        match self {
            ResolvedBool::Not(operand) => format!("(NOT {})", operand.render()),
            ResolvedBool::AndOr { left, op, right } => format!("({} {} {})", left.render(), op, right.render()),
            ResolvedBool::Compare { left, op, right } => format!("({} {} {})", left.render(), op, right.render()),
            ResolvedBool::Between { expr, lower, upper, negate } => format!(
                "({} {}BETWEEN {} AND {})",
                expr.render(),
                not_prefix(*negate),
                lower.render(),
                upper.render()
            ),
            ResolvedBool::IsNull { expr, negate } => format!("({} IS {}NULL)", expr.render(), not_prefix(*negate)),
            ResolvedBool::In { expr, source, negate } => {
                format!("({} {}IN ({}))", expr.render(), not_prefix(*negate), source.render())
            }
            ResolvedBool::Exists { query, negate } => format!("({}EXISTS ({}))", not_prefix(*negate), query.body()),
            ResolvedBool::Aliased(alias) => alias.target.clone(),
        }
    }

    fn is_aggregate(&self) -> bool {
        match self {
            ResolvedBool::Not(operand) => operand.is_aggregate(),
            ResolvedBool::AndOr { left, right, .. } => left.is_aggregate() || right.is_aggregate(),
            ResolvedBool::Compare { left, right, .. } => left.is_aggregate() || right.is_aggregate(),
            ResolvedBool::Between { expr, lower, upper, .. } => {
                expr.is_aggregate() || lower.is_aggregate() || upper.is_aggregate()
            }
            ResolvedBool::IsNull { expr, .. } => expr.is_aggregate(),
            ResolvedBool::In { expr, source, .. } => expr.is_aggregate() || source.is_aggregate(),
            ResolvedBool::Exists { .. } => false,
            ResolvedBool::Aliased(alias) => alias.is_aggregate,
        }
    }
}

impl ResolvedBool {
    pub(crate) fn collect_columns<'a>(&'a self, out: &mut Vec<(&'a str, &'a str)>) {
        match self {
            ResolvedBool::Not(operand) => operand.collect_columns(out),
            ResolvedBool::AndOr { left, right, .. } => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
            ResolvedBool::Compare { left, right, .. } => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
            ResolvedBool::Between { expr, lower, upper, .. } => {
                expr.collect_columns(out);
                lower.collect_columns(out);
                upper.collect_columns(out);
            }
            ResolvedBool::IsNull { expr, .. } => expr.collect_columns(out),
            ResolvedBool::In { expr, source, .. } => {
                expr.collect_columns(out);
                if let ResolvedInSource::List(items) = source {
                    items.iter().for_each(|item| item.collect_columns(out));
                }
            }
            ResolvedBool::Exists { .. } | ResolvedBool::Aliased(_) => {}
        }
    }

    pub fn columns(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }
}

impl SqlNode for ResolvedInSource {
    fn render(&self) -> String {
        match self {
            ResolvedInSource::List(items) => render_list(items),
            ResolvedInSource::Query(query) => query.body().to_string(),
        }
    }

    fn is_aggregate(&self) -> bool {
        match self {
            ResolvedInSource::List(items) => items.iter().any(SqlNode::is_aggregate),
            ResolvedInSource::Query(_) => false,
        }
    }
}

impl fmt::Debug for ResolvedBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedBool::Aliased(alias) => write!(f, "Aliased({}: {})", alias.name, alias.target),
            _ => write!(f, "Bool({})", self.render()),
        }
    }
}

impl fmt::Debug for ResolvedInSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InSource({})", self.render())
    }
}
