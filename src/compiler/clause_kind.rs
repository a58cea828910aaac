use std::fmt;

use serde::Serialize;

/// Clause positions a resolved expression can end up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClauseKind {
    Select,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
}

impl ClauseKind {
    /// Whether aggregate functions may appear in this clause.
    pub fn allows_aggregates(&self) -> bool {
        match self {
            ClauseKind::Select | ClauseKind::Having | ClauseKind::OrderBy => true,
            ClauseKind::Join | ClauseKind::Where | ClauseKind::GroupBy => false,
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClauseKind::Select => "SELECT",
            ClauseKind::Join => "JOIN",
            ClauseKind::Where => "WHERE",
            ClauseKind::GroupBy => "GROUP BY",
            ClauseKind::Having => "HAVING",
            ClauseKind::OrderBy => "ORDER BY",
        };
        f.write_str(name)
    }
}
