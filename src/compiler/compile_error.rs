use thiserror::Error;

use crate::{compiler::ClauseKind, database::{EntityKind, Lookup, StoreError}};

pub type Result<T, E = CompileError> = std::result::Result<T, E>;

/// Every way a compilation (or a catalog operation built on it) can fail.
///
/// Messages never mention data that belongs to another owner: a foreign entity and a
/// missing one both surface as `ReferenceNotFound`.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("{kind} with {lookup} does not exist")]
    ReferenceNotFound { kind: EntityKind, lookup: Lookup },

    #[error("value '{used}' is not allowed for {category}; allowed: {}", .allowed.join(", "))]
    InvalidEnumValue { category: &'static str, used: String, allowed: Vec<&'static str> },

    #[error("wrong operand kind: {0}")]
    WrongOperandKind(String),

    #[error("aggregate functions are not allowed in {clause}")]
    ImproperAggregatePlacement { clause: ClauseKind },

    #[error("query '{name}' cannot be used as a scalar: {reason}")]
    SubqueryNotScalarizable { name: String, reason: String },

    #[error("query '{name}' returns {column_count} columns, IN requires exactly one")]
    SubqueryColumnArityError { name: String, column_count: i64 },

    #[error("alias target {0} does not exist")]
    AliasTargetMissing(String),

    #[error("alias target {0} belongs to the reserved system namespace")]
    ReservedTarget(String),

    #[error("invalid name '{0}'")]
    InvalidName(String),

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CompileError {
    pub fn not_found(kind: EntityKind, lookup: &Lookup) -> Self {
        CompileError::ReferenceNotFound { kind, lookup: lookup.clone() }
    }

    pub fn err<T>(self) -> Result<T> {
        Err(self)
    }
}
