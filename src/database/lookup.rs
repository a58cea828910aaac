use std::fmt;

use serde::{Deserialize, Serialize};

/// Owner identifier; every stored entity belongs to exactly one owner.
pub type OwnerId = u64;

/// The dimension a caller used to point at an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lookup {
    Id(u64),
    Name(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "id {}", id),
            Lookup::Name(name) => write!(f, "name '{}'", name),
        }
    }
}

/// The two kinds of owner-scoped entities the compiler resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Alias,
    Query,
}

impl EntityKind {
    /// Prefix used for every cache key of this kind.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            EntityKind::Alias => "alias",
            EntityKind::Query => "query",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_names_its_dimension() {
        assert_eq!(Lookup::Id(5).to_string(), "id 5");
        assert_eq!(Lookup::Name("total".into()).to_string(), "name 'total'");
    }
}
