use std::fmt;

use serde::{Deserialize, Deserializer, de::Error as _};

use crate::database::Lookup;

/// Reference to an alias, by `alias_id` or by `alias_name` (exactly one).
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawAliasRef")]
pub struct AliasRef {
    pub lookup: Lookup,
}

/// Reference to a stored query, by `query_id` or by `query_name` (exactly one).
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawQueryRef")]
pub struct QueryRef {
    pub lookup: Lookup,
}

#[derive(Deserialize)]
struct RawAliasRef {
    alias_id: Option<u64>,
    alias_name: Option<String>,
}

#[derive(Deserialize)]
struct RawQueryRef {
    query_id: Option<u64>,
    query_name: Option<String>,
}

fn exactly_one(id: Option<u64>, name: Option<String>, id_field: &str, name_field: &str) -> Result<Lookup, String> {
    match (id, name) {
        (Some(id), None) => Ok(Lookup::Id(id)),
        (None, Some(name)) => Ok(Lookup::Name(name)),
        (Some(_), Some(_)) => Err(format!("only one of `{}` and `{}` may be set", id_field, name_field)),
        (None, None) => Err(format!("one of `{}` or `{}` is required", id_field, name_field)),
    }
}

impl TryFrom<RawAliasRef> for AliasRef {
    type Error = String;

    fn try_from(raw: RawAliasRef) -> Result<Self, Self::Error> {
        exactly_one(raw.alias_id, raw.alias_name, "alias_id", "alias_name").map(|lookup| AliasRef { lookup })
    }
}

impl TryFrom<RawQueryRef> for QueryRef {
    type Error = String;

    fn try_from(raw: RawQueryRef) -> Result<Self, Self::Error> {
        exactly_one(raw.query_id, raw.query_name, "query_id", "query_name").map(|lookup| QueryRef { lookup })
    }
}

impl AliasRef {
    pub fn id(id: u64) -> Self {
        Self { lookup: Lookup::Id(id) }
    }

    pub fn name(name: &str) -> Self {
        Self { lookup: Lookup::Name(name.to_string()) }
    }
}

impl QueryRef {
    pub fn id(id: u64) -> Self {
        Self { lookup: Lookup::Id(id) }
    }

    pub fn name(name: &str) -> Self {
        Self { lookup: Lookup::Name(name.to_string()) }
    }
}

impl fmt::Debug for AliasRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AliasRef({})", self.lookup)
    }
}

impl fmt::Debug for QueryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryRef({})", self.lookup)
    }
}

/// Deserialize a list that must carry at least one item.
pub fn non_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Vec::<T>::deserialize(deserializer)?;
    if items.is_empty() {
        return Err(D::Error::invalid_length(0, &"at least one item"));
    }
    Ok(items)
}
