use std::fmt;

use crate::compiler::{CompileError, Result};

/// Closed vocabularies accepted by the compiler, matched case-insensitively.
pub trait Keyword: Sized + Copy + 'static {
    /// Used in `InvalidEnumValue` messages.
    const CATEGORY: &'static str;
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(Keyword::as_str).collect()
    }

    fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        Self::ALL.iter()
            .copied()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CompileError::InvalidEnumValue {
                category: Self::CATEGORY,
                used: value.to_string(),
                allowed: Self::allowed(),
            })
    }
}

macro_rules! keyword_enum {
    ($name:ident, $category:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Keyword for $name {
            const CATEGORY: &'static str = $category;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.as_str())
            }
        }
    };
}

keyword_enum!(FunctionName, "function", {
    Year => "YEAR",
    Month => "MONTH",
    Day => "DAY",
    Date => "DATE",
    Floor => "FLOOR",
    Round => "ROUND",
    Lower => "LOWER",
    Upper => "UPPER",
    Length => "LENGTH",
    Avg => "AVG",
    Sum => "SUM",
    Max => "MAX",
    Min => "MIN",
    Count => "COUNT",
});

impl FunctionName {
    pub fn is_aggregate(&self) -> bool {
        matches!(self, FunctionName::Avg | FunctionName::Sum | FunctionName::Max | FunctionName::Min | FunctionName::Count)
    }
}

keyword_enum!(ArithmeticOp, "arithmetic operator", {
    Add => "+",
    Sub => "-",
    Div => "/",
    Mul => "*",
    Mod => "%",
    IntDiv => "DIV",
});

keyword_enum!(CompareOp, "comparison operator", {
    Eq => "=",
    Gt => ">",
    Lt => "<",
    GtEq => ">=",
    LtEq => "<=",
    NotEq => "<>",
    Regexp => "REGEXP",
});

keyword_enum!(LogicalOp, "logical operator", {
    And => "AND",
    Or => "OR",
});

keyword_enum!(Direction, "direction", {
    Asc => "ASC",
    Desc => "DESC",
});

keyword_enum!(JoinType, "join type", {
    Inner => "INNER",
    Left => "LEFT",
    Right => "RIGHT",
    Full => "FULL",
});

keyword_enum!(DateUnit, "date unit", {
    Day => "DAY",
    Month => "MONTH",
    Year => "YEAR",
    Hour => "HOUR",
    Minute => "MINUTE",
    Second => "SECOND",
});
