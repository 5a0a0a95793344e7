use std::fmt;

/// Relational operators of a WHERE comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`=`)
    Equal,
    /// Greater than (`>`)
    Greater,
    /// Less than (`<`)
    Less,
    /// Substring test (`CONTAINS`), strings only
    Contains,
}

impl CompareOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "=" => Some(CompareOp::Equal),
            ">" => Some(CompareOp::Greater),
            "<" => Some(CompareOp::Less),
            "CONTAINS" => Some(CompareOp::Contains),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Equal => "=",
            CompareOp::Greater => ">",
            CompareOp::Less => "<",
            CompareOp::Contains => "CONTAINS",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
