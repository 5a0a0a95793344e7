use std::{fmt, sync::OnceLock};

use regex::Regex;

use crate::parser::ParseError;

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\A[A-Za-z_][A-Za-z_\-0-9]*\z").expect("identifier pattern is valid")
    })
}

/// Checks whether `name` is a valid element name.
pub fn is_identifier(name: &str) -> bool {
    identifier_pattern().is_match(name)
}

/// A `name[.attribute]` reference to an element, an attribute, or an
/// attribute of a named element.
///
/// # Forms
///
/// ```text
/// book          element <book>, its text
/// book.id       attribute id of element <book>
/// .id           attribute id of any element
/// ```
///
/// At least one of `name` and `attribute` is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub name: Option<String>,
    pub attribute: Option<String>,
}

impl ElementRef {
    /// Parses a single token as a reference.
    ///
    /// Returns `Ok(None)` when the token does not have the shape of a
    /// reference at all (empty, several dots, empty attribute), and an
    /// error when it does but the element name is not a valid identifier.
    pub fn parse(token: &str) -> Result<Option<ElementRef>, ParseError> {
        let mut parts = token.split('.');
        let head = parts.next().unwrap_or_default();
        let attribute = parts.next();
        if parts.next().is_some() {
            return Ok(None);
        }

        let (name, attribute) = match attribute {
            None if head.is_empty() => return Ok(None),
            None => (Some(head), None),
            Some("") => return Ok(None),
            Some(attr) => ((!head.is_empty()).then_some(head), Some(attr)),
        };

        if let Some(name) = name {
            if !is_identifier(name) {
                return Err(ParseError::InvalidIdentifier(name.to_string()));
            }
        }

        Ok(Some(ElementRef {
            name: name.map(str::to_string),
            attribute: attribute.map(str::to_string),
        }))
    }

    /// Does an element with tag `tag` satisfy the name part of this reference?
    pub fn matches_name(&self, tag: &str) -> bool {
        self.name.as_deref().is_none_or(|name| name == tag)
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}", name)?;
        }
        if let Some(attribute) = &self.attribute {
            write!(f, ".{}", attribute)?;
        }
        Ok(())
    }
}
