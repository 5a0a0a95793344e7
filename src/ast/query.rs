use crate::ast::{Condition, ElementRef};

/// Where SELECT looks for its elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// `FROM ROOT`: the whole document, root element included
    Root,

    /// `FROM name[.attribute]`: the first matching element
    Element(ElementRef),
}

/// An `ORDER BY` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub element: ElementRef,
    pub descending: bool,
}

/// A complete parsed query.
///
/// ```text
/// SELECT <ident> [LIMIT <int>] FROM [<ref>|ROOT] [WHERE <cond>] [ORDER BY <ref> ASC|DESC]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Tag name of the selected elements
    pub select: String,

    /// Maximum number of results; negative limits are clamped to 0
    pub limit: Option<usize>,

    /// `None` when FROM names nothing; the result is then empty
    pub from: Option<Source>,

    /// WHERE clause
    pub condition: Option<Condition>,

    /// ORDER BY clause
    pub order: Option<OrderBy>,
}
