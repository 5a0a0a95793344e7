use crate::{
    ast::{CompareOp, ElementRef},
    value::Value,
};

/// A single comparison: `element op literal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub element: ElementRef,
    pub op: CompareOp,
    pub literal: Value,
    pub negated: bool,
}

/// A node of a parsed WHERE clause.
///
/// Every variant carries its own negation flag, so `NOT` can apply to a
/// comparison, a parenthesized group, or a whole conjunction. `And` and
/// `Or` always hold at least two children and `Group` exactly one.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Leaf comparison
    Leaf(Comparison),

    /// All children must hold
    And { children: Vec<Condition>, negated: bool },

    /// At least one child must hold
    Or { children: Vec<Condition>, negated: bool },

    /// Parenthesized sub-expression
    Group { child: Box<Condition>, negated: bool },
}

impl Condition {
    pub fn is_negated(&self) -> bool {
        match self {
            Condition::Leaf(leaf) => leaf.negated,
            Condition::And { negated, .. }
            | Condition::Or { negated, .. }
            | Condition::Group { negated, .. } => *negated,
        }
    }
}
