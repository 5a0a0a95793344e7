use std::fmt;

use log::trace;
use roxmltree::Node;

use crate::{
    ast::{Comparison, Condition},
    locator,
    value::Value,
};

/// Errors caused by the shape of the document rather than the query.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Element has subelements where text content was expected
    NotText { element: String },

    /// ORDER BY reference matched nothing inside a result element
    SortKeyNotFound(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::NotText { element } => {
                write!(f, "element <{}> contains subelements instead of text", element)
            }
            EvalError::SortKeyNotFound(reference) => {
                write!(f, "sort key '{}' not found", reference)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Evaluates WHERE conditions against document elements.
#[derive(Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Does `node` satisfy `condition`?
    ///
    /// A comparison whose reference matches nothing is false, not an error.
    /// Numbers only compare with numbers and strings with strings; any other
    /// pairing is false whatever the operator.
    ///
    /// # Examples
    ///
    /// ```
    /// use xqr::{Evaluator, parser::parse_query};
    ///
    /// let doc = roxmltree::Document::parse("<book><price>12</price></book>").unwrap();
    /// let query = parse_query("SELECT book FROM ROOT WHERE price < 20").unwrap();
    ///
    /// let evaluator = Evaluator::new();
    /// let condition = query.condition.as_ref().unwrap();
    /// assert!(evaluator.matches(condition, doc.root_element()).unwrap());
    /// ```
    pub fn matches(&self, condition: &Condition, node: Node<'_, '_>) -> Result<bool, EvalError> {
        let holds = match condition {
            Condition::Leaf(comparison) => self.compare(comparison, node)?,
            Condition::And { children, .. } => {
                let mut all = true;
                for child in children {
                    if !self.matches(child, node)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            Condition::Or { children, .. } => {
                let mut any = false;
                for child in children {
                    if self.matches(child, node)? {
                        any = true;
                        break;
                    }
                }
                any
            }
            Condition::Group { child, .. } => self.matches(child, node)?,
        };

        Ok(holds != condition.is_negated())
    }

    fn compare(&self, comparison: &Comparison, node: Node<'_, '_>) -> Result<bool, EvalError> {
        let Some(found) = locator::resolve(node, &comparison.element)? else {
            trace!("<{}>: {} not found", node.tag_name().name(), comparison.element);
            return Ok(false);
        };

        let value = Value::parse(&found);
        let result = value.compare(comparison.op, &comparison.literal);
        trace!(
            "<{}>: {} {} {} -> {}",
            node.tag_name().name(),
            value,
            comparison.op,
            comparison.literal,
            result
        );
        Ok(result)
    }
}
