//! Self-then-descendant lookup of element references.
//!
//! A reference is resolved against a context element in two steps: first the
//! context element itself is tried, then its descendants in document order.
//! The first element that fits wins.

use roxmltree::Node;

use crate::{ast::ElementRef, evaluator::EvalError};

/// Does `node` carry everything `element` asks for?
pub fn matches<'a, 'input>(node: Node<'a, 'input>, element: &ElementRef) -> bool {
    node.is_element()
        && element.matches_name(node.tag_name().name())
        && element
            .attribute
            .as_deref()
            .is_none_or(|attr| node.has_attribute(attr))
}

/// First proper descendant of `node`, in document order, matching `element`.
pub fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    element: &ElementRef,
) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| matches(*n, element))
}

/// The element `element` refers to, as seen from `node`.
///
/// `node` itself is used when its tag equals the referenced name (and it has
/// the attribute, if one is asked for), or when the reference has no name
/// and `node` has the attribute. Otherwise the first matching descendant.
pub fn find<'a, 'input>(node: Node<'a, 'input>, element: &ElementRef) -> Option<Node<'a, 'input>> {
    if matches(node, element) {
        return Some(node);
    }
    find_descendant(node, element)
}

/// Text of an element that must not contain subelements.
pub fn text_of(node: Node<'_, '_>) -> Result<String, EvalError> {
    if node.children().any(|child| child.is_element()) {
        return Err(EvalError::NotText {
            element: node.tag_name().name().to_string(),
        });
    }

    Ok(node
        .children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect())
}

/// Resolves `element` to a scalar: the attribute value if an attribute is
/// referenced, otherwise the element's text.
///
/// `Ok(None)` means nothing matched.
pub fn resolve(node: Node<'_, '_>, element: &ElementRef) -> Result<Option<String>, EvalError> {
    let Some(target) = find(node, element) else {
        return Ok(None);
    };

    match element.attribute.as_deref() {
        Some(attr) => Ok(target.attribute(attr).map(str::to_string)),
        None => text_of(target).map(Some),
    }
}
