//! Query execution: locate the FROM subtree, collect and filter SELECT
//! candidates, order them and apply LIMIT.

use log::debug;
use roxmltree::{Document, Node};

use crate::{
    ast::{OrderBy, Query, Source},
    evaluator::{EvalError, Evaluator},
    locator,
    value::Value,
};

/// A selected element together with its 1-based ORDER BY rank, if the query
/// was ordered. The element is borrowed from the caller's document.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a, 'input> {
    pub node: Node<'a, 'input>,
    pub rank: Option<usize>,
}

impl<'a, 'input> Match<'a, 'input> {
    fn unranked(node: Node<'a, 'input>) -> Self {
        Match { node, rank: None }
    }
}

/// Runs `query` against `document`.
///
/// # Examples
///
/// ```
/// use xqr::{engine, parser::parse_query};
///
/// let doc = roxmltree::Document::parse("<r><a>1</a><a>5</a></r>").unwrap();
/// let query = parse_query("SELECT a FROM ROOT WHERE a > 2").unwrap();
///
/// let matches = engine::run(&query, &doc).unwrap();
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].node.text(), Some("5"));
/// ```
pub fn run<'a, 'input>(
    query: &Query,
    document: &'a Document<'input>,
) -> Result<Vec<Match<'a, 'input>>, EvalError> {
    let Some(subtree) = locate_subtree(query, document) else {
        debug!("FROM matched nothing, result is empty");
        return Ok(Vec::new());
    };

    let mut matches = collect(query, document, subtree)?;
    debug!("{} element(s) matched SELECT and WHERE", matches.len());

    if let Some(order) = &query.order {
        matches = order_by(matches, order)?;
    }

    if let Some(limit) = query.limit {
        matches.truncate(limit);
    }

    Ok(matches)
}

/// Element under which SELECT searches.
///
/// A FROM reference naming the document element's tag selects the document
/// element, whether or not it has the referenced attribute. Any other
/// reference, nameless ones included, selects the first matching descendant.
fn locate_subtree<'a, 'input>(
    query: &Query,
    document: &'a Document<'input>,
) -> Option<Node<'a, 'input>> {
    let root = document.root_element();
    match query.from.as_ref()? {
        Source::Root => Some(root),
        Source::Element(element) if element.name.as_deref() == Some(root.tag_name().name()) => {
            Some(root)
        }
        Source::Element(element) => locator::find_descendant(root, element),
    }
}

fn collect<'a, 'input>(
    query: &Query,
    document: &'a Document<'input>,
    subtree: Node<'a, 'input>,
) -> Result<Vec<Match<'a, 'input>>, EvalError> {
    let evaluator = Evaluator::new();
    let accept = |node: Node<'a, 'input>| match &query.condition {
        Some(condition) => evaluator.matches(condition, node),
        None => Ok(true),
    };

    let mut matches = Vec::new();

    // Only FROM ROOT may select the document element itself
    let root = document.root_element();
    if matches!(query.from, Some(Source::Root))
        && root.tag_name().name() == query.select
        && accept(root)?
    {
        matches.push(Match::unranked(root));
    }

    for node in subtree.descendants().skip(1) {
        if node.is_element() && node.tag_name().name() == query.select && accept(node)? {
            matches.push(Match::unranked(node));
        }
    }

    Ok(matches)
}

fn sort_key(node: Node<'_, '_>, order: &OrderBy) -> Result<Value, EvalError> {
    locator::resolve(node, &order.element)?
        .map(|text| Value::parse(&text))
        .ok_or_else(|| EvalError::SortKeyNotFound(order.element.to_string()))
}

/// Orders `matches` by their ORDER BY keys and assigns ranks.
///
/// Each element is inserted right before the first already placed key it is
/// strictly greater than, which yields a descending sequence where equal
/// keys keep their document order. Ascending output is that sequence
/// reversed. Numbers sort below strings.
fn order_by<'a, 'input>(
    matches: Vec<Match<'a, 'input>>,
    order: &OrderBy,
) -> Result<Vec<Match<'a, 'input>>, EvalError> {
    let mut sorted: Vec<(Value, Node<'a, 'input>)> = Vec::with_capacity(matches.len());

    for m in matches {
        let key = sort_key(m.node, order)?;
        let position = sorted
            .iter()
            .position(|(placed, _)| key > *placed)
            .unwrap_or(sorted.len());
        sorted.insert(position, (key, m.node));
    }

    if !order.descending {
        sorted.reverse();
    }

    Ok(sorted
        .into_iter()
        .enumerate()
        .map(|(index, (_, node))| Match {
            node,
            rank: Some(index + 1),
        })
        .collect())
}
