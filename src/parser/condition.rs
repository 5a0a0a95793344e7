//! WHERE clause parsing.
//!
//! The predicate tree is assembled one token at a time. Precedence is not
//! encoded in grammar rules: every `AND`/`OR` rewrites the tree built so far
//! so that conjunctions always end up below disjunctions. Nodes under
//! construction live in an arena and point at their parents by index; only
//! a finished tree is turned into [`Condition`].

use log::trace;

use super::{ParseError, Parser};
use crate::{
    ast::{CompareOp, Comparison, Condition},
    value::{Value, parse_number},
};

type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

#[derive(Debug)]
enum DraftKind {
    /// Operand slot waiting for a comparison or a `(`
    Empty,
    Leaf(Comparison),
    Group(NodeId),
    And(Vec<NodeId>),
    Or(Vec<NodeId>),
}

#[derive(Debug)]
struct Draft {
    kind: DraftKind,
    negated: bool,
    parent: Option<NodeId>,
}

/// Arena of partially built condition nodes plus the slot being filled.
///
/// Invariants: only `current` may be `Empty`, and every `Group` on the
/// path from `current` to the root is still open.
struct ConditionBuilder {
    nodes: Vec<Draft>,
    root: NodeId,
    current: NodeId,
    open_groups: usize,
}

impl ConditionBuilder {
    fn new() -> Self {
        ConditionBuilder {
            nodes: vec![Draft {
                kind: DraftKind::Empty,
                negated: false,
                parent: None,
            }],
            root: 0,
            current: 0,
            open_groups: 0,
        }
    }

    fn push(&mut self, kind: DraftKind, parent: Option<NodeId>) -> NodeId {
        self.nodes.push(Draft {
            kind,
            negated: false,
            parent,
        });
        self.nodes.len() - 1
    }

    fn current_is_empty(&self) -> bool {
        matches!(self.nodes[self.current].kind, DraftKind::Empty)
    }

    fn require_empty(&self, token: &str) -> Result<(), ParseError> {
        if self.current_is_empty() {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken(token.to_string()))
        }
    }

    fn require_filled(&self, token: &str) -> Result<(), ParseError> {
        if self.current_is_empty() {
            Err(ParseError::UnexpectedToken(token.to_string()))
        } else {
            Ok(())
        }
    }

    fn connective_of(&self, id: NodeId) -> Option<Connective> {
        match self.nodes[id].kind {
            DraftKind::And(_) => Some(Connective::And),
            DraftKind::Or(_) => Some(Connective::Or),
            _ => None,
        }
    }

    /// Parent of `id` when that parent is an `And`/`Or`. Groups and the tree
    /// root both start a new precedence scope and yield `None`.
    fn enclosing_connective(&self, id: NodeId) -> Option<(NodeId, Connective)> {
        let parent = self.nodes[id].parent?;
        self.connective_of(parent).map(|c| (parent, c))
    }

    fn open_group(&mut self) -> Result<(), ParseError> {
        self.require_empty("(")?;
        let child = self.push(DraftKind::Empty, Some(self.current));
        self.nodes[self.current].kind = DraftKind::Group(child);
        self.current = child;
        self.open_groups += 1;
        Ok(())
    }

    fn close_group(&mut self) -> Result<(), ParseError> {
        self.require_filled(")")?;

        let mut id = self.current;
        loop {
            let parent = self.nodes[id]
                .parent
                .ok_or(ParseError::UnbalancedBrackets)?;
            if matches!(self.nodes[parent].kind, DraftKind::Group(_)) {
                self.current = parent;
                self.open_groups -= 1;
                return Ok(());
            }
            id = parent;
        }
    }

    fn negate(&mut self) -> Result<(), ParseError> {
        self.require_empty("NOT")?;
        let node = &mut self.nodes[self.current];
        node.negated = !node.negated;
        Ok(())
    }

    fn fill(&mut self, mut comparison: Comparison) {
        let node = &mut self.nodes[self.current];
        comparison.negated = node.negated;
        node.kind = DraftKind::Leaf(comparison);
    }

    /// Handles `AND`/`OR` after a complete operand and moves to the slot for
    /// the next operand.
    fn connect(&mut self, connective: Connective, token: &str) -> Result<(), ParseError> {
        self.require_filled(token)?;
        let current = self.current;

        self.current = match self.enclosing_connective(current) {
            // Top of a scope: the operand becomes the first child of a new node
            None => self.wrap(current, connective),
            Some((parent, c)) if c == connective => self.append_child(parent),
            // AND under OR: the last disjunct becomes a conjunction
            Some((_, Connective::Or)) => self.wrap(current, Connective::And),
            // OR under AND: the conjunction is complete, continue one level up
            Some((parent, Connective::And)) => match self.enclosing_connective(parent) {
                Some((grandparent, Connective::Or)) => self.append_child(grandparent),
                _ => self.wrap(parent, Connective::Or),
            },
        };

        trace!("{} -> slot {}", token, self.current);
        Ok(())
    }

    /// Replaces `target` with a new `connective` node holding `target` and a
    /// fresh empty slot, returning the slot.
    fn wrap(&mut self, target: NodeId, connective: Connective) -> NodeId {
        let parent = self.nodes[target].parent;
        let wrapper = self.push(DraftKind::Empty, parent);
        let slot = self.push(DraftKind::Empty, Some(wrapper));

        let children = vec![target, slot];
        self.nodes[wrapper].kind = match connective {
            Connective::And => DraftKind::And(children),
            Connective::Or => DraftKind::Or(children),
        };
        self.nodes[target].parent = Some(wrapper);

        match parent {
            None => self.root = wrapper,
            Some(parent) => self.replace_child(parent, target, wrapper),
        }
        slot
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        match &mut self.nodes[parent].kind {
            DraftKind::Group(child) => {
                if *child == old {
                    *child = new;
                }
            }
            DraftKind::And(children) | DraftKind::Or(children) => {
                for child in children.iter_mut().filter(|c| **c == old) {
                    *child = new;
                }
            }
            DraftKind::Empty | DraftKind::Leaf(_) => {}
        }
    }

    fn append_child(&mut self, parent: NodeId) -> NodeId {
        let slot = self.push(DraftKind::Empty, Some(parent));
        if let DraftKind::And(children) | DraftKind::Or(children) = &mut self.nodes[parent].kind
        {
            children.push(slot);
        }
        slot
    }

    fn finish(self) -> Result<Condition, ParseError> {
        if self.open_groups != 0 {
            return Err(ParseError::UnbalancedBrackets);
        }
        if self.current_is_empty() {
            return Err(ParseError::IncompleteCondition);
        }
        self.build(self.root)
    }

    fn build(&self, id: NodeId) -> Result<Condition, ParseError> {
        let node = &self.nodes[id];
        let negated = node.negated;
        let build_all = |children: &[NodeId]| {
            children
                .iter()
                .map(|&child| self.build(child))
                .collect::<Result<Vec<_>, _>>()
        };

        match &node.kind {
            DraftKind::Empty => Err(ParseError::IncompleteCondition),
            DraftKind::Leaf(comparison) => Ok(Condition::Leaf(comparison.clone())),
            DraftKind::Group(child) => Ok(Condition::Group {
                child: Box::new(self.build(*child)?),
                negated,
            }),
            DraftKind::And(children) => Ok(Condition::And {
                children: build_all(children)?,
                negated,
            }),
            DraftKind::Or(children) => Ok(Condition::Or {
                children: build_all(children)?,
                negated,
            }),
        }
    }
}

impl Parser<'_> {
    /// Parses the WHERE clause up to `ORDER BY` or the end of the query.
    pub(super) fn parse_where(&mut self) -> Result<Condition, ParseError> {
        let mut builder = ConditionBuilder::new();

        while let Some(token) = self.peek() {
            if self.at_order_by()? {
                break;
            }

            match token {
                "(" => builder.open_group()?,
                ")" => builder.close_group()?,
                "NOT" => builder.negate()?,
                "AND" => builder.connect(Connective::And, token)?,
                "OR" => builder.connect(Connective::Or, token)?,
                _ => {
                    builder.require_empty(token)?;
                    let comparison = self.parse_comparison()?;
                    builder.fill(comparison);
                    continue;
                }
            }
            self.advance();
        }

        builder.finish()
    }

    fn parse_comparison(&mut self) -> Result<Comparison, ParseError> {
        let element = Self::element_ref(self.current()?, "WHERE")?;
        self.advance();

        let token = self.peek().ok_or(ParseError::Expected {
            expected: "relational operator",
            found: "end of query".to_string(),
        })?;
        let op = CompareOp::from_token(token).ok_or_else(|| ParseError::Expected {
            expected: "relational operator",
            found: token.to_string(),
        })?;
        self.advance();

        let literal = self.parse_literal(op)?;
        Ok(Comparison {
            element,
            op,
            literal,
            negated: false,
        })
    }

    /// Numbers are single tokens; strings start with `"` and may span
    /// several whitespace separated tokens, re-joined with single spaces.
    fn parse_literal(&mut self, op: CompareOp) -> Result<Value, ParseError> {
        let token = self.peek().ok_or(ParseError::Expected {
            expected: "literal",
            found: "end of query".to_string(),
        })?;

        if let Some(number) = parse_number(token) {
            if op == CompareOp::Contains {
                return Err(ParseError::NumericContains(token.to_string()));
            }
            self.advance();
            return Ok(Value::Number(number));
        }

        let first = token
            .strip_prefix('"')
            .ok_or_else(|| ParseError::InvalidLiteral(token.to_string()))?;
        self.advance();

        // A lone `"` both opens and closes the string
        if token == "\"" {
            return Ok(Value::String(String::new()));
        }
        if let Some(text) = first.strip_suffix('"') {
            return Ok(Value::String(text.to_string()));
        }

        let mut words = vec![first];
        loop {
            let word = self.peek().ok_or(ParseError::UnterminatedString)?;
            self.advance();
            if let Some(last) = word.strip_suffix('"') {
                words.push(last);
                break;
            }
            words.push(word);
        }

        Ok(Value::String(words.join(" ")))
    }
}
