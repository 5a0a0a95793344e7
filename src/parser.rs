mod condition;

use std::fmt;

use log::debug;

use crate::{
    ast::{ElementRef, OrderBy, Query, Source, is_identifier},
    lexer::{Lexer, Token},
};

/// Errors reported for malformed query text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A keyword or clause part was expected but something else was found
    Expected { expected: &'static str, found: String },

    /// Invalid element name
    InvalidIdentifier(String),

    /// Token does not have the shape of a `name[.attribute]` reference
    InvalidElement { token: String, clause: &'static str },

    /// LIMIT not followed by an integer
    InvalidLimit(String),

    /// Token not allowed at this point of a WHERE clause
    UnexpectedToken(String),

    /// Number used as a CONTAINS operand
    NumericContains(String),

    /// Literal is neither a number nor a quoted string
    InvalidLiteral(String),

    /// Quoted literal without a closing quote
    UnterminatedString,

    /// Unclosed `(` or `)` without a matching `(`
    UnbalancedBrackets,

    /// WHERE clause ending where an operand was expected
    IncompleteCondition,

    /// Query text ended in the middle of a clause
    Incomplete,

    /// Tokens left over after a complete query
    TrailingInput(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Expected { expected, found } => {
                write!(f, "expected {}, found '{}'", expected, found)
            }
            ParseError::InvalidIdentifier(name) => {
                write!(f, "'{}' is not a valid element name", name)
            }
            ParseError::InvalidElement { token, clause } => {
                write!(f, "'{}' is not a valid element reference in {}", token, clause)
            }
            ParseError::InvalidLimit(token) => {
                write!(f, "expected an integer after LIMIT, found '{}'", token)
            }
            ParseError::UnexpectedToken(token) => {
                write!(f, "unexpected '{}' in WHERE clause", token)
            }
            ParseError::NumericContains(token) => {
                write!(f, "CONTAINS requires a string literal, found number {}", token)
            }
            ParseError::InvalidLiteral(token) => {
                write!(f, "'{}' is neither a number nor a quoted string", token)
            }
            ParseError::UnterminatedString => write!(f, "unterminated string literal"),
            ParseError::UnbalancedBrackets => write!(f, "unbalanced brackets in WHERE clause"),
            ParseError::IncompleteCondition => write!(f, "WHERE clause is incomplete"),
            ParseError::Incomplete => write!(f, "query does not contain all required parts"),
            ParseError::TrailingInput(token) => {
                write!(f, "unexpected '{}' after the end of the query", token)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Clause the parser is about to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Begin,
    Limit,
    From,
    Where,
    Order,
    Done,
}

pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Parser {
            tokens: lexer.tokenize(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'a>> {
        self.tokens.get(self.position + offset).copied()
    }

    /// The current token; running out of tokens here means the query stopped
    /// in the middle of a clause.
    fn current(&self) -> Result<Token<'a>, ParseError> {
        self.peek().ok_or(ParseError::Incomplete)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Is the next clause `ORDER BY`? An `ORDER` ending the query cannot be
    /// told apart from a truncated `ORDER BY`, so it is reported as incomplete.
    fn at_order_by(&self) -> Result<bool, ParseError> {
        match (self.peek(), self.peek_at(1)) {
            (Some("ORDER"), None) => Err(ParseError::Incomplete),
            (Some("ORDER"), Some("BY")) => Ok(true),
            _ => Ok(false),
        }
    }

    fn expect(&mut self, keyword: &'static str) -> Result<(), ParseError> {
        let token = self.current()?;
        if token != keyword {
            return Err(ParseError::Expected {
                expected: keyword,
                found: token.to_string(),
            });
        }
        self.advance();
        Ok(())
    }

    fn element_ref(token: &str, clause: &'static str) -> Result<ElementRef, ParseError> {
        ElementRef::parse(token)?.ok_or_else(|| ParseError::InvalidElement {
            token: token.to_string(),
            clause,
        })
    }

    /// Parse a complete query
    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        let mut query = Query {
            select: String::new(),
            limit: None,
            from: None,
            condition: None,
            order: None,
        };

        let mut state = State::Begin;
        while state != State::Done {
            state = match state {
                State::Begin => {
                    self.expect("SELECT")?;
                    let name = self.current()?;
                    if !is_identifier(name) {
                        return Err(ParseError::InvalidIdentifier(name.to_string()));
                    }
                    query.select = name.to_string();
                    self.advance();
                    State::Limit
                }
                State::Limit => {
                    if self.current()? == "LIMIT" {
                        self.advance();
                        query.limit = Some(self.parse_limit()?);
                    }
                    State::From
                }
                State::From => {
                    self.expect("FROM")?;
                    query.from = self.parse_source()?;
                    if self.is_exhausted() {
                        State::Done
                    } else {
                        State::Where
                    }
                }
                State::Where => {
                    if self.current()? == "WHERE" {
                        self.advance();
                        query.condition = Some(self.parse_where()?);
                    }
                    if self.is_exhausted() {
                        State::Done
                    } else {
                        State::Order
                    }
                }
                State::Order => {
                    if self.at_order_by()? {
                        self.advance();
                        self.advance();
                        query.order = Some(self.parse_order_by()?);
                    }
                    if let Some(token) = self.peek() {
                        return Err(ParseError::TrailingInput(token.to_string()));
                    }
                    State::Done
                }
                State::Done => State::Done,
            };
        }

        debug!("parsed query: {:?}", query);
        Ok(query)
    }

    fn parse_limit(&mut self) -> Result<usize, ParseError> {
        let token = self.current()?;
        let (negative, digits) = match token.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, token.strip_prefix('+').unwrap_or(token)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidLimit(token.to_string()));
        }
        self.advance();

        // Negative limits select nothing; limits beyond usize are unbounded
        Ok(if negative {
            0
        } else {
            digits.parse().unwrap_or(usize::MAX)
        })
    }

    fn parse_source(&mut self) -> Result<Option<Source>, ParseError> {
        if self.at_order_by()? {
            return Ok(None);
        }

        match self.peek() {
            None | Some("WHERE") => Ok(None),
            Some("ROOT") => {
                self.advance();
                Ok(Some(Source::Root))
            }
            Some(token) => {
                let element = Self::element_ref(token, "FROM")?;
                self.advance();
                Ok(Some(Source::Element(element)))
            }
        }
    }

    fn parse_order_by(&mut self) -> Result<OrderBy, ParseError> {
        let element = Self::element_ref(self.current()?, "ORDER BY")?;
        self.advance();

        let descending = match self.current()? {
            "ASC" => false,
            "DESC" => true,
            other => {
                return Err(ParseError::Expected {
                    expected: "ASC or DESC",
                    found: other.to_string(),
                });
            }
        };
        self.advance();

        Ok(OrderBy { element, descending })
    }
}

/// Parses query text into a [`Query`].
///
/// # Examples
///
/// ```
/// use xqr::parser::parse_query;
///
/// let query = parse_query("SELECT book LIMIT 3 FROM ROOT").unwrap();
/// assert_eq!(query.select, "book");
/// assert_eq!(query.limit, Some(3));
/// ```
pub fn parse_query(text: &str) -> Result<Query, ParseError> {
    Parser::new(Lexer::new(text)).parse_query()
}
