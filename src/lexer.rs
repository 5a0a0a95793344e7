/// A token is a borrowed slice of the query text.
pub type Token<'a> = &'a str;

/// Splits query text on whitespace and on the relational/grouping
/// characters `>`, `<`, `=`, `(` and `)`, which become tokens of their own.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

fn is_operator(ch: char) -> bool {
    matches!(ch, '>' | '<' | '=' | '(' | ')')
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.position += rest.len() - trimmed.len();
    }

    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();

        let rest = self.rest();
        let ch = rest.chars().next()?;

        let end = if is_operator(ch) {
            ch.len_utf8()
        } else {
            rest.find(|c: char| c.is_whitespace() || is_operator(c))
                .unwrap_or(rest.len())
        };

        self.position += end;
        Some(&rest[..end])
    }

    /// Consumes the lexer, collecting every remaining token in order.
    pub fn tokenize(self) -> Vec<Token<'a>> {
        self.collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("SELECT book FROM ROOT");
    assert_eq!(lexer.next_token(), Some("SELECT"));
    assert_eq!(lexer.next_token(), Some("book"));
    assert_eq!(lexer.next_token(), Some("FROM"));
    assert_eq!(lexer.next_token(), Some("ROOT"));
    assert_eq!(lexer.next_token(), None);
}

#[test]
fn test_operators_split_words() {
    let mut lexer = Lexer::new("(price>10)");
    assert_eq!(lexer.next_token(), Some("("));
    assert_eq!(lexer.next_token(), Some("price"));
    assert_eq!(lexer.next_token(), Some(">"));
    assert_eq!(lexer.next_token(), Some("10"));
    assert_eq!(lexer.next_token(), Some(")"));
    assert_eq!(lexer.next_token(), None);
}
