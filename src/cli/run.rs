//! Execute xqr queries against XML input

use log::debug;
use roxmltree::{Document, ParsingOptions};

use super::CliError;
use crate::{Lexer, OutputOptions, Parser, engine, output::to_xml};

/// Options for a query run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The query text
    pub query: String,
    /// XML input
    pub input: Option<String>,
    /// How results are wrapped
    pub output: OutputOptions,
}

/// Parses XML text, accepting a DOCTYPE.
pub fn read_document(text: &str) -> Result<Document<'_>, CliError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// Parse the query, run it against the input and render the result document.
///
/// The query is parsed before the input is looked at, so a malformed query
/// is reported even when the document is malformed too.
pub fn execute(options: &RunOptions) -> Result<String, CliError> {
    let query = Parser::new(Lexer::new(&options.query)).parse_query()?;

    let text = options.input.as_deref().ok_or(CliError::NoInput)?;
    let document = read_document(text)?;
    debug!(
        "document root <{}>",
        document.root_element().tag_name().name()
    );

    let matches = engine::run(&query, &document)?;
    Ok(to_xml(&matches, &options.output))
}
