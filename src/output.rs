//! XML serialization of query results.
//!
//! Selected elements are written back verbatim: tag, attributes in document
//! order, text, comments and processing instructions. The only change is
//! the `order` attribute carrying the rank of each result of an ordered
//! query. It replaces an `order` attribute the element already has, and it
//! is also written on ranked results nested inside another result.
//!
//! # Examples
//!
//! ```
//! use xqr::{engine, parser::parse_query};
//! use xqr::output::{OutputOptions, to_xml};
//!
//! let doc = roxmltree::Document::parse("<r><a>1</a><a>5</a></r>").unwrap();
//! let query = parse_query("SELECT a FROM ROOT ORDER BY a DESC").unwrap();
//! let matches = engine::run(&query, &doc).unwrap();
//!
//! let options = OutputOptions { declaration: false, root: Some("result".into()) };
//! assert_eq!(
//!     to_xml(&matches, &options),
//!     r#"<result><a order="1">5</a><a order="2">1</a></result>"#
//! );
//! ```

use std::collections::HashMap;

use roxmltree::{Node, NodeId, NodeType};

use crate::engine::Match;

pub const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// Name of the attribute holding the ORDER BY rank.
pub const RANK_ATTRIBUTE: &str = "order";

/// How results are wrapped on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// Emit the XML declaration
    pub declaration: bool,

    /// Name of an element wrapping all results
    pub root: Option<String>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            declaration: true,
            root: None,
        }
    }
}

pub struct XmlPrinter<'o> {
    options: &'o OutputOptions,
    ranks: HashMap<NodeId, String>,
}

impl<'o> XmlPrinter<'o> {
    pub fn new(options: &'o OutputOptions) -> Self {
        XmlPrinter {
            options,
            ranks: HashMap::new(),
        }
    }

    pub fn print(mut self, matches: &[Match<'_, '_>]) -> String {
        self.ranks = matches
            .iter()
            .filter_map(|m| Some((m.node.id(), m.rank?.to_string())))
            .collect();

        let mut out = String::new();
        if self.options.declaration {
            out.push_str(DECLARATION);
        }

        match &self.options.root {
            Some(root) if matches.is_empty() => {
                out.push_str(&format!("<{} />", root));
            }
            Some(root) => {
                out.push_str(&format!("<{}>", root));
                self.print_matches(&mut out, matches);
                out.push_str(&format!("</{}>", root));
            }
            None => self.print_matches(&mut out, matches),
        }
        out
    }

    fn print_matches(&self, out: &mut String, matches: &[Match<'_, '_>]) {
        for m in matches {
            self.print_element(out, m.node);
        }
    }

    fn print_element(&self, out: &mut String, node: Node<'_, '_>) {
        let name = node.tag_name().name();
        out.push('<');
        out.push_str(name);

        let rank = self.ranks.get(&node.id()).map(String::as_str);
        let attributes = node
            .attributes()
            .filter(|attr| {
                rank.is_none() || attr.namespace().is_some() || attr.name() != RANK_ATTRIBUTE
            })
            .map(|attr| (attr.name(), attr.value()))
            .chain(rank.map(|r| (RANK_ATTRIBUTE, r)));
        for (key, value) in attributes {
            out.push_str(&format!(" {}=\"{}\"", key, escape_attribute(value)));
        }

        if !node.has_children() {
            out.push_str(" />");
            return;
        }

        out.push('>');
        for child in node.children() {
            self.print_node(out, child);
        }
        out.push_str(&format!("</{}>", name));
    }

    fn print_node(&self, out: &mut String, node: Node<'_, '_>) {
        match node.node_type() {
            NodeType::Element => self.print_element(out, node),
            NodeType::Text => out.push_str(&escape_text(node.text().unwrap_or_default())),
            NodeType::Comment => {
                out.push_str(&format!("<!--{}-->", node.text().unwrap_or_default()));
            }
            NodeType::PI => {
                if let Some(pi) = node.pi() {
                    match pi.value {
                        Some(value) => out.push_str(&format!("<?{} {}?>", pi.target, value)),
                        None => out.push_str(&format!("<?{}?>", pi.target)),
                    }
                }
            }
            NodeType::Root => {}
        }
    }
}

fn escape_text(s: &str) -> String {
    s.chars()
        .fold(String::with_capacity(s.len()), |mut out, c| {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                c => out.push(c),
            }
            out
        })
}

fn escape_attribute(s: &str) -> String {
    escape_text(s)
        .chars()
        .fold(String::with_capacity(s.len()), |mut out, c| {
            match c {
                '"' => out.push_str("&quot;"),
                '\n' => out.push_str("&#10;"),
                c => out.push(c),
            }
            out
        })
}

/// Serializes `matches` according to `options`.
pub fn to_xml(matches: &[Match<'_, '_>], options: &OutputOptions) -> String {
    XmlPrinter::new(options).print(matches)
}
