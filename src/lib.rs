pub mod ast;
pub mod cli;
pub mod engine;
pub mod evaluator;
pub mod lexer;
pub mod locator;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{CompareOp, Comparison, Condition, ElementRef, OrderBy, Query, Source};
pub use engine::{Match, run};
pub use evaluator::{EvalError, Evaluator};
pub use lexer::{Lexer, Token};
pub use output::{OutputOptions, XmlPrinter, to_xml};
pub use parser::{ParseError, Parser, parse_query};
pub use value::Value;
