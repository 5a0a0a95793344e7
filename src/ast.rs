//! # XQR Query Language - Abstract Syntax Tree
//!
//! This module defines the syntax tree of the XQR query language, a small
//! SQL-like language that selects, filters, orders and limits elements of an
//! XML document.
//!
//! ## Architecture Overview
//!
//! - **[element]** - `name[.attribute]` references to elements and attributes
//! - **[operators]** - relational operators of WHERE comparisons
//! - **[condition]** - the WHERE predicate tree
//! - **[query]** - the complete query record
//!
//! ## Quick Start
//!
//! ```text
//! SELECT book LIMIT 2 FROM library WHERE price < 20 ORDER BY title ASC
//! ```
//!
//! This selects `<book>` elements under the first `<library>` element whose
//! `<price>` is below 20, sorts them by `<title>` and keeps the first two.
//!
//! ## Core Concepts
//!
//! ### Clauses
//!
//! - **SELECT** - tag name of the elements to return
//! - **LIMIT** - keep only the first n results, applied after ordering
//! - **FROM** - `ROOT` for the whole document, or a reference to the element
//!   under which SELECT searches
//! - **WHERE** - comparisons combined with `AND`, `OR`, `NOT` and brackets;
//!   `AND` binds tighter than `OR`
//! - **ORDER BY** - sort by an element's text or an attribute, `ASC` or `DESC`
//!
//! ### Comparisons
//!
//! Literals are either numbers (`5`, `-1.25`) or double-quoted strings
//! (`"two words"`). A number never equals, exceeds or contains a string.
//!
//! ## Examples
//!
//! ```text
//! SELECT item FROM ROOT WHERE NOT (price > 100 OR stock = 0)
//! SELECT user FROM users WHERE .role CONTAINS "admin" ORDER BY user.id DESC
//! ```
pub mod condition;
pub mod element;
pub mod operators;
pub mod query;

pub use condition::{Comparison, Condition};
pub use element::{ElementRef, is_identifier};
pub use operators::CompareOp;
pub use query::{OrderBy, Query, Source};
