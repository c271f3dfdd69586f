//! Structural diffing for a small expression language.
//!
//! ```
//! use doubt::{diff, parser::parse_term};
//!
//! let old = parse_term("f(1, 2)").unwrap().forget_span();
//! let new = parse_term("f(1, 3)").unwrap().forget_span();
//! let d = diff(&old, &new);
//! assert_eq!(d.to_string(), "f(1, {-2-}{+3+})");
//! assert_eq!(d.magnitude(), 1);
//! ```

pub mod diff;
pub mod doc;
pub mod parser;
pub mod prelude;
pub mod syntax;
pub mod term;

pub use diff::{diff, diff_sequence, rank, Diff};
pub use doc::{Doc, Pretty};
pub use syntax::{Syntax, Value};
pub use term::Term;
