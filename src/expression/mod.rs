//! Stack-data expression parsing.
//!
//! Callers import the parser from here while the grammar itself lives in the
//! private `core` module.

mod core;

pub use core::{DEFAULT_MAX_LEN, ExpressionConfig, ExpressionParser, Radix, parse_expression};
