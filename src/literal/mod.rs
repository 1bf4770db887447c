//! Literal list parsing for section labels and sizes.

mod core;

pub use core::{parse_labels, parse_sizes};
