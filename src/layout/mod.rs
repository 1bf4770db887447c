//! Layout module orchestrator.
//!
//! Downstream code imports layout types from here while the row-partitioning
//! algorithm lives in the private `core` module.

mod core;

pub use core::{
    LayoutExtent, PALETTE_LEN, Row, Rows, Section, StackLayout, format_bytes, format_position,
    layout, rows, sections_from_lists,
};
