//! Table rendering and section coloring.

mod core;
pub mod palette;

pub use core::{HEADERS, RendererSettings, TableRenderer};
pub use palette::{ColorMode, Palette};
