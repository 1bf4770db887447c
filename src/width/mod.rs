//! Terminal display width helpers.

mod utils;

pub use utils::{Align, display_width, escape_controls, pad_to_width};
