//! Render byte buffers as labeled stack tables.
//!
//! Stack data is written in a compact bracketed notation
//! (`[0x90*8, 0x41*16, "B"*4]`), split into labeled sections of declared size
//! and laid out in fixed-width rows. Each section starts on a row boundary,
//! so positions reflect the padded stride a debugger would show.
//!
//! ```
//! use std::num::NonZeroUsize;
//! use stack_tables::{Section, layout, parse_expression};
//!
//! let bytes = parse_expression("[0x41*6, 0xde, 0xad]").unwrap();
//! let sections = [Section::new("buffer", 6), Section::new("canary", 2)];
//! let rows = layout(&bytes, &sections, NonZeroUsize::new(4).unwrap());
//!
//! assert_eq!(rows.len(), 3);
//! assert_eq!(rows[2].position_text(), "+0x8");
//! assert_eq!(rows[2].bytes_text(), "00 00 00 00");
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod expression;
pub mod layout;
pub mod literal;
pub mod logging;
pub mod metrics;
pub mod presets;
pub mod render;
pub mod width;

pub use config::{AppConfig, ConfigError};
pub use driver::{Session, SessionConfig, SessionError, SessionResult};
pub use error::{Result, StackError};
pub use expression::{ExpressionConfig, ExpressionParser, Radix, parse_expression};
pub use layout::{
    LayoutExtent, Row, Section, StackLayout, format_bytes, format_position, layout, rows,
    sections_from_lists,
};
pub use literal::{parse_labels, parse_sizes};
pub use logging::{FileSink, LogEvent, LogLevel, LogSink, Logger, LoggingError, LoggingResult, MemorySink};
pub use metrics::{MetricSnapshot, SessionMetrics};
pub use presets::{Preset, preset_for_width};
pub use render::{ColorMode, Palette, RendererSettings, TableRenderer};
pub use width::display_width;
