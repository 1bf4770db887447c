//! Menu-driven session reading from any `BufRead` and writing to any `Write`.
//!
//! The binary wires this to stdin/stdout; tests drive it with in-memory
//! buffers. Parse failures are shown to the user and the same prompt is
//! repeated. End of input ends the session cleanly.

use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use std::time::Instant;

use serde_json::{Value, json};
use thiserror::Error;

use crate::expression::{DEFAULT_MAX_LEN, ExpressionParser};
use crate::layout::{Section, StackLayout, sections_from_lists};
use crate::literal::{parse_labels, parse_sizes};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::SessionMetrics;
use crate::presets::preset_for_width;
use crate::render::TableRenderer;

const TARGET: &str = "stack_tables::session";

const MENU: &str = "\
Menu:
1. Automate with test data (width = 4)
2. Automate with test data (width = 8)
3. Manually input stack data, labels, and sizes
4. Quit
";

const CHOICE_PROMPT: &str = "Enter your choice (1-4): ";
const STACK_PROMPT: &str = "Enter the stack data as a list of hexadecimal integers, in the format [0xA*4, 0xB*2, 0xC*8, 0xD, \"A\"*10...]: ";
const LABEL_PROMPT: &str = "Enter the labels as a list of strings: ";
const SIZE_PROMPT: &str = "Enter the sizes as a list of integers: ";

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Widths accepted at the manual-entry prompt. Empty accepts any
    /// non-zero width.
    pub allowed_widths: Vec<usize>,
    /// Largest accepted sum of section sizes.
    pub max_declared_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            allowed_widths: vec![4, 8],
            max_declared_len: DEFAULT_MAX_LEN,
        }
    }
}

impl SessionConfig {
    pub fn with_allowed_widths(mut self, widths: impl Into<Vec<usize>>) -> Self {
        self.allowed_widths = widths.into();
        self
    }

    pub fn with_max_declared_len(mut self, max_declared_len: usize) -> Self {
        self.max_declared_len = max_declared_len;
        self
    }

    fn check_sizes(&self, sizes: Vec<usize>) -> std::result::Result<Vec<usize>, String> {
        let total = sizes
            .iter()
            .fold(0usize, |acc, size| acc.saturating_add(*size));
        if total > self.max_declared_len {
            return Err(format!(
                "sizes add up to more than {} bytes. Please enter smaller sizes.",
                self.max_declared_len
            ));
        }
        Ok(sizes)
    }

    fn width_prompt(&self) -> String {
        match self.allowed_widths.as_slice() {
            [] => "Enter the row width in bytes: ".to_string(),
            widths => format!("Enter the size you want to use ({}): ", join_or(widths)),
        }
    }

    fn parse_width(&self, line: &str) -> std::result::Result<NonZeroUsize, String> {
        let width = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(NonZeroUsize::new)
            .filter(|w| self.allowed_widths.is_empty() || self.allowed_widths.contains(&w.get()));

        width.ok_or_else(|| match self.allowed_widths.as_slice() {
            [] => "Invalid size. Please enter a positive integer.".to_string(),
            widths => format!("Invalid size. Please enter either {}.", join_or(widths)),
        })
    }
}

fn join_or(widths: &[usize]) -> String {
    let names: Vec<String> = widths.iter().map(|w| w.to_string()).collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        _ => names.join(""),
    }
}

/// User-entered stack description awaiting layout.
struct ManualInput {
    bytes: Vec<u8>,
    labels: Vec<String>,
    sizes: Vec<usize>,
    width: NonZeroUsize,
}

pub struct Session<R, W> {
    input: R,
    output: W,
    parser: ExpressionParser,
    renderer: TableRenderer,
    config: SessionConfig,
    logger: Logger,
    metrics: SessionMetrics,
    started: Instant,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, renderer: TableRenderer) -> Self {
        Self {
            input,
            output,
            parser: ExpressionParser::default(),
            renderer,
            config: SessionConfig::default(),
            logger: Logger::disabled(),
            metrics: SessionMetrics::new(),
            started: Instant::now(),
        }
    }

    pub fn with_parser(mut self, parser: ExpressionParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user quits or input ends.
    pub fn run(&mut self) -> SessionResult<()> {
        self.emit(LogLevel::Info, "session_started", []);

        loop {
            write!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt(CHOICE_PROMPT)? else {
                break;
            };

            match choice.trim() {
                "1" => self.draw_preset(4)?,
                "2" => self.draw_preset(8)?,
                "3" => match self.manual_input()? {
                    Some(input) => self.draw_manual(input)?,
                    None => break,
                },
                "4" => break,
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }

        let snapshot = self.metrics.snapshot(self.started.elapsed());
        let _ = self.logger.log_event(snapshot.to_log_event(TARGET));
        self.emit(LogLevel::Info, "session_finished", []);
        self.output.flush()?;
        Ok(())
    }

    fn draw_preset(&mut self, width: usize) -> SessionResult<()> {
        match preset_for_width(width) {
            Some(preset) => self.draw(&preset.bytes, &preset.sections, preset.width),
            None => {
                writeln!(self.output, "No test data for width {width}.")?;
                Ok(())
            }
        }
    }

    fn draw_manual(&mut self, input: ManualInput) -> SessionResult<()> {
        if input.labels.len() != input.sizes.len() {
            self.emit(
                LogLevel::Warn,
                "section_count_mismatch",
                [
                    json_kv("labels", input.labels.len()),
                    json_kv("sizes", input.sizes.len()),
                ],
            );
        }

        let sections = sections_from_lists(&input.labels, &input.sizes);
        self.draw(&input.bytes, &sections, input.width)
    }

    fn draw(
        &mut self,
        bytes: &[u8],
        sections: &[Section],
        width: NonZeroUsize,
    ) -> SessionResult<()> {
        let stack = StackLayout::build(bytes, sections, width);
        self.renderer.render(&mut self.output, &stack.rows)?;
        self.metrics.record_table(stack.rows.len(), stack.dropped);

        if stack.dropped > 0 {
            self.emit(
                LogLevel::Warn,
                "bytes_dropped",
                [
                    json_kv("dropped", stack.dropped),
                    json_kv("padded_len", stack.padded_len),
                ],
            );
        }

        self.emit(
            LogLevel::Info,
            "table_rendered",
            [
                json_kv("rows", stack.rows.len()),
                json_kv("sections", sections.len()),
                json_kv("width", width.get()),
                json_kv("declared_len", stack.declared_len),
                json_kv("zero_filled", stack.zero_filled),
                json_kv("dropped", stack.dropped),
            ],
        );
        Ok(())
    }

    fn manual_input(&mut self) -> SessionResult<Option<ManualInput>> {
        let Some(bytes) = self.prompt_until("stack_data", STACK_PROMPT, |session, line| {
            session.parser.parse(line).map_err(|err| err.to_string())
        })?
        else {
            return Ok(None);
        };

        let Some(labels) = self.prompt_until("labels", LABEL_PROMPT, |_, line| {
            parse_labels(line).map_err(|err| err.to_string())
        })?
        else {
            return Ok(None);
        };

        let Some(sizes) = self.prompt_until("sizes", SIZE_PROMPT, |session, line| {
            let sizes = parse_sizes(line).map_err(|err| err.to_string())?;
            session.config.check_sizes(sizes)
        })?
        else {
            return Ok(None);
        };

        let width_prompt = self.config.width_prompt();
        let Some(width) = self.prompt_until("width", &width_prompt, |session, line| {
            session.config.parse_width(line)
        })?
        else {
            return Ok(None);
        };

        Ok(Some(ManualInput {
            bytes,
            labels,
            sizes,
            width,
        }))
    }

    /// Repeat `prompt` until `parse` accepts the line; `None` on end of input.
    fn prompt_until<T>(
        &mut self,
        field: &str,
        prompt: &str,
        parse: impl Fn(&Self, &str) -> std::result::Result<T, String>,
    ) -> SessionResult<Option<T>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };

            match parse(&*self, &line) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => {
                    writeln!(self.output, "Error: {message}")?;
                    self.metrics.record_rejected_input();
                    self.emit(
                        LogLevel::Warn,
                        "input_rejected",
                        [json_kv("field", field), json_kv("error", message)],
                    );
                }
            }
        }
    }

    fn prompt(&mut self, prompt: &str) -> SessionResult<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string()))
    }

    fn emit<const N: usize>(&self, level: LogLevel, message: &str, fields: [(String, Value); N]) {
        let _ = self
            .logger
            .log_event(event_with_fields(level, TARGET, message, fields));
    }
}
