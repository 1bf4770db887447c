//! Parser for the bracketed stack-data notation.
//!
//! ```text
//! [0x90*8, 0x41*16, 0x12, 0x34, "A"*4, 'B']
//! ```
//!
//! Elements are separated by commas. Each element is an optional sign (which
//! is discarded), then either an integer or a one-character quoted literal,
//! then an optional `*N` repeat count. Nested lists are rejected.

use crate::error::{Result, StackError};

/// Upper bound on the expanded byte count accepted by default (1 MiB).
pub const DEFAULT_MAX_LEN: usize = 1 << 20;

/// Radix used for integers written without a `0x` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Radix {
    /// `10` means `0x10`.
    #[default]
    Hex,
    /// `10` means ten.
    Decimal,
}

impl Radix {
    pub fn value(self) -> u32 {
        match self {
            Radix::Hex => 16,
            Radix::Decimal => 10,
        }
    }

    /// Parse a radix name as used in configuration (`hex`, `16`, `dec`, `10`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hex" | "16" | "hexadecimal" => Some(Radix::Hex),
            "dec" | "10" | "decimal" => Some(Radix::Decimal),
            _ => None,
        }
    }
}

/// Parser knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionConfig {
    /// Radix for unprefixed integers.
    pub bare_radix: Radix,
    /// Maximum number of bytes a single expression may expand to.
    pub max_len: usize,
}

impl Default for ExpressionConfig {
    fn default() -> Self {
        Self {
            bare_radix: Radix::Hex,
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

impl ExpressionConfig {
    pub fn with_bare_radix(mut self, radix: Radix) -> Self {
        self.bare_radix = radix;
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }
}

/// One parsed element: a byte value and how many times it repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Element {
    value: u8,
    count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ExpressionParser {
    config: ExpressionConfig,
}

impl ExpressionParser {
    pub fn new(config: ExpressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExpressionConfig {
        &self.config
    }

    /// Parse an expression into the byte sequence it denotes.
    pub fn parse(&self, expr: &str) -> Result<Vec<u8>> {
        let inner = expr
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| StackError::expression("stack data must be enclosed in [ and ]"))?;

        if inner.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut bytes = Vec::new();
        for raw in split_elements(inner)? {
            let element = self.parse_element(raw)?;
            if bytes.len().saturating_add(element.count) > self.config.max_len {
                return Err(StackError::expression(format!(
                    "expression expands past {} bytes",
                    self.config.max_len
                )));
            }
            bytes.extend(std::iter::repeat(element.value).take(element.count));
        }

        Ok(bytes)
    }

    fn parse_element(&self, raw: &str) -> Result<Element> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(StackError::expression("empty element"));
        }

        let token = token
            .strip_prefix(|c: char| c == '+' || c == '-')
            .unwrap_or(token)
            .trim_start();

        let (atom, count) = match split_repetition(token) {
            Some((left, right)) => {
                let left = left.trim();
                if split_repetition(left).is_some() {
                    return Err(StackError::expression(format!(
                        "`{token}` repeats more than once"
                    )));
                }
                (left, parse_count(right.trim())?)
            }
            None => (token, 1),
        };

        // Validated even for a zero count so typos never pass silently.
        let value = self.parse_atom(atom)?;
        Ok(Element { value, count })
    }

    fn parse_atom(&self, atom: &str) -> Result<u8> {
        if let Some(ch) = quoted_char(atom)? {
            let code = ch as u32;
            return u8::try_from(code)
                .map_err(|_| StackError::byte_range(format!("{atom} ({code:#x})")));
        }

        let (digits, radix) = match atom
            .strip_prefix("0x")
            .or_else(|| atom.strip_prefix("0X"))
        {
            Some(rest) => (rest, 16),
            None => (atom, self.config.bare_radix.value()),
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(StackError::expression(format!(
                "`{atom}` is not a hexadecimal integer, decimal integer or quoted character"
            )));
        }

        // Digits are validated above, so the only failure left is overflow.
        let value =
            u64::from_str_radix(digits, radix).map_err(|_| StackError::byte_range(atom))?;
        u8::try_from(value).map_err(|_| StackError::byte_range(atom))
    }
}

/// Parse an expression with the default configuration.
pub fn parse_expression(expr: &str) -> Result<Vec<u8>> {
    ExpressionParser::default().parse(expr)
}

/// Characters outside quoted literals, and whether a literal was left open.
///
/// The first character after an opening quote is always literal content, so
/// `'''` and `"""` quote the quote character itself.
fn unquoted_chars(text: &str) -> (Vec<(usize, char)>, bool) {
    let mut outside = Vec::new();
    let mut quote: Option<(char, bool)> = None;

    for (idx, ch) in text.char_indices() {
        quote = match quote {
            None if ch == '\'' || ch == '"' => Some((ch, false)),
            None => {
                outside.push((idx, ch));
                None
            }
            Some((open, false)) => Some((open, true)),
            Some((open, true)) if ch == open => None,
            Some(state) => Some(state),
        };
    }

    (outside, quote.is_some())
}

/// Split the list body on top-level commas, honouring quoted characters.
fn split_elements(inner: &str) -> Result<Vec<&str>> {
    let (outside, unterminated) = unquoted_chars(inner);
    let mut elements = Vec::new();
    let mut start = 0;

    for (idx, ch) in outside {
        match ch {
            ',' => {
                elements.push(&inner[start..idx]);
                start = idx + 1;
            }
            '[' | ']' => {
                return Err(StackError::expression("nested lists are not supported"));
            }
            _ => {}
        }
    }

    if unterminated {
        return Err(StackError::expression("unterminated character literal"));
    }

    elements.push(&inner[start..]);
    Ok(elements)
}

/// Locate the last `*` outside quotes and split around it.
fn split_repetition(token: &str) -> Option<(&str, &str)> {
    let (outside, _) = unquoted_chars(token);
    outside
        .into_iter()
        .rev()
        .find(|(_, ch)| *ch == '*')
        .map(|(idx, _)| (&token[..idx], &token[idx + 1..]))
}

fn parse_count(raw: &str) -> Result<usize> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(StackError::expression(format!(
            "repeat count `{raw}` must be a non-negative decimal integer"
        )));
    }
    raw.parse::<usize>()
        .map_err(|_| StackError::expression(format!("repeat count `{raw}` is too large")))
}

fn quoted_char(atom: &str) -> Result<Option<char>> {
    let mut chars = atom.chars();
    let open = match chars.next() {
        Some(c @ ('\'' | '"')) => c,
        _ => return Ok(None),
    };

    match (chars.next(), chars.next(), chars.next()) {
        (Some(ch), Some(close), None) if close == open => Ok(Some(ch)),
        _ => Err(StackError::expression(format!(
            "`{atom}` must quote exactly one character"
        ))),
    }
}
