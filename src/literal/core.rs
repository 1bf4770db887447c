//! Parser for conventional bracketed literal lists.
//!
//! Labels are written as quoted strings (`["nop sled", 'buffer']`) and sizes
//! as integers (`[8, 0x10, 4]`). Both accept surrounding whitespace and a
//! single trailing comma.

use crate::error::{Result, StackError};

/// Parse a list of quoted labels.
pub fn parse_labels(input: &str) -> Result<Vec<String>> {
    parse_list(input, string_literal)
}

/// Parse a list of positive integer sizes.
pub fn parse_sizes(input: &str) -> Result<Vec<usize>> {
    parse_list(input, size_literal)
}

/// Character cursor reporting 1-based columns in errors.
struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn column(&self) -> usize {
        self.pos + 1
    }

    fn error(&self, reason: impl Into<String>) -> StackError {
        StackError::literal_list(self.column(), reason)
    }
}

fn parse_list<T>(input: &str, mut item: impl FnMut(&mut Scanner) -> Result<T>) -> Result<Vec<T>> {
    let mut scanner = Scanner::new(input);
    scanner.skip_whitespace();
    if !scanner.eat('[') {
        return Err(scanner.error("expected '['"));
    }

    let mut items = Vec::new();
    loop {
        scanner.skip_whitespace();
        if scanner.eat(']') {
            break;
        }

        items.push(item(&mut scanner)?);

        scanner.skip_whitespace();
        let column = scanner.column();
        match scanner.bump() {
            Some(',') => {}
            Some(']') => break,
            Some(other) => {
                return Err(StackError::literal_list(
                    column,
                    format!("expected ',' or ']' but found '{other}'"),
                ));
            }
            None => return Err(scanner.error("unterminated list, expected ']'")),
        }
    }

    scanner.skip_whitespace();
    if let Some(extra) = scanner.peek() {
        return Err(scanner.error(format!("unexpected '{extra}' after the closing ']'")));
    }

    Ok(items)
}

fn string_literal(scanner: &mut Scanner) -> Result<String> {
    let start = scanner.column();
    let quote = match scanner.peek() {
        Some(c @ ('\'' | '"')) => {
            scanner.bump();
            c
        }
        Some(other) => {
            return Err(scanner.error(format!("expected a quoted string but found '{other}'")));
        }
        None => return Err(scanner.error("expected a quoted string")),
    };

    let mut text = String::new();
    loop {
        let column = scanner.column();
        match scanner.bump() {
            None | Some('\n') => {
                return Err(StackError::literal_list(start, "unterminated string"));
            }
            Some(c) if c == quote => return Ok(text),
            Some('\\') => {
                let escaped = match scanner.bump() {
                    Some('n') => '\n',
                    Some('t') => '\t',
                    Some('r') => '\r',
                    Some('0') => '\0',
                    Some(c @ ('\\' | '\'' | '"')) => c,
                    Some(other) => {
                        return Err(StackError::literal_list(
                            column,
                            format!("unknown escape '\\{other}'"),
                        ));
                    }
                    None => return Err(StackError::literal_list(start, "unterminated string")),
                };
                text.push(escaped);
            }
            Some(c) => text.push(c),
        }
    }
}

fn size_literal(scanner: &mut Scanner) -> Result<usize> {
    let start = scanner.column();
    match scanner.peek() {
        Some('-') => return Err(scanner.error("sizes must be positive")),
        Some('+') => {
            scanner.bump();
        }
        _ => {}
    }

    let mut text = String::new();
    while let Some(c) = scanner.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            text.push(c);
            scanner.bump();
        } else {
            break;
        }
    }

    if text.is_empty() {
        return Err(match scanner.peek() {
            Some(other) => scanner.error(format!("expected an integer but found '{other}'")),
            None => scanner.error("expected an integer"),
        });
    }

    match parse_int_literal(&text) {
        Some(0) => Err(StackError::literal_list(start, "sizes must be positive")),
        Some(size) => Ok(size),
        None => Err(StackError::literal_list(start, format!("`{text}` is not a valid size"))),
    }
}

fn parse_int_literal(text: &str) -> Option<usize> {
    let lower = text.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest.strip_prefix('_').unwrap_or(rest), 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest.strip_prefix('_').unwrap_or(rest), 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest.strip_prefix('_').unwrap_or(rest), 2)
    } else {
        (lower.as_str(), 10)
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return None;
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    usize::from_str_radix(&cleaned, radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_accept_both_quote_styles() {
        let labels = parse_labels(r#"["nop sled", 'buffer', "Old RBP", 'ret ADDR']"#).unwrap();
        assert_eq!(labels, vec!["nop sled", "buffer", "Old RBP", "ret ADDR"]);
    }

    #[test]
    fn labels_decode_escapes() {
        let labels = parse_labels(r#"["it\'s", 'say "hi"', "a\\b", "tab\there"]"#).unwrap();
        assert_eq!(labels, vec!["it's", "say \"hi\"", "a\\b", "tab\there"]);
    }

    #[test]
    fn empty_and_trailing_comma_lists() {
        assert!(parse_labels("[]").unwrap().is_empty());
        assert!(parse_sizes(" [ ] ").unwrap().is_empty());
        assert_eq!(parse_sizes("[8, 7,]").unwrap(), vec![8, 7]);
    }

    #[test]
    fn sizes_accept_python_integer_forms() {
        assert_eq!(
            parse_sizes("[8, 0x10, 0o10, 0b100, 1_000, +4]").unwrap(),
            vec![8, 16, 8, 4, 1000, 4]
        );
    }

    #[test]
    fn negative_size_fails() {
        let err = parse_sizes("[8, -1]").unwrap_err();
        assert_eq!(err, StackError::literal_list(5, "sizes must be positive"));
    }

    #[test]
    fn zero_size_fails() {
        assert_eq!(
            parse_sizes("[4, 0]").unwrap_err(),
            StackError::literal_list(5, "sizes must be positive")
        );
        assert_eq!(
            parse_sizes("[0x0]").unwrap_err(),
            StackError::literal_list(2, "sizes must be positive")
        );
    }

    #[test]
    fn unquoted_label_fails_with_column() {
        let err = parse_labels("[\"a\", b]").unwrap_err();
        assert_eq!(
            err,
            StackError::literal_list(7, "expected a quoted string but found 'b'")
        );
    }

    #[test]
    fn malformed_lists_fail_explicitly() {
        for input in ["", "\"a\"", "[\"a\"", "[\"a\" \"b\"]", "[\"a\",,]", "[\"a]", "[\"a\"] x", "['\\q']"] {
            let err = parse_labels(input).unwrap_err();
            assert!(
                matches!(err, StackError::InvalidLiteralList { .. }),
                "{input:?} produced {err:?}"
            );
        }

        for input in ["8, 7", "[8 7]", "[8, x]", "[1__0]", "[0x]", "[12abc]", "[99999999999999999999999]"] {
            let err = parse_sizes(input).unwrap_err();
            assert!(
                matches!(err, StackError::InvalidLiteralList { .. }),
                "{input:?} produced {err:?}"
            );
        }
    }
}
