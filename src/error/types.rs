use thiserror::Error;

/// Unified result type for the parsing layer.
pub type Result<T> = std::result::Result<T, StackError>;

/// Errors surfaced while turning user input into bytes and sections.
///
/// The layout engine itself never fails, so every variant here belongs to one
/// of the parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("invalid stack data: {reason}. Expected a list such as [0xA*4, 0xB*2, 0xD, \"A\"*10]")]
    InvalidExpression { reason: String },
    #[error("{literal} is more than one byte; stack data entries must fit in one byte (0x00-0xff)")]
    ByteRange { literal: String },
    #[error("invalid list at column {column}: {reason}")]
    InvalidLiteralList { column: usize, reason: String },
}

impl StackError {
    pub(crate) fn expression(reason: impl Into<String>) -> Self {
        Self::InvalidExpression {
            reason: reason.into(),
        }
    }

    pub(crate) fn byte_range(literal: impl Into<String>) -> Self {
        Self::ByteRange {
            literal: literal.into(),
        }
    }

    pub(crate) fn literal_list(column: usize, reason: impl Into<String>) -> Self {
        Self::InvalidLiteralList {
            column,
            reason: reason.into(),
        }
    }
}
