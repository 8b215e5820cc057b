//! Error types for parsing, binding, and the engine facade.

use thiserror::Error;

/// Malformed text input. `position` is a byte offset into the source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason} at byte {position}")]
pub struct ParseError {
    pub position: usize,
    pub reason: ParseReason,
}

impl ParseError {
    pub fn new(position: usize, reason: ParseReason) -> Self {
        Self { position, reason }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseReason {
    #[error("unexpected character")]
    UnexpectedCharacter,

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("invalid number literal")]
    InvalidNumber,

    #[error("invalid escape sequence")]
    InvalidEscape,

    #[error("invalid utf-8")]
    InvalidUtf8,

    #[error("bad indentation")]
    BadIndent,

    #[error("trailing characters after document")]
    TrailingCharacters,
}

/// Structural mismatch between a value tree and a target descriptor.
///
/// Binding performs no local recovery: the first mismatch aborts the whole
/// bind call and the target is never partially constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A required, non-defaulted field was absent from the source mapping.
    #[error("missing required field \"{0}\"")]
    MissingField(String),

    /// Two callable creators matched the same number of source keys.
    #[error("ambiguous creator selection for {0}")]
    AmbiguousConstructor(&'static str),

    /// The discriminator field was absent, non-textual, or named no
    /// registered subtype. Carries the raw tag (empty when absent).
    #[error("unknown subtype tag \"{0}\"")]
    UnknownSubtype(String),

    /// The runtime variant of the written object is not registered.
    #[error("runtime variant of {0} is not a registered subtype")]
    UnregisteredSubtype(&'static str),

    /// The source value was not a mapping.
    #[error("expected a mapping for {0}")]
    NotMapping(&'static str),

    /// The source value was not a sequence.
    #[error("expected a sequence of {0}")]
    NotSequence(&'static str),

    /// A field value could not be converted to the target field's type.
    #[error("incompatible value for field \"{0}\"")]
    IncompatibleValue(String),
}

/// Facade-level error union. I/O failures are propagated immediately and
/// never retried.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
