//! Error types for kisexp.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! There are two families of failures. *Grammar* errors come from the lexer
//! and parser when text cannot be turned into a single node tree. *Mapping*
//! errors come from the codec when a node tree does not fit a record schema
//! (or a value cannot be encoded); they name the record field and the raw
//! value and keep the triggering error as their [`source`](std::error::Error::source).

use std::fmt;

use thiserror::Error;

/// The main error type for kisexp operations.
#[derive(Clone, Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
    /// The error that triggered this one.
    #[source]
    pub cause: Option<Box<Error>>,
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            cause: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the source file name, keeping any recorded frames.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default().with_source(source);
        self.context = Some(context);
        self
    }

    /// Attaches the error that caused this one.
    #[must_use]
    pub fn caused_by(mut self, cause: Error) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Creates a grammar error at a source position.
    #[must_use]
    pub fn syntax(message: impl Into<String>, line: u32, column: u32, context: String) -> Self {
        Self::new(ErrorKind::Syntax {
            message: message.into(),
            line,
            column,
            context,
        })
    }

    /// Creates a mapping error for `target`, wrapping `cause`.
    #[must_use]
    pub fn mapping(target: impl Into<String>, value: impl Into<String>, cause: Error) -> Self {
        Self::new(ErrorKind::Mapping {
            target: target.into(),
            value: value.into(),
        })
        .caused_by(cause)
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: &'static str, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected,
            actual: actual.into(),
        })
    }

    /// Creates an error for an atom outside its allowed set.
    #[must_use]
    pub fn invalid_atom(atom: impl Into<String>, choices: &[&str]) -> Self {
        Self::new(ErrorKind::InvalidAtom {
            atom: atom.into(),
            choices: choices.join(", "),
        })
    }

    /// Creates an element-count mismatch error.
    #[must_use]
    pub fn arity(expected: impl Into<String>, actual: usize) -> Self {
        Self::new(ErrorKind::Arity {
            expected: expected.into(),
            actual,
        })
    }

    /// Creates a positional overflow error.
    #[must_use]
    pub fn unhandled_positional(record: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnhandledPositional {
            record: record.into(),
            value: value.into(),
        })
    }

    /// Creates a format-level validation error.
    #[must_use]
    pub fn format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format(message.into()))
    }

    /// Returns true if this is a grammar (lexer/parser) error.
    #[must_use]
    pub const fn is_grammar(&self) -> bool {
        matches!(self.kind, ErrorKind::Syntax { .. })
    }

    /// Returns true if this error came from mapping nodes onto a schema.
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Mapping { .. }
                | ErrorKind::TypeMismatch { .. }
                | ErrorKind::InvalidAtom { .. }
                | ErrorKind::Arity { .. }
                | ErrorKind::UnhandledPositional { .. }
        )
    }

    /// Records that this error passed through `frame` (e.g. `board.segments`).
    ///
    /// Leaf errors are wrapped into a [`ErrorKind::Mapping`] error naming
    /// `frame` and the offending value; errors that already are mapping
    /// errors only get `frame` appended to their context stack, so the
    /// innermost field stays the one that is reported.
    #[must_use]
    pub fn within(self, frame: &str, value: impl FnOnce() -> String) -> Self {
        match self.kind {
            ErrorKind::Mapping { .. } => {
                let context = self.context.clone().unwrap_or_default().with_frame(frame);
                self.with_context(context)
            }
            ErrorKind::Syntax { .. } | ErrorKind::DuplicateTag { .. } => self,
            _ => Self::mapping(frame, value(), self),
        }
    }

    /// Returns the innermost error of the cause chain.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Some(cause) = &current.cause {
            current = cause;
        }
        current
    }

    /// Renders the error, its context and its cause chain on several lines.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        if let Some(context) = &self.context {
            let rendered = context.to_string();
            if !rendered.is_empty() {
                out.push(' ');
                out.push_str(rendered.trim_end());
            }
        }
        let mut cause = self.cause.as_deref();
        while let Some(err) = cause {
            out.push_str("\n  caused by: ");
            out.push_str(&err.to_string());
            cause = err.cause.as_deref();
        }
        out
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Clone, Debug, Error)]
pub enum ErrorKind {
    /// Text could not be tokenized or balanced into one node tree.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        /// Description of the problem.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// A value did not fit the field it was mapped onto.
    #[error("cannot map {value} into {target}")]
    Mapping {
        /// The record field, as `record.field`.
        target: String,
        /// Compact rendering of the offending node or value.
        value: String,
    },

    /// A leaf node had the wrong scalar type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: &'static str,
        /// Description of what was found.
        actual: String,
    },

    /// An atom outside the allowed set.
    #[error("invalid atom {atom}, valid choices are: {choices}")]
    InvalidAtom {
        /// The atom that was found.
        atom: String,
        /// The allowed atoms, comma separated.
        choices: String,
    },

    /// Wrong number of elements.
    #[error("expected {expected} element(s), got {actual}")]
    Arity {
        /// Description of the expected count.
        expected: String,
        /// Actual number of elements.
        actual: usize,
    },

    /// More positional children than the record has positional fields.
    #[error("unhandled positional argument {value} while parsing {record}")]
    UnhandledPositional {
        /// The record being decoded.
        record: String,
        /// The child that had nowhere to go.
        value: String,
    },

    /// Two fields of one record claim the same tag.
    #[error("fields {first} and {second} of {record} both claim tag {tag}")]
    DuplicateTag {
        /// The record being registered.
        record: String,
        /// The contested tag.
        tag: String,
        /// The field registered first.
        first: String,
        /// The field registered second.
        second: String,
    },

    /// The document is well formed but not acceptable to the format.
    #[error("format error: {0}")]
    Format(String),

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err.to_string()))
    }
}

/// Context about where an error occurred.
#[derive(Clone, Debug, Default)]
pub struct ErrorContext {
    /// Source file name.
    pub source: Option<String>,
    /// Record fields the error propagated through, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source file name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
