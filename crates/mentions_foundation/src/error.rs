//! Error types for the mentions engine.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! "Not found" is never an error here: an unresolvable mention is a normal
//! outcome. Errors are reserved for store faults, configuration mistakes,
//! directory invariant violations, and exceeded deadlines.

use std::fmt;

use thiserror::Error;

use crate::principal::PrincipalId;

/// The main error type for mentions operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a principal store fault.
    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Store(message.into()))
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig(message.into()))
    }

    /// Creates an unknown principal error.
    #[must_use]
    pub fn unknown_principal(id: PrincipalId) -> Self {
        Self::new(ErrorKind::UnknownPrincipal(id))
    }

    /// Creates a deadline exceeded error.
    #[must_use]
    pub fn deadline_exceeded(budget_ms: u128) -> Self {
        Self::new(ErrorKind::DeadlineExceeded { budget_ms })
    }

    /// Returns true if this error came from the external principal store.
    #[must_use]
    pub fn is_store_fault(&self) -> bool {
        matches!(self.kind, ErrorKind::Store(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The external principal store failed (connectivity, storage fault).
    #[error("principal store failure: {0}")]
    Store(String),

    /// A principal with this id is already registered.
    #[error("duplicate principal id: {0}")]
    DuplicatePrincipal(PrincipalId),

    /// Another user already owns this login (case-insensitive).
    #[error("duplicate login: {0}")]
    DuplicateLogin(String),

    /// Another user already owns this email address (case-insensitive).
    #[error("duplicate email address: {0}")]
    DuplicateEmail(String),

    /// A directory update referenced a principal that does not exist.
    #[error("unknown principal: {0}")]
    UnknownPrincipal(PrincipalId),

    /// The caller-imposed deadline passed before formatting finished.
    #[error("formatting deadline of {budget_ms}ms exceeded")]
    DeadlineExceeded {
        /// The configured budget in milliseconds.
        budget_ms: u128,
    },

    /// The render or engine configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A REPL command was unknown or malformed.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File system access failed.
    #[error("io error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The raw token or input that was being processed.
    pub source: Option<String>,
    /// Line number in the input text.
    pub line: Option<usize>,
    /// Column number in the input text.
    pub column: Option<usize>,
    /// Processing stages that were active, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            line: None,
            column: None,
            stack: Vec::new(),
        }
    }

    /// Sets the source text.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
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

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
