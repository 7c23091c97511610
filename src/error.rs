//! Error handling types for the parser
//!
//! This module provides custom error types that give detailed information about
//! parsing failures, including line and column information where available.

use std::{error::Error, fmt};

use thiserror::Error;

use crate::parser::token::TokenKind;

/// Main error type for tokenizing, parsing and formatting
#[derive(Debug)]
pub struct ParseError {
    /// The specific kind of error
    kind: ParseErrorKind,
    /// Location where the error occurred
    location: Option<Location>,
    /// Source error that caused this error
    source: Option<Box<dyn Error + Send + Sync>>,
    /// Additional context for the error
    context: Option<String>,
}

/// Represents a location in the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Location {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Top-level error categories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    IO(#[from] IOError),
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Security(#[from] SecurityError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Lexical analysis errors. All of them abort tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalError {
    #[error("Unterminated comment")]
    UnterminatedComment,
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Unterminated identifier")]
    UnterminatedIdentifier,
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// A scan step finished without moving past its first character.
    #[error("Lexer made no progress at offset {position}")]
    NoProgress { position: usize },
}

/// Errors raised when the token stream does not form a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("No root element found")]
    NoRootFound,
    #[error("Found extraneous tokens starting at token {position}: {}", join_kinds(.kinds))]
    ExtraneousTokens {
        position: usize,
        kinds: Vec<TokenKind>,
    },
    #[error("Rule '{rule}' produced an unexpected capture")]
    MalformedCapture { rule: String },
}

/// Errors raised while turning matched rules into the document tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Incorrect tag in prolog: {found} (expected xml)")]
    PrologTarget { found: String },
    #[error("Found mismatching start tag {start} and end tag {end}")]
    MismatchedTags { start: String, end: String },
}

/// Resource limit errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecurityError {
    #[error("Maximum nesting depth exceeded ({max})")]
    MaxDepthExceeded { max: usize },
    #[error("Maximum input size exceeded ({max} bytes)")]
    MaxSizeExceeded { max: usize },
}

/// IO operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IOError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Read error: {0}")]
    ReadError(String),
    #[error("Write error: {0}")]
    WriteError(String),
    #[error("Could not start parser thread: {0}")]
    ThreadSpawn(String),
}

/// Formatting errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Invalid indentation: {0}")]
    InvalidIndentation(String),
}

fn join_kinds(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ParseError {
    pub fn new(kind: impl Into<ParseErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            location: None,
            source: None,
            context: None,
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some(Location::new(line, column));
        self
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }
}

macro_rules! impl_from_category {
    ($($category:ty),* $(,)?) => {
        $(
            impl From<$category> for ParseError {
                fn from(err: $category) -> Self {
                    Self::new(err)
                }
            }
        )*
    };
}

impl_from_category!(
    ParseErrorKind,
    IOError,
    LexicalError,
    SyntaxError,
    SemanticError,
    SecurityError,
    FormatError,
);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "at line {}, column {}: {}", loc.line, loc.column, self.kind)?;
        } else {
            write!(f, "Error: {}", self.kind)?;
        }

        if let Some(ctx) = &self.context {
            write!(f, "\nContext: {}", ctx)?;
        }

        if let Some(source) = &self.source {
            write!(f, "\nCaused by: {}", source)?;
        }

        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn Error + 'static))
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
