mod xml;

pub use self::xml::XmlFormatter;
use crate::{
    error::{FormatError, ParseError, Result},
    parser::model::Document,
};

/// Widest indentation unit accepted by [`FormatConfig::validate`]
pub const MAX_INDENT_SPACES: usize = 8;

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Number of spaces per nesting level
    pub indent_spaces: usize,
    /// Whether to print attributes sorted by key instead of document order
    pub sort_attributes: bool,
}

/// Default configuration for formatting
impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_spaces: 2,
            sort_attributes: false,
        }
    }
}

impl FormatConfig {
    pub fn with_indent_spaces(mut self, indent_spaces: usize) -> Self {
        self.indent_spaces = indent_spaces;
        self
    }

    pub fn with_sort_attributes(mut self, sort_attributes: bool) -> Self {
        self.sort_attributes = sort_attributes;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.indent_spaces > MAX_INDENT_SPACES {
            return Err(ParseError::new(FormatError::InvalidIndentation(format!(
                "{} spaces requested, at most {} allowed",
                self.indent_spaces, MAX_INDENT_SPACES
            ))));
        }
        Ok(())
    }
}

/// Trait for rendering a parsed document as text
pub trait Formatter {
    fn format(&self, document: &Document, config: &FormatConfig) -> Result<String>;
}
