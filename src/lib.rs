//! zxml: a parser and canonical formatter for a small XML subset
//!
//! This crate provides functionality to:
//! - Tokenize XML-subset text with a two-mode lexer
//! - Match token streams against a grammar with a backtracking, longest-match engine
//! - Build a document tree (prolog, elements, text, comments)
//! - Pretty print parsed documents
//! - Handle errors with detailed context
//!
//! # Examples
//! ```
//! use zxml::{parse_xml, format_xml, Result};
//!
//! fn example() -> Result<()> {
//!     let document = parse_xml("<a><b/></a>")?;
//!     assert_eq!(format_xml(&document)?, "<a>\n  <b/>\n</a>\n");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

use tracing::{debug, instrument};

pub mod error;
pub mod formatter;
pub mod parser;
pub mod test_utils;
pub mod utils;

// Re-exports
pub use error::{ParseError, ParseErrorKind, Result};
pub use formatter::{FormatConfig, Formatter, XmlFormatter};
pub use parser::{
    config::ParserConfig,
    grammar::{parse, parse_with_config},
    lexer::{tokenize, Lexer},
    model::{Attributes, Document, Element, Node},
    token::{Token, TokenKind},
    xml::XmlParser,
};
pub use utils::{format_xml, parse_xml};

pub fn parse_file(path: &str) -> Result<Document> {
    parse_file_with_config(path, ParserConfig::default())
}

#[instrument(skip(config))]
pub fn parse_file_with_config(path: &str, config: ParserConfig) -> Result<Document> {
    debug!("Starting to parse file: {}", path);

    let content = utils::read_file(path)?;
    let document = utils::parse_xml_with_config(&content, config)?;

    debug!("Parsing completed");
    Ok(document)
}
