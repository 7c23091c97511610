use tracing::debug;

use super::{
    config::ParserConfig,
    grammar,
    lexer::Lexer,
    model::Document,
    token::Token,
};
use crate::error::Result;

/// Text to [`Document`] in one place: size check, tokenization, matching.
#[derive(Debug)]
pub struct XmlParser {
    /// Tokens of the whole input
    tokens: Vec<Token>,
    /// Limits applied while matching
    config: ParserConfig,
}

impl XmlParser {
    pub fn new(input: &str) -> Result<Self> {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &str, config: ParserConfig) -> Result<Self> {
        // Check input size first
        config.validate_input_size(input.len())?;

        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self::from_tokens(tokens, config))
    }

    /// Wraps an already tokenized input.
    pub fn from_tokens(tokens: Vec<Token>, config: ParserConfig) -> Self {
        Self { tokens, config }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn parse(&self) -> Result<Document> {
        debug!(tokens = self.tokens.len(), config = %self.config, "parsing document");
        grammar::parse_with_config(&self.tokens, self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseErrorKind, SecurityError};
    use crate::parser::model::{Element, Node};

    #[test]
    fn test_parse_from_text() {
        let parser = XmlParser::new("<a>\n</a>").unwrap();
        assert_eq!(parser.tokens().len(), 8);
        let document = parser.parse().unwrap();
        assert_eq!(
            document.root,
            Element::new("a").with_children(vec![Node::text("\n")])
        );
    }

    #[test]
    fn test_size_checked_before_lexing() {
        // Unterminated comment would be a lexical error; the size error wins.
        let config = ParserConfig::default().with_max_size(4);
        let err = XmlParser::with_config("<!-- open", config).unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::Security(SecurityError::MaxSizeExceeded { max: 4 })
        ));
    }
}
