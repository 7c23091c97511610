mod comparison;
mod data;

pub use comparison::{assert_documents_equivalent, documents_equivalent, normalize};
pub use data::{TestData, INVALID_XML_SAMPLES, TEST_FILES};

// Re-export common test types/traits
pub use crate::{
    error::{
        FormatError, IOError, LexicalError, ParseError, ParseErrorKind, Result, SecurityError,
        SemanticError, SyntaxError,
    },
    formatter::{FormatConfig, Formatter, XmlFormatter},
    parse_file, parse_file_with_config,
    parser::{
        config::{
            ParserConfig, ParsingContext, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE, DEFAULT_STACK_SIZE,
        },
        grammar::{parse, parse_with_config, Rule, RuleOutput, XmlGrammar},
        lexer::{tokenize, Lexer, Mode},
        matcher::{
            at_least, at_most, one, optional, ExpectedItem, Found, Grammar, Matched, Matcher,
            RuleMatch, Target,
        },
        model::{Attributes, Document, Element, Node},
        token::{Token, TokenKind},
        xml::XmlParser,
    },
    utils::{
        format_xml, format_xml_with_config, parse_xml, parse_xml_with_config, read_file,
        write_file,
    },
};
