pub mod config;
pub mod grammar;
pub mod lexer;
pub mod matcher;
pub mod model;
pub mod token;
pub mod xml;

pub use grammar::{parse, parse_with_config, XmlGrammar};
pub use lexer::{tokenize, Lexer};
pub use model::{Attributes, Document, Element, Node};
pub use token::{Token, TokenKind};
pub use xml::XmlParser;
