use crate::{
    error::{IOError, ParseError, ParseErrorKind, Result},
    formatter::{FormatConfig, Formatter, XmlFormatter},
    parser::{config::ParserConfig, model::Document, xml::XmlParser},
};
use std::fs;

pub fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            ParseError::new(ParseErrorKind::IO(IOError::FileNotFound(path.to_string())))
        }
        std::io::ErrorKind::PermissionDenied => ParseError::new(ParseErrorKind::IO(
            IOError::PermissionDenied(path.to_string()),
        )),
        _ => ParseError::new(ParseErrorKind::IO(IOError::ReadError(e.to_string()))).with_source(e),
    })
}

pub fn write_file(path: &str, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ParseError::new(ParseErrorKind::IO(
            IOError::PermissionDenied(path.to_string()),
        )),
        _ => ParseError::new(ParseErrorKind::IO(IOError::WriteError(e.to_string()))).with_source(e),
    })
}

pub fn parse_xml(content: &str) -> Result<Document> {
    parse_xml_with_config(content, ParserConfig::default())
}

pub fn parse_xml_with_config(content: &str, config: ParserConfig) -> Result<Document> {
    XmlParser::with_config(content, config)?.parse()
}

pub fn format_xml(document: &Document) -> Result<String> {
    format_xml_with_config(document, &FormatConfig::default())
}

pub fn format_xml_with_config(document: &Document, config: &FormatConfig) -> Result<String> {
    XmlFormatter.format(document, config)
}
