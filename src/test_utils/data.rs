use std::fs;

use crate::error::{IOError, ParseError, ParseErrorKind, Result};

pub const TEST_FILES: [&str; 3] = [
    "tests/input/simple.xml",
    "tests/input/file.xml",
    "tests/input/large.xml",
];

pub const INVALID_XML_SAMPLES: [(&str, &str); 6] = [
    ("<a x=\"open", "Unterminated string"),
    ("<!-- open", "Unterminated comment"),
    ("<a></b>", "Mismatched tags"),
    ("<?notxml?><a/>", "Wrong prolog target"),
    ("<a/><b/>", "Two root elements"),
    ("just text", "No root element"),
];

pub struct TestData {
    pub simple_xml: String,
    pub medium_xml: String,
    pub large_xml: String,
}

impl TestData {
    pub fn load() -> Result<Self> {
        Ok(Self {
            simple_xml: read_test_file("tests/input/simple.xml")?,
            medium_xml: read_test_file("tests/input/file.xml")?,
            large_xml: read_test_file("tests/input/large.xml")?,
        })
    }
}

pub fn read_test_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ParseError::new(ParseErrorKind::IO(IOError::ReadError(format!(
            "Failed to read {}: {}",
            path, e
        ))))
    })
}
