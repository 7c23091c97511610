#![no_main]
use libfuzzer_sys::fuzz_target;
use zxml::parser::XmlParser;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(parser) = XmlParser::new(s) {
            let _ = parser.parse();
        }
    }
});
