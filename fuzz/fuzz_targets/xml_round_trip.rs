#![no_main]
use libfuzzer_sys::fuzz_target;
use zxml::{format_xml, parse_xml, test_utils::assert_documents_equivalent};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(document) = parse_xml(s) {
            if let Ok(formatted) = format_xml(&document) {
                let reparsed = parse_xml(&formatted).unwrap();
                assert_documents_equivalent(
                    &document,
                    &reparsed,
                    "round trip changed the document",
                );
            }
        }
    }
});
