#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

#[cfg(test)]
mod parser_tests {
    use zxml::test_utils::*;

    fn quoted(value: &str) -> String {
        format!("\"{}\"", value)
    }

    fn parse_error(input: &str) -> ParseErrorKind {
        match parse_xml(input) {
            Ok(document) => panic!("Expected {:?} to fail, got {:?}", input, document),
            Err(err) => err.kind().clone(),
        }
    }

    #[test]
    fn test_self_closing_versus_empty() -> Result<()> {
        let self_closing = parse_xml("<a/>")?;
        assert_eq!(self_closing.root.children, None);

        let empty = parse_xml("<a></a>")?;
        assert_eq!(empty.root.children, Some(vec![]));

        assert_ne!(self_closing, empty);
        Ok(())
    }

    #[test]
    fn test_nested_structure() -> Result<()> {
        let document = parse_xml("<a><b/><c>text</c></a>")?;
        let expected = Element::new("a").with_children(vec![
            Element::new("b").into(),
            Element::new("c")
                .with_children(vec![Node::text("text")])
                .into(),
        ]);
        assert_eq!(document, Document::new(expected));
        Ok(())
    }

    #[test]
    fn test_duplicate_attribute_last_write_wins() -> Result<()> {
        let document = parse_xml("<a x=\"1\" x=\"2\"/>")?;
        assert_eq!(document.root.attributes.len(), 1);
        assert_eq!(document.root.attributes.get("x"), Some(&quoted("2")));
        Ok(())
    }

    #[test]
    fn test_attribute_values_keep_quotes_and_escapes() -> Result<()> {
        let document = parse_xml(r#"<a title="say \"hi\""/>"#)?;
        assert_eq!(
            document.root.attributes.get("title"),
            Some(&r#""say \"hi\"""#.to_string())
        );
        Ok(())
    }

    #[test]
    fn test_comment_preserves_raw_content() -> Result<()> {
        let document = parse_xml("<a><!-- hi --></a>")?;
        assert_eq!(document.root.children(), &[Node::comment(" hi ")]);
        Ok(())
    }

    #[test]
    fn test_prolog() -> Result<()> {
        let document = parse_xml("<?xml version=\"1.0\"?><a/>")?;
        let mut expected = Attributes::new();
        expected.insert("version".to_string(), quoted("1.0"));
        assert_eq!(document.prolog, Some(expected));
        Ok(())
    }

    #[test]
    fn test_prolog_without_attributes() -> Result<()> {
        let document = parse_xml("<?xml?><a/>")?;
        assert_eq!(document.prolog, Some(Attributes::new()));
        Ok(())
    }

    #[test]
    fn test_prolog_target_mismatch() {
        assert_eq!(
            parse_error("<?notxml?><a/>"),
            ParseErrorKind::Semantic(SemanticError::PrologTarget {
                found: "notxml".to_string()
            })
        );
    }

    #[test]
    fn test_mismatched_tags() {
        assert_eq!(
            parse_error("<a></b>"),
            ParseErrorKind::Semantic(SemanticError::MismatchedTags {
                start: "a".to_string(),
                end: "b".to_string(),
            })
        );
    }

    #[test]
    fn test_unterminated_string_fails_in_lexer() {
        assert_eq!(
            parse_error("<a x=\"open"),
            ParseErrorKind::Lexical(LexicalError::UnterminatedString)
        );
    }

    #[test]
    fn test_whitespace_inside_tags() -> Result<()> {
        let document = parse_xml("< a\n\tx = \"1\"\n/ >")?;
        assert_eq!(
            document,
            Document::new(Element::new("a").with_attribute("x", quoted("1")))
        );

        let document = parse_xml("<a ></a\t>")?;
        assert_eq!(document.root.children, Some(vec![]));
        Ok(())
    }

    #[test]
    fn test_text_around_root_is_ignored() -> Result<()> {
        let document = parse_xml("leading\n<?xml?>\n<a/>\ntrailing text\n")?;
        assert_eq!(document.root, Element::new("a"));
        assert!(document.prolog.is_some());
        Ok(())
    }

    #[test]
    fn test_whitespace_text_children_are_kept() -> Result<()> {
        let document = parse_xml("<a>\n  <b/>\n</a>")?;
        assert_eq!(
            document.root.children(),
            &[
                Node::text("\n  "),
                Element::new("b").into(),
                Node::text("\n"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_extraneous_tokens() {
        match parse_error("<a/></a>") {
            ParseErrorKind::Syntax(SyntaxError::ExtraneousTokens { position, kinds }) => {
                assert_eq!(position, 4);
                assert_eq!(
                    kinds,
                    vec![
                        TokenKind::LeftBracket,
                        TokenKind::Slash,
                        TokenKind::Identifier,
                        TokenKind::RightBracket,
                    ]
                );
            }
            other => panic!("Expected extraneous tokens, got {:?}", other),
        }
    }

    #[test]
    fn test_comment_before_root_is_rejected() {
        assert_eq!(
            parse_error("<!-- header --><a/>"),
            ParseErrorKind::Syntax(SyntaxError::NoRootFound)
        );
    }

    #[test]
    fn test_invalid_samples() {
        for (input, description) in INVALID_XML_SAMPLES {
            assert!(parse_xml(input).is_err(), "{} should fail", description);
        }
    }

    #[test]
    fn test_fixture_files_parse_completely() -> Result<()> {
        for path in TEST_FILES {
            let content = read_file(path)?;
            let tokens = tokenize(&content)?;
            let document = parse(&tokens)?;
            assert!(!document.root.tag.is_empty(), "{} parsed to nothing", path);
        }
        Ok(())
    }

    #[test]
    fn test_simple_fixture_structure() -> Result<()> {
        let test_data = TestData::load()?;
        let document = parse_xml(&test_data.simple_xml)?;

        assert_eq!(document.root.tag, "note");
        assert_eq!(document.root.attributes.get("priority"), Some(&quoted("high")));

        let tags: Vec<&str> = document
            .root
            .children()
            .iter()
            .filter_map(Node::as_element)
            .map(|element| element.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["to", "from", "heading", "body", "attachment"]);
        assert!(document
            .root
            .children()
            .contains(&Node::comment(" reminder ")));
        Ok(())
    }

    #[test]
    fn test_namespaced_names() -> Result<()> {
        let test_data = TestData::load()?;
        let document = parse_xml(&test_data.medium_xml)?;
        assert_eq!(document.root.tag, "catalog");
        assert!(document.root.attributes.contains_key("xmlns:bk"));
        let books = document
            .root
            .children()
            .iter()
            .filter_map(Node::as_element)
            .filter(|element| element.tag == "bk:book")
            .count();
        assert_eq!(books, 3);
        Ok(())
    }

    #[test]
    fn test_memoization_does_not_change_result() -> Result<()> {
        let test_data = TestData::load()?;
        let tokens = tokenize(&test_data.medium_xml)?;
        let cached = parse_with_config(&tokens, ParserConfig::default())?;
        let uncached = parse_with_config(&tokens, ParserConfig::default().with_memoize(false))?;
        assert_eq!(cached, uncached);
        Ok(())
    }

    #[test]
    fn test_xml_parser_entry_point() -> Result<()> {
        let parser = XmlParser::new("<a><b/></a>")?;
        assert_eq!(parser.tokens().len(), 11);
        assert_eq!(parser.parse()?, parse(parser.tokens())?);
        Ok(())
    }
}
