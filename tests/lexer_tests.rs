#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

#[cfg(test)]
mod lexer_tests {
    use zxml::test_utils::*;

    fn ident(name: &str) -> Token {
        Token::Identifier(name.to_string())
    }

    fn lexical_error(input: &str) -> LexicalError {
        match tokenize(input).unwrap_err().kind() {
            ParseErrorKind::Lexical(err) => err.clone(),
            other => panic!("Expected lexical error for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_empty_input() -> Result<()> {
        assert!(tokenize("")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_element_with_attribute() -> Result<()> {
        let tokens = tokenize("<a x=\"1\">hi</a>")?;
        assert_eq!(
            tokens,
            vec![
                Token::LeftBracket,
                ident("a"),
                Token::Space,
                ident("x"),
                Token::Equal,
                Token::StringLiteral("\"1\"".to_string()),
                Token::RightBracket,
                Token::Text("hi".to_string()),
                Token::LeftBracket,
                Token::Slash,
                ident("a"),
                Token::RightBracket,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_prolog_tokens() -> Result<()> {
        let kinds: Vec<TokenKind> = tokenize("<?xml v=\"1\"?>")?
            .iter()
            .map(Token::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftBracket,
                TokenKind::QuestionMark,
                TokenKind::Identifier,
                TokenKind::Space,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::StringLiteral,
                TokenKind::QuestionMark,
                TokenKind::RightBracket,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_whitespace_inside_tags() -> Result<()> {
        let tokens = tokenize("<a\t\n\r\n >")?;
        assert_eq!(
            tokens,
            vec![
                Token::LeftBracket,
                ident("a"),
                Token::Tab,
                Token::Linebreak,
                Token::Linebreak,
                Token::Space,
                Token::RightBracket,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_whitespace_between_tags_is_text() -> Result<()> {
        let tokens = tokenize("<a>\n  <b/>")?;
        assert_eq!(tokens.get(3), Some(&Token::Text("\n  ".to_string())));
        Ok(())
    }

    #[test]
    fn test_comment_content_is_raw() -> Result<()> {
        assert_eq!(
            tokenize("<!-- hi -->")?,
            vec![Token::Comment(" hi ".to_string())]
        );
        assert_eq!(
            tokenize("<!--<a>-->")?,
            vec![Token::Comment("<a>".to_string())]
        );
        Ok(())
    }

    #[test]
    fn test_text_never_contains_bracket() -> Result<()> {
        for token in tokenize("one<a>two</a>three")? {
            if let Token::Text(text) = token {
                assert!(!text.contains('<'));
            }
        }
        Ok(())
    }

    #[test]
    fn test_unterminated_constructs() {
        assert_eq!(lexical_error("<a x=\"open"), LexicalError::UnterminatedString);
        assert_eq!(lexical_error("<!-- never closed"), LexicalError::UnterminatedComment);
        assert_eq!(lexical_error("<abc"), LexicalError::UnterminatedIdentifier);
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(lexical_error("<a & b>"), LexicalError::UnexpectedCharacter('&'));
        assert_eq!(lexical_error("<a x='1'>"), LexicalError::UnexpectedCharacter('\''));
    }

    #[test]
    fn test_error_reports_location_and_fragment() {
        let err = tokenize("<root>\n  <child id=\"x>\n").unwrap_err();
        let location = err.location().unwrap();
        assert_eq!((location.line, location.column), (2, 13));
        assert_eq!(err.context(), Some("\"x>\n"));
        assert!(err.to_string().starts_with("at line 2, column 13"));
    }

    #[test]
    fn test_lexer_iterator() -> Result<()> {
        let tokens: Vec<Token> = Lexer::new("<a/>").collect::<Result<_>>()?;
        assert_eq!(tokens.len(), 4);
        Ok(())
    }
}
