//! Lexical analyzer for the XML subset.
//!
//! The lexer is a two-mode state machine. In [`Mode::Content`] it produces
//! text runs, comments and the `<` that opens a tag; inside a tag
//! ([`Mode::WithinTag`]) it produces punctuation, whitespace markers,
//! identifiers and string literals until `>` switches it back.

use tracing::debug;

use super::token::Token;
use crate::error::{LexicalError, ParseError, Result};

const COMMENT_OPEN: [char; 4] = ['<', '!', '-', '-'];
const COMMENT_CLOSE: [char; 3] = ['-', '-', '>'];
/// Number of characters shown in error context
const FRAGMENT_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Between tags
    Content,
    /// After `<` and before the matching `>`
    WithinTag,
}

#[derive(Debug)]
pub struct Lexer {
    /// Input text as a character array
    input: Vec<char>,
    /// Current position in the input
    position: usize,
    mode: Mode,
    /// Location tracking for error messages
    line: usize,
    column: usize,
}

/// Tokenizes `text` in a single left-to-right pass.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    Lexer::new(text).tokenize()
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            mode: Mode::Content,
            line: 1,
            column: 1,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Consumes the lexer, collecting every token.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        debug!(count = tokens.len(), "tokenization finished");
        Ok(tokens)
    }

    /// Produces the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        let Some(first) = self.current() else {
            return Ok(None);
        };
        let start = self.position;

        let token = match self.mode {
            Mode::Content => self.read_content(first)?,
            Mode::WithinTag => self.read_within_tag(first)?,
        };

        if self.position <= start {
            return Err(ParseError::new(LexicalError::NoProgress { position: start })
                .with_location(self.line, self.column));
        }
        Ok(Some(token))
    }

    fn read_content(&mut self, first: char) -> Result<Token> {
        if first != '<' {
            let end = self.find_from(self.position + 1, &['<']).unwrap_or(self.input.len());
            let text = self.slice(self.position, end);
            self.advance_to(end);
            return Ok(Token::Text(text));
        }

        if self.matches_at(self.position, &COMMENT_OPEN) {
            let content_start = self.position + COMMENT_OPEN.len();
            let Some(content_end) = self.find_from(content_start, &COMMENT_CLOSE) else {
                return Err(self.error(LexicalError::UnterminatedComment));
            };
            let content = self.slice(content_start, content_end);
            self.advance_to(content_end + COMMENT_CLOSE.len());
            return Ok(Token::Comment(content));
        }

        self.advance();
        self.mode = Mode::WithinTag;
        Ok(Token::LeftBracket)
    }

    fn read_within_tag(&mut self, first: char) -> Result<Token> {
        match first {
            '>' => {
                self.advance();
                self.mode = Mode::Content;
                Ok(Token::RightBracket)
            }
            '/' => Ok(self.single(Token::Slash)),
            '?' => Ok(self.single(Token::QuestionMark)),
            '=' => Ok(self.single(Token::Equal)),
            ' ' => Ok(self.single(Token::Space)),
            '\t' => Ok(self.single(Token::Tab)),
            '\r' => {
                self.advance();
                if self.current() == Some('\n') {
                    self.advance();
                }
                Ok(Token::Linebreak)
            }
            '\n' => Ok(self.single(Token::Linebreak)),
            '"' => self.read_string_literal(),
            c if is_identifier_start(c) => self.read_identifier(),
            c => Err(self.error(LexicalError::UnexpectedCharacter(c))),
        }
    }

    /// Scans a double-quoted literal. A backslash escapes the character after
    /// it; the payload keeps both quotes and the escapes as written.
    fn read_string_literal(&mut self) -> Result<Token> {
        let mut end = self.position + 1;
        loop {
            match self.input.get(end) {
                Some('"') => break,
                Some('\\') => end += 2,
                Some(_) => end += 1,
                None => return Err(self.error(LexicalError::UnterminatedString)),
            }
        }
        end += 1;

        let literal = self.slice(self.position, end);
        self.advance_to(end);
        Ok(Token::StringLiteral(literal))
    }

    fn read_identifier(&mut self) -> Result<Token> {
        let mut end = self.position + 1;
        loop {
            match self.input.get(end) {
                Some(&c) if is_identifier_char(c) => end += 1,
                Some(_) => break,
                None => return Err(self.error(LexicalError::UnterminatedIdentifier)),
            }
        }

        let name = self.slice(self.position, end);
        self.advance_to(end);
        Ok(Token::Identifier(name))
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    fn advance_to(&mut self, end: usize) {
        while self.position < end && self.position < self.input.len() {
            self.advance();
        }
    }

    fn matches_at(&self, at: usize, pattern: &[char]) -> bool {
        self.input.get(at..at + pattern.len()) == Some(pattern)
    }

    fn find_from(&self, from: usize, pattern: &[char]) -> Option<usize> {
        let last_start = self.input.len().checked_sub(pattern.len())?;
        (from..=last_start).find(|&at| self.matches_at(at, pattern))
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input
            .get(start..end)
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }

    fn error(&self, kind: LexicalError) -> ParseError {
        let end = (self.position + FRAGMENT_LENGTH).min(self.input.len());
        ParseError::new(kind)
            .with_location(self.line, self.column)
            .with_context(self.slice(self.position, end))
    }
}

impl Iterator for Lexer {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                // Fuse after the first error.
                self.position = self.input.len();
                Some(Err(err))
            }
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-')
}
