use std::fmt;

/// A lexical unit of the XML subset.
///
/// Payload-free variants are structural; the rest carry the exact text they
/// were scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LeftBracket,  // <
    RightBracket, // >
    Slash,        // /
    Equal,        // =
    QuestionMark, // ?
    Space,
    Tab,
    Linebreak,
    /// Bare name inside a tag
    Identifier(String),
    /// Double-quoted value, quotes included and escapes left as written
    StringLiteral(String),
    /// Raw character data between tags
    Text(String),
    /// Text between `<!--` and `-->`
    Comment(String),
}

/// Discriminant of a [`Token`], used by grammar rules to say what they expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftBracket,
    RightBracket,
    Slash,
    Equal,
    QuestionMark,
    Space,
    Tab,
    Linebreak,
    Identifier,
    StringLiteral,
    Text,
    Comment,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::LeftBracket => TokenKind::LeftBracket,
            Self::RightBracket => TokenKind::RightBracket,
            Self::Slash => TokenKind::Slash,
            Self::Equal => TokenKind::Equal,
            Self::QuestionMark => TokenKind::QuestionMark,
            Self::Space => TokenKind::Space,
            Self::Tab => TokenKind::Tab,
            Self::Linebreak => TokenKind::Linebreak,
            Self::Identifier(_) => TokenKind::Identifier,
            Self::StringLiteral(_) => TokenKind::StringLiteral,
            Self::Text(_) => TokenKind::Text,
            Self::Comment(_) => TokenKind::Comment,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LeftBracket => "'<'",
            Self::RightBracket => "'>'",
            Self::Slash => "'/'",
            Self::Equal => "'='",
            Self::QuestionMark => "'?'",
            Self::Space => "SPACE",
            Self::Tab => "TAB",
            Self::Linebreak => "LINEBREAK",
            Self::Identifier => "IDENTIFIER",
            Self::StringLiteral => "STRING_LITERAL",
            Self::Text => "TEXT",
            Self::Comment => "COMMENT",
        };
        f.write_str(name)
    }
}
