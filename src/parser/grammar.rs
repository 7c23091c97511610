//! XML grammar wired over the [`Matcher`].
//!
//! ```text
//! root             := prolog? element TEXT?
//! prolog           := '<' '?' IDENTIFIER attribute* '?' '>'
//! node             := element | TEXT | COMMENT
//! element          := start-tag node* end-tag | self-closing-tag
//! start-tag        := '<' IDENTIFIER attribute* '>'
//! attribute        := IDENTIFIER '=' STRING_LITERAL
//! end-tag          := '<' '/' IDENTIFIER '>'
//! self-closing-tag := '<' IDENTIFIER attribute* '/' '>'
//! ```
//!
//! Spaces, tabs and line breaks are skipped between items. At the root level
//! text is skipped as well, so any text around the root element is accepted
//! and dropped.

use std::{fmt, panic, thread};

use tracing::debug;

use super::config::ParserConfig;
use super::matcher::{
    at_least, one, optional, ExpectedItem, Found, Grammar, Matched, Matcher, RuleMatch, Target,
};
use super::model::{Attributes, Document, Element, Node};
use super::token::{Token, TokenKind};
use crate::error::{IOError, ParseError, Result, SemanticError, SyntaxError};

const IGNORED_SPACE_TOKENS: &[TokenKind] =
    &[TokenKind::Space, TokenKind::Tab, TokenKind::Linebreak];

const IGNORED_ROOT_TOKENS: &[TokenKind] = &[
    TokenKind::Space,
    TokenKind::Tab,
    TokenKind::Linebreak,
    TokenKind::Text,
];

/// Prolog target accepted by the `prolog` rule
const PROLOG_TARGET: &str = "xml";

/// The XML rule table.
#[derive(Debug, Clone, Copy)]
pub struct XmlGrammar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Root,
    Prolog,
    Node,
    Element,
    StartTag,
    Attribute,
    EndTag,
    SelfClosingTag,
}

/// Name and attributes shared by start tags and self-closing tags
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// What each rule produces
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutput {
    Root(Document),
    Prolog(Attributes),
    Node(Node),
    Element(Element),
    StartTag(Tag),
    Attribute(Attribute),
    EndTag(String),
    SelfClosingTag(Tag),
}

type Slot<'t> = Vec<Matched<'t, RuleOutput>>;

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Root => "root",
            Self::Prolog => "prolog",
            Self::Node => "node",
            Self::Element => "element",
            Self::StartTag => "start-tag",
            Self::Attribute => "attribute",
            Self::EndTag => "end-tag",
            Self::SelfClosingTag => "self-closing-tag",
        };
        f.write_str(name)
    }
}

impl Grammar for XmlGrammar {
    type Rule = Rule;
    type Output = RuleOutput;

    fn apply(
        matcher: &mut Matcher<'_, Self>,
        rule: Rule,
        position: usize,
    ) -> Result<RuleMatch<RuleOutput>> {
        match rule {
            Rule::Root => root(matcher, position),
            Rule::Prolog => prolog(matcher, position),
            Rule::Node => node(matcher, position),
            Rule::Element => element(matcher, position),
            Rule::StartTag => start_tag(matcher, position),
            Rule::Attribute => attribute(matcher, position),
            Rule::EndTag => end_tag(matcher, position),
            Rule::SelfClosingTag => self_closing_tag(matcher, position),
        }
    }
}

/// Parses a complete token stream into a [`Document`].
pub fn parse(tokens: &[Token]) -> Result<Document> {
    parse_with_config(tokens, ParserConfig::default())
}

/// Same as [`parse`] with explicit limits.
///
/// Matching runs on a scoped thread with `config.stack_size` bytes of stack,
/// so the depth limit holds no matter which thread the caller is on.
pub fn parse_with_config(tokens: &[Token], config: ParserConfig) -> Result<Document> {
    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name("zxml-parser".to_string())
            .stack_size(config.stack_size)
            .spawn_scoped(scope, move || match_document(tokens, config))
            .map_err(|e| ParseError::new(IOError::ThreadSpawn(e.to_string())).with_source(e))?;
        handle
            .join()
            .unwrap_or_else(|payload| panic::resume_unwind(payload))
    })
}

fn match_document(tokens: &[Token], config: ParserConfig) -> Result<Document> {
    let mut matcher = Matcher::<XmlGrammar>::with_config(tokens, config);
    let Some((output, consumed)) = matcher.rule(Rule::Root, 0)? else {
        return Err(SyntaxError::NoRootFound.into());
    };

    if consumed != tokens.len() {
        let kinds = tokens
            .get(consumed..)
            .unwrap_or_default()
            .iter()
            .map(Token::kind)
            .collect();
        return Err(SyntaxError::ExtraneousTokens {
            position: consumed,
            kinds,
        }
        .into());
    }

    let document = expect(output.into_document(), Rule::Root)?;
    debug!(tokens = tokens.len(), "parse finished");
    Ok(document)
}

fn token(kind: TokenKind) -> Target<Rule> {
    Target::Token(kind)
}

fn rule(rule: Rule) -> Target<Rule> {
    Target::Rule(rule)
}

fn root(matcher: &mut Matcher<'_, XmlGrammar>, position: usize) -> Result<RuleMatch<RuleOutput>> {
    let found = matcher.find(
        position,
        &[
            optional(rule(Rule::Prolog)),
            one(rule(Rule::Element)),
            optional(token(TokenKind::Text)),
        ],
        IGNORED_ROOT_TOKENS,
    )?;
    unwind(found, Rule::Root, |captures| {
        let prolog = captures
            .optional_output()?
            .map(|output| expect(output.into_prolog(), Rule::Root))
            .transpose()?;
        let root = expect(captures.output()?.into_element(), Rule::Root)?;
        Ok(RuleOutput::Root(Document { prolog, root }))
    })
}

fn prolog(matcher: &mut Matcher<'_, XmlGrammar>, position: usize) -> Result<RuleMatch<RuleOutput>> {
    let found = matcher.find(
        position,
        &[
            one(token(TokenKind::LeftBracket)),
            one(token(TokenKind::QuestionMark)),
            one(token(TokenKind::Identifier)),
            at_least(0, rule(Rule::Attribute)),
            one(token(TokenKind::QuestionMark)),
            one(token(TokenKind::RightBracket)),
        ],
        IGNORED_SPACE_TOKENS,
    )?;
    unwind(found, Rule::Prolog, |captures| {
        captures.skip(2)?;
        let target = captures.identifier()?;
        if target != PROLOG_TARGET {
            return Err(SemanticError::PrologTarget { found: target }.into());
        }
        Ok(RuleOutput::Prolog(captures.attributes()?))
    })
}

/// Tries each alternative in declaration order and keeps the first match.
fn node(matcher: &mut Matcher<'_, XmlGrammar>, position: usize) -> Result<RuleMatch<RuleOutput>> {
    let alternatives = [
        rule(Rule::Element),
        token(TokenKind::Text),
        token(TokenKind::Comment),
    ];

    for alternative in alternatives {
        let found = matcher.find(position, &[one(alternative)], IGNORED_SPACE_TOKENS)?;
        let matched = unwind(found, Rule::Node, |captures| {
            let node = match captures.single()? {
                Matched::Rule(output) => Node::Element(expect(output.into_element(), Rule::Node)?),
                Matched::Token(Token::Text(text)) => Node::Text(text.clone()),
                Matched::Token(Token::Comment(content)) => Node::Comment(content.clone()),
                Matched::Token(_) => return Err(malformed(Rule::Node)),
            };
            Ok(RuleOutput::Node(node))
        })?;
        if matched.is_some() {
            return Ok(matched);
        }
    }
    Ok(None)
}

/// An ordinary element wins over a self-closing one when both match.
fn element(
    matcher: &mut Matcher<'_, XmlGrammar>,
    position: usize,
) -> Result<RuleMatch<RuleOutput>> {
    let ordinary = matcher.find(
        position,
        &[
            one(rule(Rule::StartTag)),
            at_least(0, rule(Rule::Node)),
            one(rule(Rule::EndTag)),
        ],
        IGNORED_SPACE_TOKENS,
    )?;
    let ordinary = unwind(ordinary, Rule::Element, |captures| {
        let start = expect(captures.output()?.into_tag(), Rule::Element)?;
        let children = captures
            .outputs()?
            .into_iter()
            .map(|output| expect(output.into_node(), Rule::Element))
            .collect::<Result<Vec<_>>>()?;
        let end = expect(captures.output()?.into_end_tag(), Rule::Element)?;
        if start.name != end {
            return Err(SemanticError::MismatchedTags {
                start: start.name,
                end,
            }
            .into());
        }
        Ok(RuleOutput::Element(Element {
            tag: start.name,
            attributes: start.attributes,
            children: Some(children),
        }))
    })?;
    if ordinary.is_some() {
        return Ok(ordinary);
    }

    let self_closing = matcher.find(
        position,
        &[one(rule(Rule::SelfClosingTag))],
        IGNORED_SPACE_TOKENS,
    )?;
    unwind(self_closing, Rule::Element, |captures| {
        let tag = expect(captures.output()?.into_tag(), Rule::Element)?;
        Ok(RuleOutput::Element(Element {
            tag: tag.name,
            attributes: tag.attributes,
            children: None,
        }))
    })
}

fn start_tag(
    matcher: &mut Matcher<'_, XmlGrammar>,
    position: usize,
) -> Result<RuleMatch<RuleOutput>> {
    let found = matcher.find(position, &tag_sequence(&[]), IGNORED_SPACE_TOKENS)?;
    unwind(found, Rule::StartTag, |captures| {
        Ok(RuleOutput::StartTag(captures.tag()?))
    })
}

fn self_closing_tag(
    matcher: &mut Matcher<'_, XmlGrammar>,
    position: usize,
) -> Result<RuleMatch<RuleOutput>> {
    let found = matcher.find(
        position,
        &tag_sequence(&[one(token(TokenKind::Slash))]),
        IGNORED_SPACE_TOKENS,
    )?;
    unwind(found, Rule::SelfClosingTag, |captures| {
        Ok(RuleOutput::SelfClosingTag(captures.tag()?))
    })
}

/// `'<' IDENTIFIER attribute* <before_close> '>'`
fn tag_sequence(before_close: &[ExpectedItem<Rule>]) -> Vec<ExpectedItem<Rule>> {
    let mut sequence = vec![
        one(token(TokenKind::LeftBracket)),
        one(token(TokenKind::Identifier)),
        at_least(0, rule(Rule::Attribute)),
    ];
    sequence.extend_from_slice(before_close);
    sequence.push(one(token(TokenKind::RightBracket)));
    sequence
}

fn attribute(
    matcher: &mut Matcher<'_, XmlGrammar>,
    position: usize,
) -> Result<RuleMatch<RuleOutput>> {
    let found = matcher.find(
        position,
        &[
            one(token(TokenKind::Identifier)),
            one(token(TokenKind::Equal)),
            one(token(TokenKind::StringLiteral)),
        ],
        IGNORED_SPACE_TOKENS,
    )?;
    unwind(found, Rule::Attribute, |captures| {
        let key = captures.identifier()?;
        captures.skip(1)?;
        let value = match captures.single()? {
            Matched::Token(Token::StringLiteral(value)) => value.clone(),
            _ => return Err(malformed(Rule::Attribute)),
        };
        Ok(RuleOutput::Attribute(Attribute { key, value }))
    })
}

fn end_tag(
    matcher: &mut Matcher<'_, XmlGrammar>,
    position: usize,
) -> Result<RuleMatch<RuleOutput>> {
    let found = matcher.find(
        position,
        &[
            one(token(TokenKind::LeftBracket)),
            one(token(TokenKind::Slash)),
            one(token(TokenKind::Identifier)),
            one(token(TokenKind::RightBracket)),
        ],
        IGNORED_SPACE_TOKENS,
    )?;
    unwind(found, Rule::EndTag, |captures| {
        captures.skip(2)?;
        Ok(RuleOutput::EndTag(captures.identifier()?))
    })
}

/// Maps a successful match through `build`, keeping the consumed count.
fn unwind<'t>(
    found: Option<Found<'t, RuleOutput>>,
    rule: Rule,
    build: impl FnOnce(&mut Captures<'t>) -> Result<RuleOutput>,
) -> Result<RuleMatch<RuleOutput>> {
    let Some(found) = found else {
        return Ok(None);
    };
    let mut captures = Captures {
        rule,
        slots: found.outputs.into_iter(),
    };
    Ok(Some((build(&mut captures)?, found.consumed)))
}

fn expect<T>(value: Option<T>, rule: Rule) -> Result<T> {
    value.ok_or_else(|| malformed(rule))
}

fn malformed(rule: Rule) -> ParseError {
    SyntaxError::MalformedCapture {
        rule: rule.to_string(),
    }
    .into()
}

/// Walks the capture slots of a match in sequence order.
struct Captures<'t> {
    rule: Rule,
    slots: std::vec::IntoIter<Slot<'t>>,
}

impl<'t> Captures<'t> {
    fn slot(&mut self) -> Result<Slot<'t>> {
        let rule = self.rule;
        self.slots.next().ok_or_else(|| malformed(rule))
    }

    fn skip(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.slot()?;
        }
        Ok(())
    }

    /// The only value of a slot matched exactly once.
    fn single(&mut self) -> Result<Matched<'t, RuleOutput>> {
        let rule = self.rule;
        self.slot()?.into_iter().next().ok_or_else(|| malformed(rule))
    }

    fn outputs(&mut self) -> Result<Vec<RuleOutput>> {
        let rule = self.rule;
        self.slot()?
            .into_iter()
            .map(|matched| match matched {
                Matched::Rule(output) => Ok(output),
                Matched::Token(_) => Err(malformed(rule)),
            })
            .collect()
    }

    fn optional_output(&mut self) -> Result<Option<RuleOutput>> {
        Ok(self.outputs()?.into_iter().next())
    }

    fn output(&mut self) -> Result<RuleOutput> {
        let rule = self.rule;
        self.optional_output()?.ok_or_else(|| malformed(rule))
    }

    fn identifier(&mut self) -> Result<String> {
        match self.single()? {
            Matched::Token(Token::Identifier(name)) => Ok(name.clone()),
            _ => Err(malformed(self.rule)),
        }
    }

    /// Folds the `attribute*` slot into a map; a repeated key keeps the last value.
    fn attributes(&mut self) -> Result<Attributes> {
        let rule = self.rule;
        let mut attributes = Attributes::new();
        for output in self.outputs()? {
            let attribute = expect(output.into_attribute(), rule)?;
            attributes.insert(attribute.key, attribute.value);
        }
        Ok(attributes)
    }

    /// `'<' IDENTIFIER attribute* ...`
    fn tag(&mut self) -> Result<Tag> {
        self.skip(1)?;
        let name = self.identifier()?;
        let attributes = self.attributes()?;
        Ok(Tag { name, attributes })
    }
}

impl RuleOutput {
    pub fn into_document(self) -> Option<Document> {
        match self {
            Self::Root(document) => Some(document),
            _ => None,
        }
    }

    pub fn into_prolog(self) -> Option<Attributes> {
        match self {
            Self::Prolog(attributes) => Some(attributes),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_element(self) -> Option<Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn into_tag(self) -> Option<Tag> {
        match self {
            Self::StartTag(tag) | Self::SelfClosingTag(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn into_attribute(self) -> Option<Attribute> {
        match self {
            Self::Attribute(attribute) => Some(attribute),
            _ => None,
        }
    }

    pub fn into_end_tag(self) -> Option<String> {
        match self {
            Self::EndTag(name) => Some(name),
            _ => None,
        }
    }
}
