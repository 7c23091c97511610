//! Rule-driven backtracking sequence matcher.
//!
//! A grammar is a closed set of rules, each of which describes what it
//! expects as a sequence of [`ExpectedItem`]s. An item targets either a token
//! kind or another rule and carries a repetition range. [`Matcher::find`]
//! matches such a sequence against the token stream starting at a position,
//! always keeping the longest match:
//!
//! 1. An item whose maximum is exhausted fails.
//! 2. Ignorable tokens in front of the item are skipped (and counted).
//! 3. The item's target is tried once.
//! 4. A failed attempt on a required item fails the whole sequence.
//! 5. Two continuations are explored: *repeat* the same item (only after a
//!    successful attempt, with the range shrunk by one) and *advance* to the
//!    rest of the sequence (only once the minimum is satisfied). The one that
//!    consumes more tokens wins; a tie goes to repeat.
//!
//! Rules themselves are supplied by a [`Grammar`] implementation, which runs
//! `find` with its own sequence and turns the captures into its output type.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::trace;

use super::config::{ParserConfig, ParsingContext};
use super::token::{Token, TokenKind};
use crate::error::Result;

/// Result of a successful rule invocation: the rule's output and the number
/// of tokens it consumed.
pub type RuleMatch<O> = Option<(O, usize)>;

/// A closed set of named rules driven by the [`Matcher`].
pub trait Grammar: Sized {
    type Rule: Copy + Eq + Hash + fmt::Debug;
    type Output: Clone;

    /// Matches `rule` against the tokens starting at `position`.
    ///
    /// `Ok(None)` is an ordinary non-match the caller may backtrack from; an
    /// `Err` aborts the whole parse.
    fn apply(
        matcher: &mut Matcher<'_, Self>,
        rule: Self::Rule,
        position: usize,
    ) -> Result<RuleMatch<Self::Output>>;
}

/// What an expected item matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<R> {
    Token(TokenKind),
    Rule(R),
}

/// One element of an expected sequence.
///
/// Constructed through [`one`], [`optional`], [`at_least`] and [`at_most`], so
/// `minimum <= maximum` whenever a maximum is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedItem<R> {
    minimum: usize,
    maximum: Option<usize>,
    target: Target<R>,
}

/// Exactly one `target`.
pub fn one<R>(target: Target<R>) -> ExpectedItem<R> {
    ExpectedItem {
        minimum: 1,
        maximum: Some(1),
        target,
    }
}

/// Zero or one `target`.
pub fn optional<R>(target: Target<R>) -> ExpectedItem<R> {
    ExpectedItem {
        minimum: 0,
        maximum: Some(1),
        target,
    }
}

/// `minimum` or more `target`s, unbounded.
pub fn at_least<R>(minimum: usize, target: Target<R>) -> ExpectedItem<R> {
    ExpectedItem {
        minimum,
        maximum: None,
        target,
    }
}

/// Zero up to `maximum` `target`s.
pub fn at_most<R>(maximum: usize, target: Target<R>) -> ExpectedItem<R> {
    ExpectedItem {
        minimum: 0,
        maximum: Some(maximum),
        target,
    }
}

impl<R: Copy> ExpectedItem<R> {
    pub fn minimum(&self) -> usize {
        self.minimum
    }

    pub fn maximum(&self) -> Option<usize> {
        self.maximum
    }

    pub fn target(&self) -> Target<R> {
        self.target
    }

    /// The same item with `count` occurrences already accounted for.
    fn remaining(&self, count: usize) -> Self {
        Self {
            minimum: self.minimum.saturating_sub(count),
            maximum: self.maximum.map(|maximum| maximum.saturating_sub(count)),
            target: self.target,
        }
    }
}

/// A single captured value: a raw token for token targets, the rule output
/// for rule targets.
#[derive(Debug, Clone, PartialEq)]
pub enum Matched<'t, O> {
    Token(&'t Token),
    Rule(O),
}

/// A successful sequence match.
#[derive(Debug, Clone, PartialEq)]
pub struct Found<'t, O> {
    /// One slot per expected item, each holding every value that item matched
    pub outputs: Vec<Vec<Matched<'t, O>>>,
    /// Tokens consumed, ignorable ones included
    pub consumed: usize,
}

impl<O> Found<'_, O> {
    fn empty() -> Self {
        Self {
            outputs: Vec::new(),
            consumed: 0,
        }
    }
}

/// Drives a [`Grammar`] over an immutable token stream.
pub struct Matcher<'t, G: Grammar> {
    tokens: &'t [Token],
    config: ParserConfig,
    context: ParsingContext,
    memo: HashMap<(G::Rule, usize), RuleMatch<G::Output>>,
}

impl<'t, G: Grammar> Matcher<'t, G> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(tokens: &'t [Token], config: ParserConfig) -> Self {
        Self {
            tokens,
            config,
            context: ParsingContext::new(),
            memo: HashMap::new(),
        }
    }

    pub fn tokens(&self) -> &'t [Token] {
        self.tokens
    }

    /// Invokes `rule` at `position`.
    pub fn rule(&mut self, rule: G::Rule, position: usize) -> Result<RuleMatch<G::Output>> {
        if self.config.memoize {
            if let Some(cached) = self.memo.get(&(rule, position)) {
                return Ok(cached.clone());
            }
        }

        self.context.enter_nested(&self.config)?;
        let found = G::apply(self, rule, position);
        self.context.exit_nested();
        let found = found?;

        trace!(
            ?rule,
            position,
            consumed = found.as_ref().map(|(_, consumed)| *consumed),
            "rule attempt"
        );

        if self.config.memoize {
            self.memo.insert((rule, position), found.clone());
        }
        Ok(found)
    }

    /// Matches `sequence` against the tokens starting at `position`, skipping
    /// tokens whose kind is in `ignored` between items.
    ///
    /// Successive matches of the head item are collected in a loop, then the
    /// repeat/advance choice is folded from the last match back to the first.
    /// A rule nested inside an item costs one level of `max_depth`; a long run
    /// of repetitions costs none.
    pub fn find(
        &mut self,
        position: usize,
        sequence: &[ExpectedItem<G::Rule>],
        ignored: &[TokenKind],
    ) -> Result<Option<Found<'t, G::Output>>> {
        let Some((head, tail)) = sequence.split_first() else {
            return Ok(Some(Found::empty()));
        };

        let mut chain: Vec<Link<'t, G::Output>> = Vec::new();
        let mut next = position;
        let mut best = loop {
            let item = head.remaining(chain.len());
            if item.maximum == Some(0) {
                break None;
            }
            let start = self.skip_ignored(next, ignored);
            match self.attempt(start, head.target)? {
                Some((matched, consumed)) => {
                    let after = start + consumed;
                    chain.push(Link {
                        matched,
                        after,
                        minimum: item.minimum,
                    });
                    // A zero-width match would repeat forever.
                    if consumed == 0 {
                        break None;
                    }
                    next = after;
                }
                None if item.minimum > 0 => break None,
                None => {
                    break self
                        .find(start, tail, ignored)?
                        .map(|advance| self.branch(start, chain.len(), advance, ignored));
                }
            }
        };

        for (index, link) in chain.iter().enumerate().rev() {
            let advance = if link.minimum <= 1 {
                self.find(link.after, tail, ignored)?
            } else {
                None
            };
            best = match (best, advance) {
                (Some(repeat), Some(advance)) if link.after + advance.consumed > repeat.end => {
                    Some(self.branch(link.after, index + 1, advance, ignored))
                }
                (Some(repeat), _) => Some(repeat),
                (None, Some(advance)) => Some(self.branch(link.after, index + 1, advance, ignored)),
                (None, None) => None,
            };
        }

        let Some(branch) = best else {
            return Ok(None);
        };
        let mut outputs = Vec::with_capacity(branch.rest.len() + 1);
        outputs.push(
            chain
                .into_iter()
                .take(branch.taken)
                .map(|link| link.matched)
                .collect(),
        );
        outputs.extend(branch.rest);
        Ok(Some(Found {
            outputs,
            consumed: branch.end - position,
        }))
    }

    /// Settles on advancing to the rest of the sequence at `from`, after
    /// `taken` matches of the head item.
    fn branch(
        &self,
        from: usize,
        taken: usize,
        advance: Found<'t, G::Output>,
        ignored: &[TokenKind],
    ) -> Branch<'t, G::Output> {
        Branch {
            end: self.skip_ignored(from + advance.consumed, ignored),
            taken,
            rest: advance.outputs,
        }
    }

    fn attempt(
        &mut self,
        position: usize,
        target: Target<G::Rule>,
    ) -> Result<Option<(Matched<'t, G::Output>, usize)>> {
        match target {
            Target::Token(kind) => Ok(self
                .tokens
                .get(position)
                .filter(|token| token.kind() == kind)
                .map(|token| (Matched::Token(token), 1))),
            Target::Rule(rule) => Ok(self
                .rule(rule, position)?
                .map(|(output, consumed)| (Matched::Rule(output), consumed))),
        }
    }

    fn skip_ignored(&self, mut position: usize, ignored: &[TokenKind]) -> usize {
        while self
            .tokens
            .get(position)
            .is_some_and(|token| ignored.contains(&token.kind()))
        {
            position += 1;
        }
        position
    }
}

/// One successful match of a repeated item.
struct Link<'t, O> {
    matched: Matched<'t, O>,
    after: usize,
    minimum: usize,
}

/// The best continuation found so far while folding a chain of repetitions.
struct Branch<'t, O> {
    /// Absolute token position where the whole match ends
    end: usize,
    /// How many head matches it keeps
    taken: usize,
    /// Captures of the items after the head
    rest: Vec<Vec<Matched<'t, O>>>,
}
