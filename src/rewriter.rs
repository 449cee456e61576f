//! Lazy, stack-based expansion of an axiom under L-System production rules.
//!
//! [`Expansion`] yields the rewritten word one symbol at a time. The full string is
//! never built: the only state is a stack of cursors whose height is bounded by the
//! iteration count, so even grammars whose output grows exponentially can be streamed
//! into the interpreter or truncated with [`Iterator::take`].

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::iter::FusedIterator;

/// Production rules, keyed by the single symbol they rewrite.
///
/// Symbols without an entry rewrite to themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: HashMap<char, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the production for `symbol`.
    pub fn insert(&mut self, symbol: char, replacement: impl Into<String>) {
        self.rules.insert(symbol, replacement.into());
    }

    /// Returns the replacement word for `symbol`, if it has a production.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

/// A cursor into `word` at rewriting depth `depth`.
///
/// `offset` is a byte offset, always on a `char` boundary.
#[derive(Clone, Copy, Debug)]
struct Frame<'a> {
    word: &'a str,
    offset: usize,
    depth: usize,
}

/// Iterator over the symbols of `axiom` rewritten `iterations` times.
///
/// Symbols come out in the same left-to-right, depth-first order as the naive
/// recursive definition, where a symbol at depth `d < iterations` that has a rule
/// is replaced by the expansion of its replacement word at depth `d + 1`.
#[derive(Clone, Debug)]
pub struct Expansion<'a> {
    rules: &'a RuleSet,
    iterations: usize,
    stack: Vec<Frame<'a>>,
}

impl<'a> Expansion<'a> {
    pub fn new(axiom: &'a str, rules: &'a RuleSet, iterations: usize) -> Self {
        Self {
            rules,
            iterations,
            stack: vec![Frame {
                word: axiom,
                offset: 0,
                depth: 0,
            }],
        }
    }

    /// Current height of the work stack. Never exceeds `iterations + 1`.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Iterator for Expansion<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let rules = self.rules;
        while let Some(frame) = self.stack.pop() {
            let Some(ch) = frame.word[frame.offset..].chars().next() else {
                continue;
            };

            // Continuation goes underneath anything pushed for `ch`.
            self.stack.push(Frame {
                offset: frame.offset + ch.len_utf8(),
                ..frame
            });

            match rules.get(ch) {
                Some(replacement) if frame.depth < self.iterations => {
                    self.stack.push(Frame {
                        word: replacement,
                        offset: 0,
                        depth: frame.depth + 1,
                    });
                }
                _ => return Some(ch),
            }
        }
        None
    }
}

impl FusedIterator for Expansion<'_> {}

/// Checked entry point for expansion with a signed iteration count.
///
/// Fails with [`Error::InvalidArgument`] when `iterations` is negative.
pub fn expand<'a>(axiom: &'a str, rules: &'a RuleSet, iterations: i64) -> Result<Expansion<'a>> {
    let iterations = usize::try_from(iterations).map_err(|_| {
        Error::InvalidArgument(format!("iterations must be >= 0, got {iterations}"))
    })?;
    Ok(Expansion::new(axiom, rules, iterations))
}
