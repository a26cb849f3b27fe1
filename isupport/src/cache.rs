use std::fmt;
use std::slice;

use crate::consts::TRAILER;

/// One `RPL_ISUPPORT` line's worth of formatted tokens.
///
/// The trailer is not stored; [`params`](Self::params) appends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyBatch {
    tokens: Vec<String>,
}

impl ReplyBatch {
    pub(crate) fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Formatted tokens, without the trailer.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Length of the tokens joined by single spaces.
    #[must_use]
    pub fn tokens_len(&self) -> usize {
        let sum: usize = self.tokens.iter().map(String::len).sum();
        sum + self.tokens.len().saturating_sub(1)
    }

    /// Reply parameters: the tokens followed by the trailer.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(TRAILER))
    }
}

/// Renders the parameters in wire form: `A=1 B :are supported by this server`.
impl fmt::Display for ReplyBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{token} ")?;
        }
        write!(f, ":{TRAILER}")
    }
}

/// The packed reply lines for one registry snapshot. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplyCache {
    batches: Vec<ReplyBatch>,
    generation: u64,
}

impl ReplyCache {
    pub(crate) fn new(batches: Vec<ReplyBatch>) -> Self {
        Self {
            batches,
            generation: 0,
        }
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    #[must_use]
    pub fn batches(&self) -> &[ReplyBatch] {
        &self.batches
    }

    /// Publication counter; 0 for a cache that was never published.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, ReplyBatch> {
        self.batches.iter()
    }
}

impl<'a> IntoIterator for &'a ReplyCache {
    type Item = &'a ReplyBatch;
    type IntoIter = slice::Iter<'a, ReplyBatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
