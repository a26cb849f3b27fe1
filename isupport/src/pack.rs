//! Greedy packing of registry tokens into `RPL_ISUPPORT` reply lines.
//!
//! A single pass over the registry in insertion order. Each line holds at
//! most `max_tokens` tokens whose space-joined length is at most
//! `max_line_len`; the trailer is added when the line is sent and does not
//! count against either limit.

use tracing::{trace, warn};

use crate::cache::{ReplyBatch, ReplyCache};
use crate::limits::{OverflowPolicy, PackLimits};
use crate::registry::TokenRegistry;
use crate::token::Token;

/// Builds a [`ReplyCache`] from a registry snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyCacheBuilder {
    limits: PackLimits,
}

impl ReplyCacheBuilder {
    #[must_use]
    pub fn new(limits: PackLimits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub fn limits(&self) -> &PackLimits {
        &self.limits
    }

    /// Pack every token of `registry` into reply lines.
    ///
    /// Tokens that cannot be placed are dropped and logged at `warn`; the pass
    /// itself never fails. An empty registry yields an empty cache.
    #[must_use]
    pub fn build(&self, registry: &TokenRegistry) -> ReplyCache {
        let mut packer = LinePacker::new(self.limits);
        for token in registry {
            match self.limits.overflow {
                OverflowPolicy::Wrap => packer.push_wrapping(token),
                OverflowPolicy::Drop => packer.push_dropping(token),
            }
        }
        ReplyCache::new(packer.finish())
    }
}

/// Accumulates the line being filled and the lines already flushed.
struct LinePacker {
    limits: PackLimits,
    line: Vec<String>,
    /// Length of `line` joined by single spaces.
    len: usize,
    out: Vec<ReplyBatch>,
}

impl LinePacker {
    fn new(limits: PackLimits) -> Self {
        Self {
            limits,
            line: Vec::new(),
            len: 0,
            out: Vec::new(),
        }
    }

    /// Space needed before the next token on the current line.
    fn separator(&self) -> usize {
        usize::from(!self.line.is_empty())
    }

    fn append(&mut self, token: &Token) {
        self.len += self.separator() + token.formatted_len();
        self.line.push(token.formatted());
    }

    fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }
        trace!(tokens = self.line.len(), len = self.len, "flushed ISUPPORT line");
        self.out.push(ReplyBatch::new(std::mem::take(&mut self.line)));
        self.len = 0;
    }

    fn dropped(&self, token: &Token) {
        warn!(
            token = %token.name,
            len = token.formatted_len(),
            max = self.limits.max_line_len,
            policy = ?self.limits.overflow,
            "dropping ISUPPORT token that does not fit a reply line"
        );
    }

    /// Start a new line when the token does not fit the current one.
    fn push_wrapping(&mut self, token: &Token) {
        let tlen = token.formatted_len();
        if tlen > self.limits.max_line_len {
            self.dropped(token);
            return;
        }
        if self.len + self.separator() + tlen > self.limits.max_line_len {
            self.flush();
        }
        self.append(token);
        if self.line.len() >= self.limits.token_cap() {
            self.flush();
        }
    }

    /// Discard a token that does not fit the current line, then flush once the
    /// line is full or the last token's length plus the running length reaches
    /// the budget. This is the layout older servers put on the wire.
    fn push_dropping(&mut self, token: &Token) {
        let tlen = token.formatted_len();
        if tlen + self.separator() + self.len <= self.limits.max_line_len {
            self.append(token);
        } else {
            self.dropped(token);
        }
        if self.line.len() >= self.limits.token_cap() || tlen + self.len >= self.limits.max_line_len
        {
            self.flush();
        }
    }

    fn finish(mut self) -> Vec<ReplyBatch> {
        self.flush();
        self.out
    }
}
