use crate::consts::{MAX_LINE_TOKENS_LEN, MAX_TOKENS_PER_LINE};

/// What the packer does with a token that does not fit the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OverflowPolicy {
    /// Flush the current line and start a new one with the token.
    #[default]
    Wrap,
    /// Discard the token and flush the current line, as older servers do.
    ///
    /// Differs from their layout in two cases: the separating space counts
    /// in the fit check, so a line never exceeds `max_line_len` (older
    /// servers could emit one byte over), and an oversized first token
    /// yields no line instead of a line holding only the trailer.
    Drop,
}

/// Per-line limits applied when packing tokens into reply lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PackLimits {
    /// Maximum length of a line's tokens joined by single spaces.
    pub max_line_len: usize,
    /// Maximum number of tokens per line. Zero is treated as one.
    pub max_tokens: usize,
    pub overflow: OverflowPolicy,
}

impl Default for PackLimits {
    fn default() -> Self {
        Self {
            max_line_len: MAX_LINE_TOKENS_LEN,
            max_tokens: MAX_TOKENS_PER_LINE,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl PackLimits {
    #[must_use]
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub(crate) fn token_cap(&self) -> usize {
        self.max_tokens.max(1)
    }
}
