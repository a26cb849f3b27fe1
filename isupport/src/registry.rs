use std::collections::HashMap;
use std::slice;

use crate::consts;
use crate::error::TokenError;
use crate::token::Token;
use crate::validate;

/// Named `RPL_ISUPPORT` tokens, each with an optional value.
///
/// Entries keep the position of their first insertion, so packing is
/// deterministic: overwriting a token changes its value but not where it
/// appears in the reply.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
    index: HashMap<String, usize>,
}

impl TokenRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name` with a value. Last write wins.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name.into(), Some(value.into()));
    }

    /// Insert or overwrite `name` with no value. Last write wins.
    pub fn add_no_value(&mut self, name: impl Into<String>) {
        self.insert(name.into(), None);
    }

    /// Like [`add`](Self::add), but rejects tokens that would corrupt the reply
    /// or never fit a default-sized line. The registry is unchanged on error.
    pub fn try_add(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), TokenError> {
        self.try_add_within(name, value, consts::MAX_LINE_TOKENS_LEN)
    }

    /// Like [`add_no_value`](Self::add_no_value), with validation.
    pub fn try_add_no_value(&mut self, name: impl Into<String>) -> Result<(), TokenError> {
        self.try_add_no_value_within(name, consts::MAX_LINE_TOKENS_LEN)
    }

    /// [`try_add`](Self::try_add) against a line budget of `max_len` bytes.
    pub fn try_add_within(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        max_len: usize,
    ) -> Result<(), TokenError> {
        let name = name.into();
        let value = value.into();
        validate::validate_token(&name, Some(&value), max_len)?;
        self.insert(name, Some(value));
        Ok(())
    }

    /// [`try_add_no_value`](Self::try_add_no_value) against a line budget of
    /// `max_len` bytes.
    pub fn try_add_no_value_within(
        &mut self,
        name: impl Into<String>,
        max_len: usize,
    ) -> Result<(), TokenError> {
        let name = name.into();
        validate::validate_token(&name, None, max_len)?;
        self.insert(name, None);
        Ok(())
    }

    fn insert(&mut self, name: String, value: Option<String>) {
        match self.index.get(&name) {
            Some(&i) => self.tokens[i].value = value,
            None => {
                self.index.insert(name.clone(), self.tokens.len());
                self.tokens.push(Token::new(name, value));
            }
        }
    }

    /// Look up a token. `Some(None)` means registered without a value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.index
            .get(name)
            .map(|&i| self.tokens[i].value.as_deref())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Remove a token, keeping the relative order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Token> {
        let i = self.index.remove(name)?;
        let token = self.tokens.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(token)
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.index.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in packing order.
    pub fn iter(&self) -> slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a TokenRegistry {
    type Item = &'a Token;
    type IntoIter = slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Into<String>, V: Into<String>> Extend<(N, Option<V>)> for TokenRegistry {
    fn extend<I: IntoIterator<Item = (N, Option<V>)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name.into(), value.map(Into::into));
        }
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, Option<V>)> for TokenRegistry {
    fn from_iter<I: IntoIterator<Item = (N, Option<V>)>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}
