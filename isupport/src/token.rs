use std::fmt;

/// A capability token advertised in `RPL_ISUPPORT`.
///
/// Rendered as `NAME` when it has no value, `NAME=VALUE` otherwise. An empty
/// value is still a value: `EXCEPTS` and `EXCEPTS=` are different tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub name: String,
    pub value: Option<String>,
}

impl Token {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    #[must_use]
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Some(value.into()))
    }

    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// Length in bytes of the formatted token.
    #[must_use]
    pub fn formatted_len(&self) -> usize {
        match &self.value {
            Some(v) => self.name.len() + 1 + v.len(),
            None => self.name.len(),
        }
    }

    /// The formatted token as it appears on the wire.
    #[must_use]
    pub fn formatted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}={}", self.name, v),
            None => f.write_str(&self.name),
        }
    }
}
