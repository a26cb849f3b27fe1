use thiserror::Error;

/// Error returned by the validating registration functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token name is empty.
    #[error("empty token name")]
    EmptyName,
    /// Token name contains a byte the wire protocol forbids in a name.
    #[error("token {name:?} has invalid name byte 0x{byte:02x}")]
    InvalidNameChar { name: String, byte: u8 },
    /// Token value contains a byte the wire protocol forbids in a parameter.
    #[error("token {name:?} has invalid value byte 0x{byte:02x}")]
    InvalidValueChar { name: String, byte: u8 },
    /// Formatted token can never fit on a reply line.
    #[error("token {name:?} is {len} bytes, longer than the {max} byte line budget")]
    TooLong { name: String, len: usize, max: usize },
}
