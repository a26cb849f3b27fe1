/// Maximum length of the tokens on one `RPL_ISUPPORT` line, joined by single spaces.
pub const MAX_LINE_TOKENS_LEN: usize = 400;

/// Maximum number of tokens on one `RPL_ISUPPORT` line (the trailer not included).
pub const MAX_TOKENS_PER_LINE: usize = 13;

/// Final parameter of every `RPL_ISUPPORT` line.
pub const TRAILER: &str = "are supported by this server";

/// Numeric of the `RPL_ISUPPORT` reply.
pub const RPL_ISUPPORT: &str = "005";
