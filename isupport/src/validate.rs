use crate::consts;
use crate::error::TokenError;

/// Bytes that would split or terminate a reply parameter.
fn is_forbidden(b: u8) -> bool {
    matches!(b, b' ' | b'\0' | b'\r' | b'\n')
}

/// Validate a token name: non-empty, no space, NUL, CR, LF or `=`, and not
/// starting with `:` or `-`.
pub fn validate_name(name: &str) -> Result<(), TokenError> {
    let bytes = name.as_bytes();
    let Some(&first) = bytes.first() else {
        return Err(TokenError::EmptyName);
    };
    if first == b':' || first == b'-' {
        return Err(TokenError::InvalidNameChar {
            name: name.to_owned(),
            byte: first,
        });
    }
    for &b in bytes {
        if is_forbidden(b) || b == b'=' {
            return Err(TokenError::InvalidNameChar {
                name: name.to_owned(),
                byte: b,
            });
        }
    }
    Ok(())
}

/// Validate a token value: may be empty, no space, NUL, CR or LF.
pub fn validate_value(name: &str, value: &str) -> Result<(), TokenError> {
    for &b in value.as_bytes() {
        if is_forbidden(b) {
            return Err(TokenError::InvalidValueChar {
                name: name.to_owned(),
                byte: b,
            });
        }
    }
    Ok(())
}

/// Validate a whole token, including that its formatted form fits in `max_len`.
pub fn validate_token(
    name: &str,
    value: Option<&str>,
    max_len: usize,
) -> Result<(), TokenError> {
    validate_name(name)?;
    if let Some(v) = value {
        validate_value(name, v)?;
    }
    // name=value
    let len = name.len() + value.map_or(0, |v| v.len() + 1);
    if len > max_len {
        return Err(TokenError::TooLong {
            name: name.to_owned(),
            len,
            max: max_len,
        });
    }
    Ok(())
}
