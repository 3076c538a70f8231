//! Account and action names packed into a 64-bit integer.
//!
//! A name is up to 13 characters drawn from `.12345abcdefghijklmnopqrstuvwxyz`. The first 12
//! characters take 5 bits each (most significant first) and the 13th takes the remaining 4 bits,
//! so it is limited to `.12345abcdefghij`. Trailing dots are not significant.

use thiserror::Error;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Maximum number of characters in a name.
pub const MAX_LEN: usize = 13;

/// Errors that can occur when packing a name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("name '{0}' is longer than 13 characters")]
    TooLong(String),
    #[error("name '{0}' contains invalid character '{1}'")]
    InvalidChar(String, char),
    #[error("name '{0}' has an invalid 13th character")]
    InvalidLastChar(String),
}

fn char_index(c: u8) -> Option<u64> {
    CHARMAP.iter().position(|&m| m == c).map(|i| i as u64)
}

/// Packs a name into its 64-bit representation.
pub fn encode_name(name: &str) -> Result<u64, Error> {
    if name.len() > MAX_LEN {
        return Err(Error::TooLong(name.to_string()));
    }
    let bytes = name.as_bytes();
    let mut value = 0u64;
    for i in 0..MAX_LEN {
        let c = match bytes.get(i) {
            Some(&b) => char_index(b)
                .ok_or_else(|| Error::InvalidChar(name.to_string(), b as char))?,
            None => 0,
        };
        if i < 12 {
            value |= c << (64 - 5 * (i + 1));
        } else {
            if c > 0x0f {
                return Err(Error::InvalidLastChar(name.to_string()));
            }
            value |= c;
        }
    }
    Ok(value)
}

/// Unpacks a 64-bit value into its name, dropping trailing dots.
pub fn decode_name(value: u64) -> String {
    let mut chars = [b'.'; MAX_LEN];
    let mut tmp = value;
    for i in 0..MAX_LEN {
        let mask = if i == 0 { 0x0f } else { 0x1f };
        chars[MAX_LEN - 1 - i] = CHARMAP[(tmp & mask) as usize];
        tmp >>= if i == 0 { 4 } else { 5 };
    }
    let end = chars
        .iter()
        .rposition(|&c| c != b'.')
        .map_or(0, |last| last + 1);

    // Every byte comes from CHARMAP, which is ASCII.
    chars[..end].iter().map(|&c| c as char).collect()
}

/// Returns true if `name` can be packed.
pub fn is_name(name: &str) -> bool {
    encode_name(name).is_ok()
}
