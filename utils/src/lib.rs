//! Name packing, decimal scaling, and hex helpers for EOSIO values.

pub mod decimal;
pub use decimal::{decimal_imply, decimal_pad, decimal_string, decimal_unimply};
pub mod name;
pub use name::{decode_name, encode_name, is_name};

/// Converts bytes to a hexadecimal string.
pub fn hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes.iter() {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Converts a hexadecimal string to bytes.
pub fn from_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(&[]), "");
        assert_eq!(from_hex("").unwrap(), Vec::<u8>::new());

        // `eosio` packed little-endian, as it appears on the wire.
        let eosio = encode_name("eosio").unwrap().to_le_bytes();
        assert_eq!(hex(&eosio), "0000000000ea3055");
        assert_eq!(from_hex("0000000000EA3055").unwrap(), eosio.to_vec());
    }

    #[test]
    fn test_from_hex_rejects() {
        assert!(from_hex("0").is_none());
        assert!(from_hex("zz").is_none());
        assert!(from_hex("é1").is_none());
    }
}
