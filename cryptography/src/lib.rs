//! Parse, validate, and format EOSIO public keys and signatures.
//!
//! Keys and signatures travel on the wire as fixed-size byte windows (33 bytes for a compressed
//! public key, 65 bytes for a recoverable signature) and are exchanged with users as base58
//! strings protected by a truncated RIPEMD-160 checksum:
//!
//! - `EOS<base58(key || ripemd160(key)[..4])>` (legacy public key form, emitted by default)
//! - `PUB_K1_<base58(key || ripemd160(key || "K1")[..4])>` (accepted on input)
//! - `SIG_K1_<base58(sig || ripemd160(sig || "K1")[..4])>`
//!
//! Only the byte layout is validated (compressed point tag, recovery byte); curve membership is
//! left to the chain.
//!
//! # Example
//! ```rust
//! use eosio_cryptography::PublicKey;
//!
//! let key: PublicKey = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV".parse().unwrap();
//! assert_eq!(key.as_ref()[0], 0x02);
//! assert_eq!(key.to_string(), "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV");
//! ```

use thiserror::Error;

pub mod secp256k1;
pub use secp256k1::{PublicKey, Signature};

/// Errors that can occur when parsing keys and signatures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unrecognized prefix in '{0}'")]
    InvalidPrefix(String),
    #[error("invalid base58: {0}")]
    Base58(String),
    #[error("checksum mismatch")]
    ChecksumMismatch,
    #[error("invalid length: expected {expected}, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("invalid compressed point tag: {0:#04x}")]
    InvalidKeyTag(u8),
    #[error("invalid signature recovery byte: {0}")]
    InvalidRecoveryByte(u8),
}
