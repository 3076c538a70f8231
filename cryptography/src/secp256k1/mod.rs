//! Secp256k1 ("K1") public keys and recoverable signatures.

mod scheme;
pub use scheme::{PublicKey, Signature, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
