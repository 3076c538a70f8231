use crate::Error;
use bytes::{Buf, BufMut};
use eosio_codec::{Error as CodecError, FixedSize, Read, ReadExt, Write};
use ripemd::{Digest, Ripemd160};
use std::{fmt, str::FromStr};

/// Length of a compressed public key (Y-Parity || X).
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Length of a recoverable signature (recovery byte || R || S).
pub const SIGNATURE_LENGTH: usize = 65;

const CHECKSUM_LENGTH: usize = 4;
const LEGACY_KEY_PREFIX: &str = "EOS";
const K1_KEY_PREFIX: &str = "PUB_K1_";
const K1_SIGNATURE_PREFIX: &str = "SIG_K1_";
const K1_SUFFIX: &[u8] = b"K1";

fn checksum(data: &[u8], suffix: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.update(suffix);
    let digest = hasher.finalize();
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}

fn encode_check(data: &[u8], suffix: &[u8]) -> String {
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LENGTH);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum(data, suffix));
    bs58::encode(payload).into_string()
}

fn decode_check<const N: usize>(encoded: &str, suffix: &[u8]) -> Result<[u8; N], Error> {
    let payload = bs58::decode(encoded)
        .into_vec()
        .map_err(|err| Error::Base58(err.to_string()))?;
    if payload.len() != N + CHECKSUM_LENGTH {
        return Err(Error::InvalidLength {
            expected: N + CHECKSUM_LENGTH,
            found: payload.len(),
        });
    }
    let (data, check) = payload.split_at(N);
    if checksum(data, suffix) != check {
        return Err(Error::ChecksumMismatch);
    }
    let mut out = [0u8; N];
    out.copy_from_slice(data);
    Ok(out)
}

fn to_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N], Error> {
    bytes.try_into().map_err(|_| Error::InvalidLength {
        expected: N,
        found: bytes.len(),
    })
}

/// Compressed secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Parses a public key from its 33-byte wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let raw: [u8; PUBLIC_KEY_LENGTH] = to_array(bytes)?;
        Self::try_from(raw)
    }

    /// Returns the 33-byte wire form.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0
    }
}

impl TryFrom<[u8; PUBLIC_KEY_LENGTH]> for PublicKey {
    type Error = Error;

    fn try_from(raw: [u8; PUBLIC_KEY_LENGTH]) -> Result<Self, Error> {
        match raw[0] {
            0x02 | 0x03 => Ok(Self(raw)),
            tag => Err(Error::InvalidKeyTag(tag)),
        }
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let raw = if let Some(encoded) = s.strip_prefix(K1_KEY_PREFIX) {
            decode_check::<PUBLIC_KEY_LENGTH>(encoded, K1_SUFFIX)?
        } else if let Some(encoded) = s.strip_prefix(LEGACY_KEY_PREFIX) {
            decode_check::<PUBLIC_KEY_LENGTH>(encoded, &[])?
        } else {
            return Err(Error::InvalidPrefix(s.to_string()));
        };
        Self::try_from(raw)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LEGACY_KEY_PREFIX}{}", encode_check(&self.0, &[]))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl Write for PublicKey {
    fn write(&self, buf: &mut impl BufMut) {
        self.0.write(buf);
    }
}

impl Read for PublicKey {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, CodecError> {
        let raw = <[u8; PUBLIC_KEY_LENGTH]>::read(buf)?;
        Self::try_from(raw).map_err(|err| CodecError::Invalid("PublicKey", err.to_string()))
    }
}

impl FixedSize for PublicKey {
    const SIZE: usize = PUBLIC_KEY_LENGTH;
}

/// Recoverable secp256k1 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Parses a signature from its 65-byte wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let raw: [u8; SIGNATURE_LENGTH] = to_array(bytes)?;
        Self::try_from(raw)
    }

    /// Returns the 65-byte wire form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0
    }
}

impl TryFrom<[u8; SIGNATURE_LENGTH]> for Signature {
    type Error = Error;

    fn try_from(raw: [u8; SIGNATURE_LENGTH]) -> Result<Self, Error> {
        // Recovery byte is 27 + recovery id (0..=3) + 4 when the key is compressed.
        match raw[0] {
            27..=34 => Ok(Self(raw)),
            other => Err(Error::InvalidRecoveryByte(other)),
        }
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let Some(encoded) = s.strip_prefix(K1_SIGNATURE_PREFIX) else {
            return Err(Error::InvalidPrefix(s.to_string()));
        };
        let raw = decode_check::<SIGNATURE_LENGTH>(encoded, K1_SUFFIX)?;
        Self::try_from(raw)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{K1_SIGNATURE_PREFIX}{}", encode_check(&self.0, K1_SUFFIX))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl Write for Signature {
    fn write(&self, buf: &mut impl BufMut) {
        self.0.write(buf);
    }
}

impl Read for Signature {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, CodecError> {
        let raw = <[u8; SIGNATURE_LENGTH]>::read(buf)?;
        Self::try_from(raw).map_err(|err| CodecError::Invalid("Signature", err.to_string()))
    }
}

impl FixedSize for Signature {
    const SIZE: usize = SIGNATURE_LENGTH;
}

#[cfg(test)]
mod tests {
    use super::*;
    use eosio_codec::{DecodeExt, Encode};
    use eosio_utils::{from_hex, hex};

    const KEY_A: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";
    const KEY_A_HEX: &str = "02c0ded2bc1f1305fb0faac5e6c03ee3a1924234985427b6167ca569d13df435cf";
    const KEY_A_K1: &str = "PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63";
    const KEY_B: &str = "EOS7wBGPvBgRVa4wQN2zm5CjgBF6S7tP7R3JavtSa2unHUoVQGhey";
    const KEY_B_HEX: &str = "0391312a9256897a0e2f21dab3e5182066aad8c4217671b6385725a01f3f2a7410";
    const SIG: &str = "SIG_K1_JuPRYrQuGBoWkbrwZ1uLuiwG19vUfL1LRkPryc8sD7QprezRWyZLsjBzyxuTZFJHeu784LNVdTNs2YQPq289cYMGcpTXAS";

    fn sig_bytes() -> Vec<u8> {
        let mut raw = vec![0x1f];
        raw.extend(1..=64u8);
        raw
    }

    #[test]
    fn test_public_key_vectors() {
        for (text, expected) in [(KEY_A, KEY_A_HEX), (KEY_B, KEY_B_HEX)] {
            let key: PublicKey = text.parse().unwrap();
            assert_eq!(hex(key.as_ref()), expected);
            assert_eq!(key.to_string(), text);

            let raw = from_hex(expected).unwrap();
            assert_eq!(PublicKey::from_bytes(&raw).unwrap(), key);
        }
    }

    #[test]
    fn test_public_key_k1_prefix() {
        let legacy: PublicKey = KEY_A.parse().unwrap();
        let k1: PublicKey = KEY_A_K1.parse().unwrap();
        assert_eq!(legacy, k1);
        assert_eq!(k1.to_string(), KEY_A);
    }

    #[test]
    fn test_public_key_rejects() {
        // Last character altered breaks the checksum
        let tampered = format!("{}W", &KEY_A[..KEY_A.len() - 1]);
        assert!(matches!(
            tampered.parse::<PublicKey>(),
            Err(Error::ChecksumMismatch) | Err(Error::InvalidLength { .. })
        ));
        assert!(matches!(
            "XYZ6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV".parse::<PublicKey>(),
            Err(Error::InvalidPrefix(_))
        ));
        assert!(matches!(
            "EOS0OIl".parse::<PublicKey>(),
            Err(Error::Base58(_))
        ));
        assert!(matches!(
            PublicKey::from_bytes(&[0x04; PUBLIC_KEY_LENGTH]),
            Err(Error::InvalidKeyTag(0x04))
        ));
        assert!(matches!(
            PublicKey::from_bytes(&[0x02; 32]),
            Err(Error::InvalidLength {
                expected: 33,
                found: 32
            })
        ));
    }

    #[test]
    fn test_public_key_codec() {
        let key: PublicKey = KEY_B.parse().unwrap();
        let encoded = key.encode();
        assert_eq!(encoded.len(), PUBLIC_KEY_LENGTH);
        assert_eq!(PublicKey::decode(encoded).unwrap(), key);
    }

    #[test]
    fn test_signature_vector() {
        let sig: Signature = SIG.parse().unwrap();
        assert_eq!(sig.as_ref(), &sig_bytes()[..]);
        assert_eq!(sig.to_string(), SIG);
        assert_eq!(Signature::from_bytes(&sig_bytes()).unwrap(), sig);
    }

    #[test]
    fn test_signature_rejects() {
        assert!(matches!(
            "EOSKVm5YYck2DXHnUUKPinUFzVuxFngi7MAasbKCnvT1wP6sKwzRX9".parse::<Signature>(),
            Err(Error::InvalidPrefix(_))
        ));
        let mut raw = sig_bytes();
        raw[0] = 0;
        assert!(matches!(
            Signature::from_bytes(&raw),
            Err(Error::InvalidRecoveryByte(0))
        ));
    }

    #[test]
    fn test_signature_codec() {
        let sig: Signature = SIG.parse().unwrap();
        let encoded = sig.encode();
        assert_eq!(encoded.len(), SIGNATURE_LENGTH);
        assert_eq!(Signature::decode(encoded).unwrap(), sig);
    }
}
