//! Public keys and signatures, exchanged as checksummed base58 strings.

use super::{expect_str, present, Type};
use crate::{Error, Registry, Value};
use bytes::{Bytes, BytesMut};
use eosio_codec::{ReadExt, Write};
use eosio_cryptography::{
    secp256k1::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH},
    PublicKey, Signature,
};
use serde_json::{json, Value as JsonValue};

const DEFAULT_PUBLIC_KEY: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";
const DEFAULT_SIGNATURE: &str = "SIG_K1_JuPRYrQuGBoWkbrwZ1uLuiwG19vUfL1LRkPryc8sD7QprezRWyZLsjBzyxuTZFJHeu784LNVdTNs2YQPq289cYMGcpTXAS";

fn parse_key(value: &Value) -> Result<PublicKey, Error> {
    expect_str("public_key", value)?
        .parse()
        .map_err(Error::KeyFormat)
}

fn parse_signature(value: &Value) -> Result<Signature, Error> {
    expect_str("signature", value)?
        .parse()
        .map_err(Error::SignatureFormat)
}

/// The 33-byte compressed key; displayed in the legacy `EOS` form.
#[derive(Debug)]
pub struct PublicKeyCodec;

impl Type for PublicKeyCodec {
    fn name(&self) -> &str {
        "public_key"
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        let raw = <[u8; PUBLIC_KEY_LENGTH]>::read(buf)?;
        let key = PublicKey::try_from(raw).map_err(Error::KeyFormat)?;
        Ok(Value::String(key.to_string()))
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        parse_key(value)?.write(buf);
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        Ok(Value::String(parse_key(value)?.to_string()))
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Ok(json!(parse_key(value)?.to_string())),
            None if defaults => Ok(json!(DEFAULT_PUBLIC_KEY)),
            None => Ok(JsonValue::Null),
        }
    }
}

/// The 65-byte recoverable signature; displayed in the `SIG_K1_` form.
#[derive(Debug)]
pub struct SignatureCodec;

impl Type for SignatureCodec {
    fn name(&self) -> &str {
        "signature"
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        let raw = <[u8; SIGNATURE_LENGTH]>::read(buf)?;
        let signature = Signature::try_from(raw).map_err(Error::SignatureFormat)?;
        Ok(Value::String(signature.to_string()))
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        parse_signature(value)?.write(buf);
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        Ok(Value::String(parse_signature(value)?.to_string()))
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Ok(json!(parse_signature(value)?.to_string())),
            None if defaults => Ok(json!(DEFAULT_SIGNATURE)),
            None => Ok(JsonValue::Null),
        }
    }
}
