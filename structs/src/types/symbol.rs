//! Asset symbols.

use super::{expect_str, present, Type};
use crate::{Error, Registry, Value};
use bytes::{BufMut, Bytes, BytesMut};
use eosio_codec::ReadExt;
use serde_json::{json, Value as JsonValue};

/// Decimal precision shared by every symbol.
pub const PRECISION: u8 = 4;

/// Longest symbol code; the first of the 8 wire bytes holds the precision.
pub const MAX_LEN: usize = 7;

const DEFAULT: &str = "SYMBOL";

/// A symbol code such as `EOS`.
///
/// On the wire: one precision byte followed by the code, zero-padded to 7 bytes.
#[derive(Debug)]
pub struct Symbol;

impl Symbol {
    /// Returns the code if `value` is a valid symbol string.
    pub(crate) fn validate(value: &Value) -> Result<&str, Error> {
        Self::check(expect_str("symbol", value)?)
    }

    pub(crate) fn check(code: &str) -> Result<&str, Error> {
        if code.len() > MAX_LEN {
            return Err(Error::malformed(
                "symbol",
                format!("'{code}' is longer than {MAX_LEN} characters"),
            ));
        }
        Ok(code)
    }

    pub(crate) fn write(buf: &mut BytesMut, code: &str) {
        let mut padded = [0u8; MAX_LEN];
        padded[..code.len()].copy_from_slice(code.as_bytes());
        buf.put_u8(PRECISION);
        buf.put_slice(&padded);
    }

    pub(crate) fn read(buf: &mut Bytes) -> Result<String, Error> {
        let raw = <[u8; MAX_LEN + 1]>::read(buf)?;
        if raw[0] != PRECISION {
            return Err(Error::PrecisionMismatch {
                value: String::from_utf8_lossy(&raw[1..]).trim_end_matches('\0').to_string(),
                reason: format!("symbol precision {} does not match {PRECISION}", raw[0]),
            });
        }
        let code = &raw[1..];
        let end = code.iter().position(|&b| b == 0).unwrap_or(code.len());
        String::from_utf8(code[..end].to_vec())
            .map_err(|_| Error::malformed("symbol", "code is not utf-8"))
    }
}

impl Type for Symbol {
    fn name(&self) -> &str {
        "symbol"
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        Self::read(buf).map(Value::String)
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        Self::write(buf, Self::validate(value)?);
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        Self::validate(value).map(Value::from)
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Ok(json!(Self::validate(value)?)),
            None if defaults => Ok(json!(DEFAULT)),
            None => Ok(JsonValue::Null),
        }
    }
}
