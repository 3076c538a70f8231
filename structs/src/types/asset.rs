//! Token quantities such as `1.0000 EOS`.

use super::{present, symbol::PRECISION, Symbol, Type};
use crate::{Error, Registry, Value};
use bytes::{Bytes, BytesMut};
use eosio_codec::{ReadExt, Write};
use eosio_utils::{decimal_imply, decimal_pad, decimal_unimply};
use serde_json::{json, Value as JsonValue};

const DEFAULT: &str = "0.0001 SYMBOL";

/// Precision used for amounts of `symbol`.
///
/// Every symbol currently shares [PRECISION]; the symbol is threaded through so a per-symbol
/// lookup can replace this without touching callers.
pub(crate) fn precision(_symbol: &str) -> u8 {
    PRECISION
}

/// Accepted shapes of an asset before normalization.
pub(crate) enum AssetInput<'a> {
    /// `"<amount> <symbol>"`
    Text(&'a str),
    /// `{ amount, symbol }` where amount is the whole-number (implied precision) form.
    Parts { amount: &'a Value, symbol: &'a Value },
}

impl<'a> AssetInput<'a> {
    pub(crate) fn classify(value: &'a Value) -> Result<Self, Error> {
        match value {
            Value::String(text) => Ok(AssetInput::Text(text)),
            Value::Object(map) => match (map.get("amount"), map.get("symbol")) {
                (Some(amount), Some(symbol)) => Ok(AssetInput::Parts { amount, symbol }),
                _ => Err(Error::malformed(
                    "asset",
                    "object form requires 'amount' and 'symbol'",
                )),
            },
            other => Err(Error::malformed(
                "asset",
                format!("expected a string like '1.0000 EOS', found {}", other.kind()),
            )),
        }
    }
}

fn split_sign(amount: &str) -> (bool, &str) {
    match amount.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, amount),
    }
}

fn signed(negative: bool, digits: String) -> String {
    let zero = digits.bytes().all(|b| b == b'0' || b == b'.');
    if negative && !zero {
        format!("-{digits}")
    } else {
        digits
    }
}

fn precision_error(value: &str, err: impl ToString) -> Error {
    Error::PrecisionMismatch {
        value: value.to_string(),
        reason: err.to_string(),
    }
}

/// Splits `"<amount> <symbol>"` into its two parts.
fn split(text: &str) -> Result<(&str, &str), Error> {
    let mut parts = text.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(amount), Some(symbol), None) if !amount.is_empty() => Ok((amount, symbol)),
        _ => Err(precision_error(
            text,
            "expected '<amount> <symbol>' (for example '1.0000 EOS')",
        )),
    }
}

fn pad(amount: &str, symbol: &str) -> Result<String, Error> {
    let (negative, digits) = split_sign(amount);
    let padded = decimal_pad(digits, precision(symbol)).map_err(|err| precision_error(amount, err))?;
    Ok(signed(negative, padded))
}

fn unimply(amount: &str, symbol: &str) -> Result<String, Error> {
    let (negative, digits) = split_sign(amount);
    let decimal =
        decimal_unimply(digits, precision(symbol)).map_err(|err| precision_error(amount, err))?;
    Ok(signed(negative, decimal))
}

fn imply(amount: &str, symbol: &str) -> Result<i64, Error> {
    let (negative, digits) = split_sign(amount);
    let whole = decimal_imply(digits, precision(symbol)).map_err(|err| precision_error(amount, err))?;
    let magnitude = whole
        .parse::<i128>()
        .map_err(|_| Error::malformed("asset", format!("amount '{amount}' is not a number")))?;
    let scaled = if negative { -magnitude } else { magnitude };
    i64::try_from(scaled)
        .map_err(|_| Error::malformed("asset", format!("amount '{amount}' is out of range")))
}

/// An `int64` amount with implied precision followed by a [Symbol].
#[derive(Debug)]
pub struct Asset;

impl Asset {
    /// Normalizes any accepted input into `"<amount padded to precision> <symbol>"`.
    pub(crate) fn canonical(value: &Value) -> Result<String, Error> {
        match AssetInput::classify(value)? {
            AssetInput::Text(text) => {
                let (amount, symbol) = split(text)?;
                let symbol = Symbol::check(symbol)?;
                Ok(format!("{} {symbol}", pad(amount, symbol)?))
            }
            AssetInput::Parts { amount, symbol } => {
                let symbol = Symbol::validate(symbol)?;
                let amount = match amount {
                    Value::String(s) => s.clone(),
                    Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
                    other => {
                        return Err(Error::malformed(
                            "asset",
                            format!("amount must be a whole number, found {}", other.kind()),
                        ))
                    }
                };
                Ok(format!("{} {symbol}", unimply(&amount, symbol)?))
            }
        }
    }

    pub(crate) fn read(buf: &mut Bytes) -> Result<String, Error> {
        let amount = i64::read(buf)?;
        let symbol = Symbol::read(buf)?;
        Ok(format!("{} {symbol}", unimply(&amount.to_string(), &symbol)?))
    }

    pub(crate) fn write(buf: &mut BytesMut, text: &str) -> Result<(), Error> {
        let (amount, symbol) = split(text)?;
        let code = Symbol::check(symbol)?;
        let amount = imply(amount, code)?;
        amount.write(buf);
        Symbol::write(buf, code);
        Ok(())
    }
}

impl Type for Asset {
    fn name(&self) -> &str {
        "asset"
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        Self::read(buf).map(Value::String)
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        match value {
            Value::String(text) => Self::write(buf, text),
            other => Err(Error::malformed(
                "asset",
                format!("expected a string like '1.0000 EOS', found {}", other.kind()),
            )),
        }
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        Self::canonical(value).map(Value::String)
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Ok(json!(Self::canonical(value)?)),
            None if defaults => Ok(json!(DEFAULT)),
            None => Ok(JsonValue::Null),
        }
    }
}
