//! Account, permission and action names.

use super::{expect_str, present, Type};
use crate::{Error, Registry, Value};
use bytes::{Bytes, BytesMut};
use eosio_codec::{ReadExt, Write};
use eosio_utils::{decode_name, encode_name};
use serde_json::{json, Value as JsonValue};

/// A name packed into a little-endian `uint64` on the wire and exchanged as its string form.
#[derive(Debug)]
pub struct Name;

impl Name {
    pub(crate) fn pack(value: &Value) -> Result<u64, Error> {
        let name = expect_str("name", value)?;
        encode_name(name).map_err(|err| Error::malformed("name", err.to_string()))
    }
}

impl Type for Name {
    fn name(&self) -> &str {
        "name"
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        Ok(Value::String(decode_name(u64::read(buf)?)))
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        Self::pack(value)?.write(buf);
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        expect_str("name", value)?;
        Ok(value.clone())
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Ok(json!(expect_str("name", value)?)),
            None if defaults => Ok(json!("")),
            None => Ok(JsonValue::Null),
        }
    }
}
