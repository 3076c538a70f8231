use super::StructHook;
use crate::{AbiDef, Error, Registry, Value};

/// Accepts an ABI as JSON text (or the raw bytes of JSON text).
///
/// The text is read through [AbiDef] so omitted sections become empty lists.
#[derive(Debug)]
pub struct AbiShorthand;

impl StructHook for AbiShorthand {
    fn from_shorthand(&self, _: &Registry, value: &Value) -> Result<Option<Value>, Error> {
        let abi: AbiDef = match value {
            Value::String(text) => serde_json::from_str(text)?,
            Value::Bytes(bytes) => serde_json::from_slice(bytes)?,
            _ => return Ok(None),
        };
        Ok(Some(Value::from(serde_json::to_value(abi)?)))
    }
}
