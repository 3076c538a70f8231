//! Resolution of an action's payload type at runtime.
//!
//! `action.data` is declared as `bytes`, but its real type is the struct named by the sibling
//! `name` field within the contract named by `account`. When that struct can be found the
//! payload is converted through it; otherwise it is carried as opaque bytes.

use super::{FieldContext, FieldHook};
use crate::{
    types::base::{read_prefixed, write_prefixed},
    Error, TypeRef, Value,
};
use bytes::{Buf, Bytes, BytesMut};
use eosio_codec::Error as CodecError;
use eosio_utils::{from_hex, hex};
use serde_json::Value as JsonValue;
use tracing::debug;

/// Shapes an action payload may take in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    /// Structured fields.
    Typed(&'a Value),
    /// Already-serialized bytes (from [Value::Bytes] or a hex string).
    Raw(Bytes),
    /// Anything else.
    Other(&'a Value),
}

impl<'a> Payload<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(_) => Payload::Typed(value),
            Value::Bytes(bytes) => Payload::Raw(bytes.clone()),
            Value::String(text) => match from_hex(text) {
                Some(bytes) => Payload::Raw(Bytes::from(bytes)),
                None => Payload::Other(value),
            },
            _ => Payload::Other(value),
        }
    }
}

/// Field hook for `action.data`.
#[derive(Debug)]
pub struct ActionData;

/// Where the payload type came from.
enum Resolved {
    /// A struct found for (`account`, `name`).
    Struct(TypeRef),
    /// No action name was given; the field's declared type applies.
    Declared(TypeRef),
    /// Nothing matched.
    Missing { name: String, account: String },
}

fn sibling<'a>(cx: &FieldContext<'a>, field: &str) -> &'a str {
    cx.object
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

impl ActionData {
    fn resolve(cx: &FieldContext<'_>) -> Result<Resolved, Error> {
        let name = sibling(cx, "name");
        if name.is_empty() {
            return Ok(Resolved::Declared(cx.field.ty.clone()));
        }
        let account = sibling(cx, "account");
        match cx.registry.lookup_struct(name, account)? {
            Some(ty) => Ok(Resolved::Struct(ty)),
            None => {
                debug!(account, name, "no struct for action data");
                Ok(Resolved::Missing {
                    name: name.to_string(),
                    account: account.to_string(),
                })
            }
        }
    }
}

impl FieldHook for ActionData {
    fn decode_from_wire(
        &self,
        cx: &FieldContext<'_>,
        buf: &mut Bytes,
    ) -> Result<Option<Value>, Error> {
        let resolved = Self::resolve(cx)?;
        let mut window = read_prefixed(buf)?;
        let value = match resolved {
            Resolved::Struct(ty) | Resolved::Declared(ty) => {
                let value = ty.decode_from_wire(&mut window, cx.registry)?;
                if window.has_remaining() {
                    return Err(CodecError::ExtraData(window.remaining()).into());
                }
                value
            }
            Resolved::Missing { .. } => Value::Bytes(window),
        };
        Ok(Some(value))
    }

    fn encode_to_wire(
        &self,
        cx: &FieldContext<'_>,
        buf: &mut BytesMut,
        value: &Value,
    ) -> Result<bool, Error> {
        let payload = match (Self::resolve(cx)?, Payload::classify(value)) {
            (Resolved::Struct(_) | Resolved::Missing { .. }, Payload::Raw(bytes)) => bytes,
            (Resolved::Struct(ty) | Resolved::Declared(ty), _) => {
                cx.registry.encode(ty.as_ref(), value)?
            }
            (Resolved::Missing { name, account }, _) => {
                return Err(Error::UnresolvedStructWithoutFallback { name, account })
            }
        };
        write_prefixed(buf, &payload)?;
        Ok(true)
    }

    fn from_shorthand(&self, cx: &FieldContext<'_>, value: &Value) -> Result<Option<Value>, Error> {
        let normalized = match (Self::resolve(cx)?, Payload::classify(value)) {
            (Resolved::Struct(ty), Payload::Raw(bytes)) => cx.registry.decode(ty.as_ref(), bytes)?,
            (Resolved::Struct(ty) | Resolved::Declared(ty), _) => {
                ty.from_shorthand(value, cx.registry)?
            }
            (Resolved::Missing { .. }, _) => value.clone(),
        };
        Ok(Some(normalized))
    }

    fn to_display(
        &self,
        cx: &FieldContext<'_>,
        value: Option<&Value>,
        defaults: bool,
    ) -> Result<Option<JsonValue>, Error> {
        let value = value.filter(|value| !value.is_null());
        let force_hex = cx.registry.config().force_action_data_hex;
        let display = match Self::resolve(cx)? {
            Resolved::Struct(ty) if force_hex => {
                let encoded = match value {
                    None => Bytes::new(),
                    Some(value) => match Payload::classify(value) {
                        Payload::Raw(bytes) => bytes,
                        _ => cx.registry.encode(ty.as_ref(), value)?,
                    },
                };
                JsonValue::String(hex(&encoded))
            }
            Resolved::Struct(ty) => match value.map(Payload::classify) {
                Some(Payload::Raw(bytes)) => {
                    let decoded = cx.registry.decode(ty.as_ref(), bytes)?;
                    ty.to_display(Some(&decoded), defaults, cx.registry)?
                }
                _ => ty.to_display(value, defaults, cx.registry)?,
            },
            Resolved::Declared(ty) => ty.to_display(value, defaults, cx.registry)?,
            Resolved::Missing { .. } => match value {
                Some(value) => value.to_json(),
                None if defaults => JsonValue::String(String::new()),
                None => JsonValue::Null,
            },
        };
        Ok(Some(display))
    }
}
