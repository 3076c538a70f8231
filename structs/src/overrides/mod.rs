//! Hooks that replace the default conversion of specific structs and fields.
//!
//! Overrides are registered by key: a struct name (`authority`) installs a [StructHook] that may
//! expand shorthand input before the struct normalizes it; `struct.field` (`action.data`)
//! installs a [FieldHook] consulted before the field's declared codec. A hook answers `None`
//! (or `false`) to fall back to the declared codec.

use crate::{types::Field, Error, Map, Registry, Value};
use bytes::{Bytes, BytesMut};
use serde_json::Value as JsonValue;
use std::{collections::BTreeMap, fmt, sync::Arc};

mod abi;
mod action;
mod authority;
mod wasm;

pub use abi::AbiShorthand;
pub use action::{ActionData, Payload};
pub use authority::{AuthorityInput, AuthorityShorthand};
pub use wasm::{Assembler, WasmCode};

/// What a field hook can see of the struct being converted.
pub struct FieldContext<'a> {
    pub registry: &'a Registry,
    /// Name of the enclosing struct.
    pub structure: &'a str,
    /// The field being converted, with its declared codec.
    pub field: &'a Field,
    /// Sibling values: the whole input object, or (when decoding) the fields read so far.
    pub object: &'a Map,
}

/// Replaces the conversion of a single struct field.
pub trait FieldHook: Send + Sync + fmt::Debug {
    fn decode_from_wire(
        &self,
        _cx: &FieldContext<'_>,
        _buf: &mut Bytes,
    ) -> Result<Option<Value>, Error> {
        Ok(None)
    }

    /// Returns true if the field was written.
    fn encode_to_wire(
        &self,
        _cx: &FieldContext<'_>,
        _buf: &mut BytesMut,
        _value: &Value,
    ) -> Result<bool, Error> {
        Ok(false)
    }

    fn from_shorthand(&self, _cx: &FieldContext<'_>, _value: &Value) -> Result<Option<Value>, Error> {
        Ok(None)
    }

    fn to_display(
        &self,
        _cx: &FieldContext<'_>,
        _value: Option<&Value>,
        _defaults: bool,
    ) -> Result<Option<JsonValue>, Error> {
        Ok(None)
    }
}

/// Expands shorthand input for a whole struct before its fields are normalized.
pub trait StructHook: Send + Sync + fmt::Debug {
    fn from_shorthand(&self, registry: &Registry, value: &Value) -> Result<Option<Value>, Error>;
}

/// A registered hook.
#[derive(Clone, Debug)]
pub enum Override {
    Struct(Arc<dyn StructHook>),
    Field(Arc<dyn FieldHook>),
}

/// Hooks installed on every registry.
pub fn builtin() -> BTreeMap<String, Override> {
    let mut overrides = BTreeMap::new();
    overrides.insert(
        "authority".to_string(),
        Override::Struct(Arc::new(AuthorityShorthand)),
    );
    overrides.insert("abi".to_string(), Override::Struct(Arc::new(AbiShorthand)));
    overrides.insert("setcode.code".to_string(), Override::Field(Arc::new(WasmCode)));
    overrides.insert("action.data".to_string(), Override::Field(Arc::new(ActionData)));
    overrides
}
