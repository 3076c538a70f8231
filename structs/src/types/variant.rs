//! Variant wrapper for types whose bare value stands for the first arm.

use super::{present, StaticVariant, Type, TypeRef};
use crate::{Error, Registry, Value};
use bytes::{Bytes, BytesMut};
use serde_json::{json, Value as JsonValue};

/// The two ways a variant value may be supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantInput<'a> {
    /// An explicit `(tag, payload)` pair.
    Tagged(u32, &'a Value),
    /// A payload for arm 0.
    Bare(&'a Value),
}

impl<'a> VariantInput<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match StaticVariant::pair(value) {
            Some((tag, payload)) => VariantInput::Tagged(tag, payload),
            None => VariantInput::Bare(value),
        }
    }

    pub fn split(self) -> (u32, &'a Value) {
        match self {
            VariantInput::Tagged(tag, payload) => (tag, payload),
            VariantInput::Bare(payload) => (0, payload),
        }
    }
}

/// A [StaticVariant] that accepts and produces bare payloads for arm 0.
///
/// Only arm 0 is unwrapped. A pair with a non-zero tag is intentionally kept as `[tag, payload]`
/// on display and as [Value::Variant] after normalization, so the selected arm is never lost.
#[derive(Debug)]
pub struct Variant {
    inner: StaticVariant,
}

impl Variant {
    pub fn new(name: impl Into<String>, arms: Vec<TypeRef>) -> Self {
        Self {
            inner: StaticVariant::new(name, arms),
        }
    }
}

impl Type for Variant {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn decode_from_wire(&self, buf: &mut Bytes, registry: &Registry) -> Result<Value, Error> {
        self.inner.decode_from_wire(buf, registry)
    }

    fn encode_to_wire(
        &self,
        buf: &mut BytesMut,
        value: &Value,
        registry: &Registry,
    ) -> Result<(), Error> {
        let (tag, payload) = VariantInput::classify(value).split();
        self.inner
            .encode_to_wire(buf, &Value::Variant(tag, Box::new(payload.clone())), registry)
    }

    fn from_shorthand(&self, value: &Value, registry: &Registry) -> Result<Value, Error> {
        let (tag, payload) = VariantInput::classify(value).split();
        let payload = self.inner.arm(tag)?.from_shorthand(payload, registry)?;
        if tag == 0 {
            return Ok(payload);
        }
        Ok(Value::Variant(tag, Box::new(payload)))
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        registry: &Registry,
    ) -> Result<JsonValue, Error> {
        let Some(value) = present(value) else {
            return self.inner.arm(0)?.to_display(None, defaults, registry);
        };
        let (tag, payload) = VariantInput::classify(value).split();
        let payload = self.inner.arm(tag)?.to_display(Some(payload), defaults, registry)?;
        if tag == 0 {
            return Ok(payload);
        }
        Ok(json!([tag, payload]))
    }
}
