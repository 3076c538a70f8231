//! Codecs for every type a schema can name.
//!
//! Each codec implements [Type]: the four conversions between the wire form, the in-memory
//! [Value] and the JSON display form. Codecs are shared as [TypeRef] and receive the owning
//! [Registry] on every call, so a codec can resolve further types at runtime (see
//! [crate::overrides::ActionData]).

use crate::{Error, Registry, Value};
use bytes::{Bytes, BytesMut};
use serde_json::Value as JsonValue;
use std::{collections::BTreeMap, fmt, sync::Arc};

pub mod asset;
pub mod base;
pub mod extended_asset;
pub mod keys;
pub mod name;
pub mod structure;
pub mod symbol;
pub mod variant;

pub use asset::Asset;
pub use base::{lookup as base_type, Blob, Bool, FixedBytes, Integer, Optional, StaticVariant, Text, Time, Vector};
pub use extended_asset::ExtendedAsset;
pub use keys::{PublicKeyCodec, SignatureCodec};
pub use name::Name;
pub use structure::{Field, StructType};
pub use symbol::Symbol;
pub use variant::{Variant, VariantInput};

/// Shared handle to a codec.
pub type TypeRef = Arc<dyn Type>;

/// Conversions implemented by every codec.
///
/// `from_shorthand` accepts loose user input and returns the canonical in-memory value.
/// `to_display` renders an in-memory value for humans; when `value` is absent and `defaults`
/// is set, a placeholder is produced instead.
pub trait Type: Send + Sync + fmt::Debug {
    /// Name under which the codec is registered.
    fn name(&self) -> &str;

    /// Reads a value from the front of `buf`.
    fn decode_from_wire(&self, buf: &mut Bytes, registry: &Registry) -> Result<Value, Error>;

    /// Appends the wire form of `value` to `buf`.
    fn encode_to_wire(
        &self,
        buf: &mut BytesMut,
        value: &Value,
        registry: &Registry,
    ) -> Result<(), Error>;

    /// Normalizes user input into the canonical in-memory value.
    fn from_shorthand(&self, value: &Value, registry: &Registry) -> Result<Value, Error>;

    /// Renders a value for display.
    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        registry: &Registry,
    ) -> Result<JsonValue, Error>;

    /// Whether an absent value is acceptable.
    fn is_optional(&self) -> bool {
        false
    }

    /// Returns the struct definition if this codec is a struct.
    fn as_struct(&self) -> Option<&StructType> {
        None
    }
}

/// Treats an explicit null like an absent value.
pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

/// Requires a string value.
pub(crate) fn expect_str<'a>(kind: &'static str, value: &'a Value) -> Result<&'a str, Error> {
    value
        .as_str()
        .ok_or_else(|| Error::malformed(kind, format!("expected a string, found {}", value.kind())))
}

/// Codecs with custom wire and text forms, registered under their schema names.
pub fn builtin() -> BTreeMap<String, TypeRef> {
    let mut types: BTreeMap<String, TypeRef> = BTreeMap::new();
    types.insert("name".into(), Arc::new(Name));
    types.insert("symbol".into(), Arc::new(Symbol));
    types.insert("asset".into(), Arc::new(Asset));
    types.insert("extended_asset".into(), Arc::new(ExtendedAsset));
    types.insert(
        "public_key".into(),
        Arc::new(Variant::new("public_key", vec![Arc::new(PublicKeyCodec)])),
    );
    types.insert(
        "signature".into(),
        Arc::new(Variant::new("signature", vec![Arc::new(SignatureCodec)])),
    );
    types
}
