//! Codecs for the primitive and composite types of the schema language.

use super::{present, Type, TypeRef};
use crate::{Error, Registry, Value};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use chrono::{DateTime, NaiveDateTime, Utc};
use eosio_codec::{util::at_least, varint, Error as CodecError, RangeCfg, Read, ReadExt, Write};
use eosio_utils::{from_hex, hex};
use serde_json::{json, Value as JsonValue};
use std::{cmp::Ordering, sync::Arc};

/// Largest `fixed_bytesN` accepted in a schema.
pub const MAX_FIXED_BYTES: usize = 1024;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const TIME_FORMAT_INPUT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Resolves a primitive type name.
pub fn lookup(name: &str) -> Option<TypeRef> {
    let ty: TypeRef = match name {
        "bool" => Arc::new(Bool),
        "uint8" => Arc::new(Integer::new("uint8", Width::U8)),
        "uint16" => Arc::new(Integer::new("uint16", Width::U16)),
        "uint32" => Arc::new(Integer::new("uint32", Width::U32)),
        "uint64" => Arc::new(Integer::new("uint64", Width::U64)),
        "int8" => Arc::new(Integer::new("int8", Width::I8)),
        "int16" => Arc::new(Integer::new("int16", Width::I16)),
        "int32" => Arc::new(Integer::new("int32", Width::I32)),
        "int64" => Arc::new(Integer::new("int64", Width::I64)),
        "varuint32" => Arc::new(Integer::new("varuint32", Width::VarU32)),
        "varint32" => Arc::new(Integer::new("varint32", Width::VarI32)),
        "string" => Arc::new(Text),
        "bytes" => Arc::new(Blob),
        "time" => Arc::new(Time),
        _ => {
            let len = name
                .strip_prefix("fixed_bytes")?
                .parse::<usize>()
                .ok()
                .filter(|len| (1..=MAX_FIXED_BYTES).contains(len))?;
            Arc::new(FixedBytes::new(len))
        }
    };
    Some(ty)
}

/// Writes `data` prefixed with its `varuint32` length.
pub(crate) fn write_prefixed(buf: &mut BytesMut, data: &[u8]) -> Result<(), Error> {
    let len = u32::try_from(data.len()).map_err(|_| CodecError::InvalidLength(data.len()))?;
    varint::write(len, buf);
    buf.put_slice(data);
    Ok(())
}

/// Reads a `varuint32` length and splits that many bytes off the front of `buf`.
pub(crate) fn read_prefixed(buf: &mut Bytes) -> Result<Bytes, Error> {
    let len = varint::read::<u32>(buf)? as usize;
    at_least(buf, len)?;
    Ok(buf.split_to(len))
}

/// Accepts raw bytes or a hex string.
pub(crate) fn bytes_of(kind: &'static str, value: &Value) -> Result<Bytes, Error> {
    match value {
        Value::Bytes(bytes) => Ok(bytes.clone()),
        Value::String(s) => from_hex(s)
            .map(Bytes::from)
            .ok_or_else(|| Error::malformed(kind, format!("'{s}' is not hex"))),
        other => Err(Error::malformed(
            kind,
            format!("expected bytes or a hex string, found {}", other.kind()),
        )),
    }
}

/// Orders display values: numbers numerically, strings lexically, containers element-wise.
pub(crate) fn compare(a: &JsonValue, b: &JsonValue) -> Ordering {
    fn rank(value: &JsonValue) -> u8 {
        match value {
            JsonValue::Null => 0,
            JsonValue::Bool(_) => 1,
            JsonValue::Number(_) => 2,
            JsonValue::String(_) => 3,
            JsonValue::Array(_) => 4,
            JsonValue::Object(_) => 5,
        }
    }
    fn elementwise<'a>(
        mut a: impl ExactSizeIterator<Item = &'a JsonValue>,
        mut b: impl ExactSizeIterator<Item = &'a JsonValue>,
    ) -> Ordering {
        let by_len = a.len().cmp(&b.len());
        loop {
            match (a.next(), b.next()) {
                (Some(x), Some(y)) => match compare(x, y) {
                    Ordering::Equal => continue,
                    order => return order,
                },
                _ => return by_len,
            }
        }
    }

    match (a, b) {
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
        (JsonValue::Number(x), JsonValue::Number(y)) => {
            match (x.as_i64(), y.as_i64()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => x
                    .as_f64()
                    .unwrap_or_default()
                    .total_cmp(&y.as_f64().unwrap_or_default()),
            }
        }
        (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
        (JsonValue::Array(x), JsonValue::Array(y)) => elementwise(x.iter(), y.iter()),
        (JsonValue::Object(x), JsonValue::Object(y)) => elementwise(x.values(), y.values()),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    VarU32,
    VarI32,
}

/// Fixed-width little-endian and variable-length integers.
///
/// 64-bit integers display as strings so they survive JSON consumers that only have doubles.
#[derive(Debug)]
pub struct Integer {
    name: &'static str,
    width: Width,
}

impl Integer {
    pub fn new(name: &'static str, width: Width) -> Self {
        Self { name, width }
    }

    fn bounds(&self) -> (i128, i128) {
        match self.width {
            Width::U8 => (0, u8::MAX.into()),
            Width::U16 => (0, u16::MAX.into()),
            Width::U32 | Width::VarU32 => (0, u32::MAX.into()),
            Width::U64 => (0, u64::MAX.into()),
            Width::I8 => (i8::MIN.into(), i8::MAX.into()),
            Width::I16 => (i16::MIN.into(), i16::MAX.into()),
            Width::I32 | Width::VarI32 => (i32::MIN.into(), i32::MAX.into()),
            Width::I64 => (i64::MIN.into(), i64::MAX.into()),
        }
    }

    fn is_wide(&self) -> bool {
        matches!(self.width, Width::U64 | Width::I64)
    }

    fn parse(&self, value: &Value) -> Result<i128, Error> {
        let n = match value {
            Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .ok_or_else(|| Error::malformed("integer", format!("{n} is not an integer")))?,
            Value::String(s) => s
                .trim()
                .parse::<i128>()
                .map_err(|_| Error::malformed("integer", format!("'{s}' is not an integer")))?,
            other => return Err(Error::unexpected(self.name, "integer", other)),
        };
        let (min, max) = self.bounds();
        if n < min || n > max {
            return Err(Error::malformed(
                "integer",
                format!("{n} is out of range for {}", self.name),
            ));
        }
        Ok(n)
    }

    fn render(&self, n: i128) -> JsonValue {
        if self.is_wide() {
            JsonValue::String(n.to_string())
        } else {
            number(n).to_json()
        }
    }
}

/// Converts an in-range integer to a value.
fn number(n: i128) -> Value {
    if n >= 0 {
        Value::from(n as u64)
    } else {
        Value::from(n as i64)
    }
}

impl Type for Integer {
    fn name(&self) -> &str {
        self.name
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        let n: i128 = match self.width {
            Width::U8 => u8::read(buf)?.into(),
            Width::U16 => u16::read(buf)?.into(),
            Width::U32 => u32::read(buf)?.into(),
            Width::U64 => u64::read(buf)?.into(),
            Width::I8 => i8::read(buf)?.into(),
            Width::I16 => i16::read(buf)?.into(),
            Width::I32 => i32::read(buf)?.into(),
            Width::I64 => i64::read(buf)?.into(),
            Width::VarU32 => varint::read::<u32>(buf)?.into(),
            Width::VarI32 => varint::read_signed::<u32, i32>(buf)?.into(),
        };
        Ok(number(n))
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        // Bounds are checked by parse, so the narrowing casts are exact.
        let n = self.parse(value)?;
        match self.width {
            Width::U8 => (n as u8).write(buf),
            Width::U16 => (n as u16).write(buf),
            Width::U32 => (n as u32).write(buf),
            Width::U64 => (n as u64).write(buf),
            Width::I8 => (n as i8).write(buf),
            Width::I16 => (n as i16).write(buf),
            Width::I32 => (n as i32).write(buf),
            Width::I64 => (n as i64).write(buf),
            Width::VarU32 => varint::write(n as u32, buf),
            Width::VarI32 => varint::write_signed::<u32, i32>(n as i32, buf),
        }
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        self.parse(value).map(number)
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Ok(self.render(self.parse(value)?)),
            None if defaults => Ok(self.render(0)),
            None => Ok(JsonValue::Null),
        }
    }
}

#[derive(Debug)]
pub struct Bool;

impl Bool {
    fn parse(value: &Value) -> Result<bool, Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
            Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
            other => Err(Error::unexpected("bool", "bool", other)),
        }
    }
}

impl Type for Bool {
    fn name(&self) -> &str {
        "bool"
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        Ok(Value::Bool(bool::read(buf)?))
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        Self::parse(value)?.write(buf);
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        Self::parse(value).map(Value::Bool)
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Ok(JsonValue::Bool(Self::parse(value)?)),
            None if defaults => Ok(JsonValue::Bool(false)),
            None => Ok(JsonValue::Null),
        }
    }
}

/// Length-prefixed UTF-8 string.
#[derive(Debug)]
pub struct Text;

impl Type for Text {
    fn name(&self) -> &str {
        "string"
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        Ok(Value::String(String::read_cfg(buf, &RangeCfg::default())?))
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        let s = value
            .as_str()
            .ok_or_else(|| Error::unexpected("string", "string", value))?;
        write_prefixed(buf, s.as_bytes())
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(Error::unexpected("string", "string", other)),
        }
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(Value::String(s)) => Ok(JsonValue::String(s.clone())),
            Some(other) => Err(Error::unexpected("string", "string", other)),
            None if defaults => Ok(json!("")),
            None => Ok(JsonValue::Null),
        }
    }
}

/// Length-prefixed raw bytes, displayed as hex.
#[derive(Debug)]
pub struct Blob;

impl Type for Blob {
    fn name(&self) -> &str {
        "bytes"
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        Ok(Value::Bytes(read_prefixed(buf)?))
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        write_prefixed(buf, &bytes_of("bytes", value)?)
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        bytes_of("bytes", value).map(Value::Bytes)
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Ok(JsonValue::String(hex(&bytes_of("bytes", value)?))),
            None if defaults => Ok(json!("")),
            None => Ok(JsonValue::Null),
        }
    }
}

/// Fixed-length raw bytes (`fixed_bytesN`), without a length prefix.
#[derive(Debug)]
pub struct FixedBytes {
    name: String,
    len: usize,
}

impl FixedBytes {
    pub fn new(len: usize) -> Self {
        Self {
            name: format!("fixed_bytes{len}"),
            len,
        }
    }

    fn parse(&self, value: &Value) -> Result<Bytes, Error> {
        let bytes = bytes_of("fixed_bytes", value)?;
        if bytes.len() != self.len {
            return Err(Error::malformed(
                "fixed_bytes",
                format!("{} expects {} bytes, found {}", self.name, self.len, bytes.len()),
            ));
        }
        Ok(bytes)
    }
}

impl Type for FixedBytes {
    fn name(&self) -> &str {
        &self.name
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        at_least(buf, self.len)?;
        Ok(Value::Bytes(buf.split_to(self.len)))
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        buf.put_slice(&self.parse(value)?);
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        self.parse(value).map(Value::Bytes)
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Ok(JsonValue::String(hex(&self.parse(value)?))),
            None if defaults => Ok(JsonValue::String(hex(&vec![0; self.len]))),
            None => Ok(JsonValue::Null),
        }
    }
}

/// Seconds since the unix epoch as a `uint32`, exchanged as `YYYY-MM-DDTHH:MM:SS` (UTC).
#[derive(Debug)]
pub struct Time;

impl Time {
    fn parse(value: &Value) -> Result<u32, Error> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| Error::malformed("time", format!("{n} is out of range"))),
            Value::String(s) => {
                let text = s.trim_end_matches('Z');
                let parsed = NaiveDateTime::parse_from_str(text, TIME_FORMAT_INPUT)
                    .map_err(|err| Error::malformed("time", format!("'{s}': {err}")))?;
                u32::try_from(parsed.and_utc().timestamp())
                    .map_err(|_| Error::malformed("time", format!("'{s}' is out of range")))
            }
            other => Err(Error::unexpected("time", "string", other)),
        }
    }

    fn format(seconds: u32) -> Result<String, Error> {
        DateTime::<Utc>::from_timestamp(i64::from(seconds), 0)
            .map(|time| time.format(TIME_FORMAT).to_string())
            .ok_or_else(|| Error::malformed("time", format!("{seconds} is out of range")))
    }
}

impl Type for Time {
    fn name(&self) -> &str {
        "time"
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        Self::format(u32::read(buf)?).map(Value::String)
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        Self::parse(value)?.write(buf);
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        Self::format(Self::parse(value)?).map(Value::String)
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Self::format(Self::parse(value)?).map(JsonValue::String),
            None if defaults => Self::format(0).map(JsonValue::String),
            None => Ok(JsonValue::Null),
        }
    }
}

/// `T[]`: a `varuint32` count followed by the elements.
///
/// Sorted vectors order their elements by display value on normalization and on encode.
#[derive(Debug)]
pub struct Vector {
    name: String,
    element: TypeRef,
    sorted: bool,
}

impl Vector {
    pub fn new(element: TypeRef, sorted: bool) -> Self {
        Self {
            name: format!("{}[]", element.name()),
            element,
            sorted,
        }
    }

    fn items<'a>(&self, value: &'a Value) -> Result<&'a [Value], Error> {
        match value {
            Value::Array(items) => Ok(items),
            other => Err(Error::unexpected(&self.name, "array", other)),
        }
    }

    fn sort(&self, items: Vec<Value>, registry: &Registry) -> Result<Vec<Value>, Error> {
        let mut keyed = items
            .into_iter()
            .map(|item| Ok((self.element.to_display(Some(&item), false, registry)?, item)))
            .collect::<Result<Vec<_>, Error>>()?;
        keyed.sort_by(|(a, _), (b, _)| compare(a, b));
        Ok(keyed.into_iter().map(|(_, item)| item).collect())
    }
}

impl Type for Vector {
    fn name(&self) -> &str {
        &self.name
    }

    fn decode_from_wire(&self, buf: &mut Bytes, registry: &Registry) -> Result<Value, Error> {
        let count = varint::read::<u32>(buf)? as usize;
        let mut items = Vec::with_capacity(count.min(buf.remaining()));
        for _ in 0..count {
            items.push(self.element.decode_from_wire(buf, registry)?);
        }
        Ok(Value::Array(items))
    }

    fn encode_to_wire(
        &self,
        buf: &mut BytesMut,
        value: &Value,
        registry: &Registry,
    ) -> Result<(), Error> {
        let items = self.items(value)?;
        let count = u32::try_from(items.len()).map_err(|_| CodecError::InvalidLength(items.len()))?;
        varint::write(count, buf);
        if self.sorted {
            for item in self.sort(items.to_vec(), registry)? {
                self.element.encode_to_wire(buf, &item, registry)?;
            }
        } else {
            for item in items {
                self.element.encode_to_wire(buf, item, registry)?;
            }
        }
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, registry: &Registry) -> Result<Value, Error> {
        let items = self
            .items(value)?
            .iter()
            .map(|item| self.element.from_shorthand(item, registry))
            .collect::<Result<Vec<_>, Error>>()?;
        if self.sorted {
            return self.sort(items, registry).map(Value::Array);
        }
        Ok(Value::Array(items))
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        registry: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => self
                .items(value)?
                .iter()
                .map(|item| self.element.to_display(Some(item), defaults, registry))
                .collect::<Result<Vec<_>, Error>>()
                .map(JsonValue::Array),
            None if defaults => Ok(json!([])),
            None => Ok(JsonValue::Null),
        }
    }
}

/// `T?`: a presence byte followed by the value when present.
#[derive(Debug)]
pub struct Optional {
    name: String,
    inner: TypeRef,
}

impl Optional {
    pub fn new(inner: TypeRef) -> Self {
        Self {
            name: format!("{}?", inner.name()),
            inner,
        }
    }
}

impl Type for Optional {
    fn name(&self) -> &str {
        &self.name
    }

    fn decode_from_wire(&self, buf: &mut Bytes, registry: &Registry) -> Result<Value, Error> {
        if bool::read(buf)? {
            return self.inner.decode_from_wire(buf, registry);
        }
        Ok(Value::Null)
    }

    fn encode_to_wire(
        &self,
        buf: &mut BytesMut,
        value: &Value,
        registry: &Registry,
    ) -> Result<(), Error> {
        if value.is_null() {
            false.write(buf);
            return Ok(());
        }
        true.write(buf);
        self.inner.encode_to_wire(buf, value, registry)
    }

    fn from_shorthand(&self, value: &Value, registry: &Registry) -> Result<Value, Error> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        self.inner.from_shorthand(value, registry)
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        registry: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => self.inner.to_display(Some(value), defaults, registry),
            None => Ok(JsonValue::Null),
        }
    }

    fn is_optional(&self) -> bool {
        true
    }
}

/// Tagged union: a `varuint32` arm index followed by that arm's value.
///
/// In memory the value is a [Value::Variant]; a two-element array whose first element is an
/// integer is accepted as the same pair.
#[derive(Debug)]
pub struct StaticVariant {
    name: String,
    arms: Vec<TypeRef>,
}

impl StaticVariant {
    pub fn new(name: impl Into<String>, arms: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            arms,
        }
    }

    /// Returns the codec of arm `tag`.
    pub fn arm(&self, tag: u32) -> Result<&TypeRef, Error> {
        self.arms.get(tag as usize).ok_or_else(|| {
            Error::malformed(
                "variant",
                format!("tag {tag} is out of range for {} ({} arms)", self.name, self.arms.len()),
            )
        })
    }

    /// Splits a pair-shaped value into its tag and payload.
    pub fn pair(value: &Value) -> Option<(u32, &Value)> {
        match value {
            Value::Variant(tag, payload) => Some((*tag, payload)),
            Value::Array(items) if items.len() == 2 => match &items[0] {
                Value::Number(tag) => {
                    let tag = u32::try_from(tag.as_u64()?).ok()?;
                    Some((tag, &items[1]))
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn expect_pair<'a>(&self, value: &'a Value) -> Result<(u32, &'a Value), Error> {
        Self::pair(value).ok_or_else(|| Error::unexpected(&self.name, "[tag, value] pair", value))
    }
}

impl Type for StaticVariant {
    fn name(&self) -> &str {
        &self.name
    }

    fn decode_from_wire(&self, buf: &mut Bytes, registry: &Registry) -> Result<Value, Error> {
        let tag = varint::read::<u32>(buf)?;
        let payload = self.arm(tag)?.decode_from_wire(buf, registry)?;
        Ok(Value::Variant(tag, Box::new(payload)))
    }

    fn encode_to_wire(
        &self,
        buf: &mut BytesMut,
        value: &Value,
        registry: &Registry,
    ) -> Result<(), Error> {
        let (tag, payload) = self.expect_pair(value)?;
        let arm = self.arm(tag)?;
        varint::write(tag, buf);
        arm.encode_to_wire(buf, payload, registry)
    }

    fn from_shorthand(&self, value: &Value, registry: &Registry) -> Result<Value, Error> {
        let (tag, payload) = self.expect_pair(value)?;
        let payload = self.arm(tag)?.from_shorthand(payload, registry)?;
        Ok(Value::Variant(tag, Box::new(payload)))
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        registry: &Registry,
    ) -> Result<JsonValue, Error> {
        let (tag, payload) = match present(value) {
            Some(value) => self.expect_pair(value)?,
            None if defaults => return Ok(json!([0, self.arm(0)?.to_display(None, true, registry)?])),
            None => return Ok(JsonValue::Null),
        };
        let payload = self.arm(tag)?.to_display(Some(payload), defaults, registry)?;
        Ok(json!([tag, payload]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn registry() -> Registry {
        Registry::new(Config::default()).unwrap()
    }

    fn roundtrip(ty: &TypeRef, value: Value, expected_hex: &str) {
        let registry = registry();
        let encoded = registry.encode(ty.as_ref(), &value).unwrap();
        assert_eq!(hex(&encoded), expected_hex);
        assert_eq!(registry.decode(ty.as_ref(), encoded).unwrap(), value);
    }

    #[test]
    fn test_lookup() {
        for name in ["bool", "uint8", "int64", "varuint32", "string", "bytes", "time", "fixed_bytes32"] {
            assert_eq!(lookup(name).unwrap().name(), name);
        }
        assert!(lookup("fixed_bytes0").is_none());
        assert!(lookup("fixed_bytes1025").is_none());
        assert!(lookup("uint128").is_none());
    }

    #[test]
    fn test_integers() {
        roundtrip(&lookup("uint16").unwrap(), Value::from(0x0102u64), "0201");
        roundtrip(&lookup("int8").unwrap(), Value::from(-1i64), "ff");
        roundtrip(&lookup("varuint32").unwrap(), Value::from(300u64), "ac02");
        roundtrip(&lookup("varint32").unwrap(), Value::from(-1i64), "01");

        let registry = registry();
        let uint8 = lookup("uint8").unwrap();
        assert!(matches!(
            uint8.from_shorthand(&Value::from(256u64), &registry),
            Err(Error::MalformedScalar { kind: "integer", .. })
        ));
        assert_eq!(
            uint8.from_shorthand(&Value::from("7"), &registry).unwrap(),
            Value::from(7u64)
        );
    }

    #[test]
    fn test_wide_integers_display_as_strings() {
        let registry = registry();
        let uint64 = lookup("uint64").unwrap();
        let value = uint64.from_shorthand(&Value::from("18446744073709551615"), &registry).unwrap();
        assert_eq!(value, Value::from(u64::MAX));
        assert_eq!(
            uint64.to_display(Some(&value), false, &registry).unwrap(),
            json!("18446744073709551615")
        );
        let uint32 = lookup("uint32").unwrap();
        assert_eq!(uint32.to_display(None, true, &registry).unwrap(), json!(0));
        assert_eq!(uint32.to_display(None, false, &registry).unwrap(), JsonValue::Null);
    }

    #[test]
    fn test_bytes() {
        let registry = registry();
        let bytes = lookup("bytes").unwrap();
        let value = bytes.from_shorthand(&Value::from("030a0b0c"), &registry).unwrap();
        assert_eq!(value, Value::Bytes(Bytes::from_static(&[3, 10, 11, 12])));
        roundtrip(&bytes, value.clone(), "04030a0b0c");
        assert_eq!(bytes.to_display(Some(&value), false, &registry).unwrap(), json!("030a0b0c"));
        assert!(bytes.from_shorthand(&Value::from("xyz"), &registry).is_err());
    }

    #[test]
    fn test_fixed_bytes() {
        let registry = registry();
        let fixed = lookup("fixed_bytes2").unwrap();
        roundtrip(&fixed, Value::Bytes(Bytes::from_static(&[1, 2])), "0102");
        assert!(fixed.from_shorthand(&Value::from("010203"), &registry).is_err());
        assert_eq!(fixed.to_display(None, true, &registry).unwrap(), json!("0000"));
    }

    #[test]
    fn test_time() {
        let registry = registry();
        let time = lookup("time").unwrap();
        let value = time
            .from_shorthand(&Value::from("2018-01-01T00:00:00.000Z"), &registry)
            .unwrap();
        assert_eq!(value, Value::from("2018-01-01T00:00:00"));
        // 1514764800 = 0x5a497a00
        roundtrip(&time, value, "007a495a");
        assert_eq!(
            time.to_display(None, true, &registry).unwrap(),
            json!("1970-01-01T00:00:00")
        );
    }

    #[test]
    fn test_string() {
        roundtrip(&lookup("string").unwrap(), Value::from("abc"), "03616263");
        let registry = registry();
        let encoded = Bytes::from_static(&[0x02, 0xff, 0xfe]);
        assert!(matches!(
            registry.decode(lookup("string").unwrap().as_ref(), encoded),
            Err(Error::Codec(CodecError::InvalidUtf8))
        ));
    }

    #[test]
    fn test_optional() {
        let optional: TypeRef = Arc::new(Optional::new(lookup("uint8").unwrap()));
        assert_eq!(optional.name(), "uint8?");
        roundtrip(&optional, Value::Null, "00");
        roundtrip(&optional, Value::from(5u64), "0105");
    }

    #[test]
    fn test_vector_sorted() {
        let registry = registry();
        let vector = Vector::new(lookup("uint16").unwrap(), true);
        let value = vector
            .from_shorthand(&Value::from(serde_json::json!([3, 1, 2])), &registry)
            .unwrap();
        assert_eq!(value, Value::from(serde_json::json!([1, 2, 3])));

        let unsorted = Value::from(serde_json::json!([2, 1]));
        let encoded = registry.encode(&vector, &unsorted).unwrap();
        assert_eq!(hex(&encoded), "0201000200");
    }

    #[test]
    fn test_vector_count_exceeds_buffer() {
        let registry = registry();
        let vector = Vector::new(lookup("uint8").unwrap(), false);
        let encoded = Bytes::from_static(&[0xff, 0xff, 0xff, 0xff, 0x0f, 0x01]);
        assert!(matches!(
            registry.decode(&vector, encoded),
            Err(Error::Codec(CodecError::EndOfBuffer))
        ));
    }

    #[test]
    fn test_static_variant() {
        let registry = registry();
        let variant: TypeRef = Arc::new(StaticVariant::new(
            "choice",
            vec![lookup("uint8").unwrap(), lookup("string").unwrap()],
        ));
        roundtrip(&variant, Value::Variant(1, Box::new(Value::from("a"))), "010161");
        let pair = Value::from(json!([0, 9]));
        assert_eq!(
            variant.from_shorthand(&pair, &registry).unwrap(),
            Value::Variant(0, Box::new(Value::from(9u64)))
        );
        assert!(matches!(
            variant.from_shorthand(&Value::from(json!([2, 9])), &registry),
            Err(Error::MalformedScalar { kind: "variant", .. })
        ));
        assert_eq!(
            variant.to_display(Some(&pair), false, &registry).unwrap(),
            json!([0, 9])
        );
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(
            compare(&json!({"k": "a", "w": 2}), &json!({"k": "a", "w": 1})),
            Ordering::Greater
        );
        assert_eq!(compare(&json!([1]), &json!([1, 0])), Ordering::Less);
    }
}
