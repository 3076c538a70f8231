//! Structs: an ordered list of named fields, each with its own codec.

use super::{present, Type, TypeRef};
use crate::{
    overrides::{FieldContext, FieldHook, StructHook},
    Error, Map, Registry, Value,
};
use bytes::{Bytes, BytesMut};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::sync::Arc;

/// A struct field.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    pub(crate) hook: Option<Arc<dyn FieldHook>>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            hook: None,
        }
    }
}

/// Fields are written in declaration order with no framing; base fields come first.
#[derive(Debug)]
pub struct StructType {
    name: String,
    fields: Vec<Field>,
    hook: Option<Arc<dyn StructHook>>,
}

impl StructType {
    pub(crate) fn new(
        name: impl Into<String>,
        fields: Vec<Field>,
        hook: Option<Arc<dyn StructHook>>,
    ) -> Self {
        Self {
            name: name.into(),
            fields,
            hook,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn object<'a>(&self, value: &'a Value) -> Result<&'a Map, Error> {
        value
            .as_object()
            .ok_or_else(|| Error::unexpected(&self.name, "object", value))
    }

    fn missing(&self, field: &Field) -> Error {
        Error::MissingField {
            structure: self.name.clone(),
            field: field.name.clone(),
        }
    }

    fn context<'a>(
        &'a self,
        registry: &'a Registry,
        field: &'a Field,
        object: &'a Map,
    ) -> FieldContext<'a> {
        FieldContext {
            registry,
            structure: &self.name,
            field,
            object,
        }
    }
}

impl Type for StructType {
    fn name(&self) -> &str {
        &self.name
    }

    fn decode_from_wire(&self, buf: &mut Bytes, registry: &Registry) -> Result<Value, Error> {
        let mut object = Map::new();
        for field in &self.fields {
            let hooked = match &field.hook {
                Some(hook) => hook.decode_from_wire(&self.context(registry, field, &object), buf)?,
                None => None,
            };
            let value = match hooked {
                Some(value) => value,
                None => field.ty.decode_from_wire(buf, registry)?,
            };
            object.insert(field.name.clone(), value);
        }
        Ok(Value::Object(object))
    }

    fn encode_to_wire(
        &self,
        buf: &mut BytesMut,
        value: &Value,
        registry: &Registry,
    ) -> Result<(), Error> {
        let object = self.object(value)?;
        for field in &self.fields {
            let value = object.get(&field.name);
            if let Some(hook) = &field.hook {
                let cx = self.context(registry, field, object);
                if hook.encode_to_wire(&cx, buf, value.unwrap_or(&Value::Null))? {
                    continue;
                }
            }
            match value {
                Some(value) => field.ty.encode_to_wire(buf, value, registry)?,
                None if field.ty.is_optional() => {
                    field.ty.encode_to_wire(buf, &Value::Null, registry)?
                }
                None => return Err(self.missing(field)),
            }
        }
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, registry: &Registry) -> Result<Value, Error> {
        let expanded = match &self.hook {
            Some(hook) => hook.from_shorthand(registry, value)?,
            None => None,
        };
        let object = self.object(expanded.as_ref().unwrap_or(value))?;

        let mut normalized = Map::new();
        for field in &self.fields {
            let value = object.get(&field.name);
            let hooked = match &field.hook {
                Some(hook) => {
                    let cx = self.context(registry, field, object);
                    hook.from_shorthand(&cx, value.unwrap_or(&Value::Null))?
                }
                None => None,
            };
            let value = match (hooked, value) {
                (Some(value), _) => value,
                (None, Some(value)) => field.ty.from_shorthand(value, registry)?,
                (None, None) if field.ty.is_optional() => Value::Null,
                (None, None) => return Err(self.missing(field)),
            };
            normalized.insert(field.name.clone(), value);
        }
        Ok(Value::Object(normalized))
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        registry: &Registry,
    ) -> Result<JsonValue, Error> {
        let empty = Map::new();
        let object = match present(value) {
            Some(value) => self.object(value)?,
            None if defaults => &empty,
            None => return Ok(JsonValue::Null),
        };

        let mut rendered = JsonMap::new();
        for field in &self.fields {
            let value = object.get(&field.name);
            let hooked = match &field.hook {
                Some(hook) => {
                    hook.to_display(&self.context(registry, field, object), value, defaults)?
                }
                None => None,
            };
            let display = match hooked {
                Some(display) => display,
                None => field.ty.to_display(value, defaults, registry)?,
            };
            rendered.insert(field.name.clone(), display);
        }
        Ok(JsonValue::Object(rendered))
    }

    fn as_struct(&self) -> Option<&StructType> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{types::base::lookup, Config};
    use eosio_utils::hex;
    use serde_json::json;

    fn pair() -> StructType {
        StructType::new(
            "pair",
            vec![
                Field::new("a", lookup("uint8").unwrap()),
                Field::new("b", lookup("string").unwrap()),
            ],
            None,
        )
    }

    #[test]
    fn test_struct_roundtrip() {
        let registry = Registry::new(Config::default()).unwrap();
        let value = pair()
            .from_shorthand(&Value::from(json!({"b": "x", "a": "1", "ignored": 0})), &registry)
            .unwrap();
        assert_eq!(value, Value::from(json!({"a": 1, "b": "x"})));

        let encoded = registry.encode(&pair(), &value).unwrap();
        assert_eq!(hex(&encoded), "010178");
        assert_eq!(registry.decode(&pair(), encoded).unwrap(), value);
    }

    #[test]
    fn test_display_keeps_field_order() {
        let registry = Registry::new(Config::default()).unwrap();
        let display = pair()
            .to_display(Some(&Value::from(json!({"b": "x", "a": 1}))), false, &registry)
            .unwrap();
        let keys: Vec<_> = display.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(
            pair().to_display(None, true, &registry).unwrap(),
            json!({"a": 0, "b": ""})
        );
    }

    #[test]
    fn test_missing_field() {
        let registry = Registry::new(Config::default()).unwrap();
        let err = pair()
            .from_shorthand(&Value::from(json!({"a": 1})), &registry)
            .unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field, .. } if field == "b"));
        assert!(registry.encode(&pair(), &Value::from(json!({"b": "x"}))).is_err());
    }

    #[test]
    fn test_truncated() {
        let registry = Registry::new(Config::default()).unwrap();
        assert!(matches!(
            registry.decode(&pair(), Bytes::from_static(&[0x01, 0x02, 0x78])),
            Err(Error::Codec(eosio_codec::Error::EndOfBuffer))
        ));
    }
}
