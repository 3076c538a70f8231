//! Schema definitions: named aliases and structs, loaded from JSON.
//!
//! ```json
//! {
//!     "account_name": "name",
//!     "permission_level": {"fields": {"actor": "account_name", "permission": "permission_name"}},
//!     "transaction": {"base": "transaction_header", "fields": {"actions": "action[]"}}
//! }
//! ```
//!
//! Field types may carry the suffixes `[]` (vector) and `?` (optional). Field order is the wire
//! order.

use crate::error::{SchemaError, SchemaErrors};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

const SYSTEM: &str = include_str!("schema.json");

/// A single schema entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Definition {
    /// Another name for a type expression.
    Alias(String),
    /// A struct, optionally extending `base`, with ordered `(field, type)` pairs.
    Struct {
        base: Option<String>,
        fields: Vec<(String, String)>,
    },
}

/// A set of named definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    definitions: BTreeMap<String, Definition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Definitions of the system contract and the transaction envelope.
    pub fn system() -> Result<Self, SchemaErrors> {
        let json: JsonValue = serde_json::from_str(SYSTEM).map_err(|err| {
            SchemaErrors(vec![SchemaError::Malformed {
                name: "system".into(),
                reason: err.to_string(),
            }])
        })?;
        Self::from_json(&json)
    }

    /// Parses a schema, reporting every malformed entry.
    pub fn from_json(json: &JsonValue) -> Result<Self, SchemaErrors> {
        let Some(entries) = json.as_object() else {
            return Err(SchemaErrors(vec![SchemaError::Malformed {
                name: "schema".into(),
                reason: "expected an object".into(),
            }]));
        };

        let mut schema = Schema::new();
        let mut errors = Vec::new();
        for (name, entry) in entries {
            match parse_definition(name, entry) {
                Ok(definition) => schema.insert(name, definition),
                Err(err) => errors.push(err),
            }
        }
        if !errors.is_empty() {
            return Err(SchemaErrors(errors));
        }
        Ok(schema)
    }

    pub fn insert(&mut self, name: impl Into<String>, definition: Definition) {
        self.definitions.insert(name.into(), definition);
    }

    /// Adds (or replaces) every definition of `other`.
    pub fn extend(&mut self, other: Schema) {
        self.definitions.extend(other.definitions);
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn parse_definition(name: &str, entry: &JsonValue) -> Result<Definition, SchemaError> {
    let malformed = |reason: &str| SchemaError::Malformed {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    match entry {
        JsonValue::String(target) => Ok(Definition::Alias(target.clone())),
        JsonValue::Object(def) => {
            let base = match def.get("base") {
                None | Some(JsonValue::Null) => None,
                Some(JsonValue::String(base)) if base.is_empty() => None,
                Some(JsonValue::String(base)) => Some(base.clone()),
                Some(_) => return Err(malformed("base must be a string")),
            };
            let fields = match def.get("fields") {
                None => Vec::new(),
                Some(JsonValue::Object(fields)) => fields
                    .iter()
                    .map(|(field, ty)| match ty {
                        JsonValue::String(ty) => Ok((field.clone(), ty.clone())),
                        _ => Err(malformed("field types must be strings")),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                Some(_) => return Err(malformed("fields must be an object")),
            };
            Ok(Definition::Struct { base, fields })
        }
        _ => Err(malformed("expected a type name or a struct definition")),
    }
}
