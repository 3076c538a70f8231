//! Compiled schemas and the handles used to convert values through them.

use crate::{
    config::DEFAULT_SORT,
    error::{SchemaError, SchemaErrors},
    overrides::{self, Override},
    schema::{Definition, Schema},
    types::{self, base, Field, Optional, StructType, Type, TypeRef, Vector},
    AbiDef, Config, Error, Value,
};
use bytes::{Bytes, BytesMut};
use eosio_codec::Error as CodecError;
use eosio_utils::is_name;
use serde_json::Value as JsonValue;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::{Arc, Mutex},
};
use tracing::debug;

/// Account whose structs are built in rather than read from an ABI.
pub const SYSTEM_ACCOUNT: &str = "eosio";

/// Every codec of a compiled schema.
pub struct Registry {
    config: Config,
    custom: BTreeMap<String, TypeRef>,
    overrides: BTreeMap<String, Override>,
    sort: BTreeSet<String>,
    types: BTreeMap<String, TypeRef>,
    /// ABI structs compiled so far, keyed by `(account, struct)` and tagged with their ABI.
    compiled: Mutex<BTreeMap<(String, String), (Arc<AbiDef>, TypeRef)>>,
}

impl Registry {
    /// Compiles the system schema.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_schema(config, Schema::new())
    }

    /// Compiles the system schema extended (or overridden) by `extension`.
    ///
    /// Every unresolved or malformed definition is reported in a single
    /// [Error::SchemaConstruction].
    pub fn with_schema(config: Config, extension: Schema) -> Result<Self, Error> {
        let mut schema = Schema::system()?;
        schema.extend(extension);

        let mut custom = types::builtin();
        custom.extend(config.custom_types.clone());
        let mut overrides = overrides::builtin();
        overrides.extend(config.overrides.clone());
        let mut sort: BTreeSet<String> = DEFAULT_SORT.iter().map(|key| key.to_string()).collect();
        sort.extend(config.sort.iter().cloned());

        let types = Builder::new(&schema, &custom, &overrides, &sort, None).build_all()?;
        debug!(
            types = types.len(),
            structs = types.values().filter(|ty| ty.as_struct().is_some()).count(),
            "built registry"
        );
        Ok(Self {
            config,
            custom,
            overrides,
            sort,
            types,
            compiled: Mutex::new(BTreeMap::new()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves a type expression such as `asset`, `permission_level[]` or `uint8?`.
    pub fn resolve(&self, expr: &str) -> Option<TypeRef> {
        if let Some(inner) = expr.strip_suffix("[]") {
            let element = self.resolve(inner)?;
            return Some(Arc::new(Vector::new(element, false)));
        }
        if let Some(inner) = expr.strip_suffix('?') {
            return Some(Arc::new(Optional::new(self.resolve(inner)?)));
        }
        self.types
            .get(expr)
            .or_else(|| self.custom.get(expr))
            .cloned()
            .or_else(|| base::lookup(expr))
    }

    /// Returns a handle to any type.
    pub fn get(&self, expr: &str) -> Result<Handle<'_>, Error> {
        let ty = self
            .resolve(expr)
            .ok_or_else(|| Error::UnknownType(expr.to_string()))?;
        Ok(Handle { registry: self, ty })
    }

    /// Returns a handle to a struct.
    pub fn get_struct(&self, name: &str) -> Result<Handle<'_>, Error> {
        match self.types.get(name) {
            Some(ty) if ty.as_struct().is_some() => Ok(Handle {
                registry: self,
                ty: ty.clone(),
            }),
            _ => Err(Error::UnknownType(name.to_string())),
        }
    }

    /// Names of every compiled struct.
    pub fn structs(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .filter(|(_, ty)| ty.as_struct().is_some())
            .map(|(name, _)| name.as_str())
    }

    /// Finds the struct `name` of contract `account`.
    ///
    /// The system account's structs are built in. Any other account's ABI is searched for a
    /// struct called `name`, then for an action called `name` whose type is a struct. Returns
    /// `None` if the account has no ABI or nothing matches.
    ///
    /// Compiled structs are reused until the provider returns a different ABI for the account.
    pub fn lookup_struct(&self, name: &str, account: &str) -> Result<Option<TypeRef>, Error> {
        if account == SYSTEM_ACCOUNT {
            return Ok(self
                .types
                .get(name)
                .filter(|ty| ty.as_struct().is_some())
                .cloned());
        }
        if !is_name(account) {
            return Err(Error::malformed(
                "name",
                format!("'{account}' is not a valid account name"),
            ));
        }
        let Some(abi) = self.config.abis.abi(account) else {
            debug!(account, "no abi for account");
            return Ok(None);
        };

        let target = if abi.find_struct(name).is_some() {
            name
        } else {
            match abi.action_type(name) {
                Some(ty) if abi.find_struct(ty).is_some() => ty,
                _ => return Ok(None),
            }
        };
        let key = (account.to_string(), target.to_string());
        if let Some((cached, ty)) = self.compiled.lock().unwrap().get(&key) {
            if Arc::ptr_eq(cached, &abi) {
                return Ok(Some(ty.clone()));
            }
        }

        let schema = abi.schema();
        let ty = Builder::new(&schema, &self.custom, &self.overrides, &self.sort, Some(self))
            .build_one(target)?;
        debug!(account, name = target, "compiled abi struct");
        self.compiled
            .lock()
            .unwrap()
            .insert(key, (abi.clone(), ty.clone()));
        Ok(Some(ty))
    }

    /// Encodes `value` as `ty`.
    pub fn encode(&self, ty: &dyn Type, value: &Value) -> Result<Bytes, Error> {
        let mut buf = BytesMut::new();
        ty.encode_to_wire(&mut buf, value, self)?;
        Ok(buf.freeze())
    }

    /// Decodes `bytes` as `ty`, which must consume all of them.
    pub fn decode(&self, ty: &dyn Type, bytes: Bytes) -> Result<Value, Error> {
        let mut buf = bytes;
        let value = ty.decode_from_wire(&mut buf, self)?;
        if !buf.is_empty() {
            return Err(CodecError::ExtraData(buf.len()).into());
        }
        Ok(value)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// A type bound to the registry it was compiled in.
#[derive(Clone)]
pub struct Handle<'a> {
    registry: &'a Registry,
    ty: TypeRef,
}

impl<'a> Handle<'a> {
    pub fn name(&self) -> &str {
        self.ty.name()
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn from_shorthand(&self, value: &Value) -> Result<Value, Error> {
        self.ty.from_shorthand(value, self.registry)
    }

    pub fn to_display(&self, value: Option<&Value>, defaults: bool) -> Result<JsonValue, Error> {
        self.ty.to_display(value, defaults, self.registry)
    }

    pub fn encode(&self, value: &Value) -> Result<Bytes, Error> {
        self.registry.encode(self.ty.as_ref(), value)
    }

    pub fn decode(&self, bytes: impl Into<Bytes>) -> Result<Value, Error> {
        self.registry.decode(self.ty.as_ref(), bytes.into())
    }
}

impl fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.ty.name()).finish()
    }
}

/// Links schema definitions into codecs.
///
/// Names resolve to custom codecs first, then primitives, then schema definitions, then (when
/// compiling an ABI) the types of the `fallback` registry.
struct Builder<'a> {
    schema: &'a Schema,
    custom: &'a BTreeMap<String, TypeRef>,
    overrides: &'a BTreeMap<String, Override>,
    sort: &'a BTreeSet<String>,
    fallback: Option<&'a Registry>,
    built: BTreeMap<String, TypeRef>,
    failed: BTreeSet<String>,
    visiting: Vec<String>,
    errors: Vec<SchemaError>,
}

impl<'a> Builder<'a> {
    fn new(
        schema: &'a Schema,
        custom: &'a BTreeMap<String, TypeRef>,
        overrides: &'a BTreeMap<String, Override>,
        sort: &'a BTreeSet<String>,
        fallback: Option<&'a Registry>,
    ) -> Self {
        Self {
            schema,
            custom,
            overrides,
            sort,
            fallback,
            built: BTreeMap::new(),
            failed: BTreeSet::new(),
            visiting: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn build_all(mut self) -> Result<BTreeMap<String, TypeRef>, SchemaErrors> {
        let schema = self.schema;
        for name in schema.names() {
            self.named(name, name);
        }
        if !self.errors.is_empty() {
            return Err(SchemaErrors(self.errors));
        }
        Ok(self.built)
    }

    fn build_one(mut self, name: &str) -> Result<TypeRef, SchemaErrors> {
        match self.named(name, name) {
            Some(ty) if self.errors.is_empty() => Ok(ty),
            _ => Err(SchemaErrors(self.errors)),
        }
    }

    fn named(&mut self, name: &str, context: &str) -> Option<TypeRef> {
        if let Some(ty) = self.built.get(name).or_else(|| self.custom.get(name)) {
            return Some(ty.clone());
        }
        if let Some(ty) = base::lookup(name) {
            return Some(ty);
        }
        if self.failed.contains(name) {
            return None;
        }

        let schema = self.schema;
        if let Some(definition) = schema.get(name) {
            if self.visiting.iter().any(|visiting| visiting == name) {
                self.errors.push(SchemaError::Cycle(name.to_string()));
                self.failed.insert(name.to_string());
                return None;
            }
            self.visiting.push(name.to_string());
            let ty = match definition {
                Definition::Alias(target) => self.expr(target, name, false),
                Definition::Struct { base, fields } => {
                    self.structure(name, base.as_deref(), fields)
                }
            };
            self.visiting.pop();
            match &ty {
                Some(ty) => {
                    self.built.insert(name.to_string(), ty.clone());
                }
                None => {
                    self.failed.insert(name.to_string());
                }
            }
            return ty;
        }

        if let Some(ty) = self.fallback.and_then(|registry| registry.types.get(name)) {
            return Some(ty.clone());
        }
        self.errors.push(SchemaError::UnknownType {
            context: context.to_string(),
            type_name: name.to_string(),
        });
        None
    }

    fn expr(&mut self, expr: &str, context: &str, sorted: bool) -> Option<TypeRef> {
        if let Some(inner) = expr.strip_suffix("[]") {
            let element = self.expr(inner, context, false)?;
            return Some(Arc::new(Vector::new(element, sorted)));
        }
        if let Some(inner) = expr.strip_suffix('?') {
            let inner = self.expr(inner, context, false)?;
            return Some(Arc::new(Optional::new(inner)));
        }
        self.named(expr, context)
    }

    fn structure(
        &mut self,
        name: &str,
        base: Option<&str>,
        definitions: &[(String, String)],
    ) -> Option<TypeRef> {
        let mut fields = Vec::new();
        let mut complete = true;

        if let Some(base) = base {
            match self.named(base, name) {
                Some(ty) => match ty.as_struct() {
                    Some(parent) => fields.extend(parent.fields().iter().cloned()),
                    None => {
                        self.errors.push(SchemaError::InvalidBase {
                            structure: name.to_string(),
                            base: base.to_string(),
                        });
                        complete = false;
                    }
                },
                None => complete = false,
            }
        }

        for (field, expr) in definitions {
            let key = format!("{name}.{field}");
            let Some(ty) = self.expr(expr, &key, self.sort.contains(&key)) else {
                complete = false;
                continue;
            };
            let mut field = Field::new(field, ty);
            if let Some(Override::Field(hook)) = self.overrides.get(&key) {
                field.hook = Some(hook.clone());
            }
            fields.push(field);
        }

        if !complete {
            return None;
        }
        let hook = match self.overrides.get(name) {
            Some(Override::Struct(hook)) => Some(hook.clone()),
            _ => None,
        };
        Some(Arc::new(StructType::new(name, fields, hook)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AbiCache, AbiDef};
    use eosio_macros::test_traced;
    use serde_json::json;

    #[test]
    fn test_system_registry() {
        let registry = Registry::new(Config::default()).unwrap();
        let structs: Vec<_> = registry.structs().collect();
        for name in ["action", "authority", "signed_transaction", "setcode", "transfer"] {
            assert!(structs.contains(&name), "{name}");
        }
        assert_eq!(registry.get("account_name").unwrap().name(), "name");
        assert_eq!(registry.get("permission_level[]").unwrap().name(), "permission_level[]");
        assert!(matches!(registry.get("nope"), Err(Error::UnknownType(_))));
        assert!(matches!(registry.get_struct("asset"), Err(Error::UnknownType(_))));
    }

    #[test]
    fn test_inherited_fields() {
        let registry = Registry::new(Config::default()).unwrap();
        let handle = registry.get_struct("signed_transaction").unwrap();
        let fields: Vec<_> = handle
            .ty()
            .as_struct()
            .unwrap()
            .fields()
            .iter()
            .map(|field| field.name.clone())
            .collect();
        assert_eq!(fields.first().map(String::as_str), Some("expiration"));
        assert_eq!(fields.last().map(String::as_str), Some("context_free_data"));
    }

    #[test]
    fn test_schema_errors_are_aggregated() {
        let extension = Schema::from_json(&json!({
            "broken_a": {"fields": {"x": "no_such_type"}},
            "broken_b": {"base": "uint8", "fields": {}},
            "loop_a": "loop_b",
            "loop_b": "loop_a"
        }))
        .unwrap();
        let err = Registry::with_schema(Config::default(), extension).unwrap_err();
        let Error::SchemaConstruction(errors) = err else {
            panic!("unexpected error: {err}");
        };
        assert!(errors.iter().any(|err| matches!(
            err,
            SchemaError::UnknownType { type_name, .. } if type_name == "no_such_type"
        )));
        assert!(errors.iter().any(|err| matches!(err, SchemaError::InvalidBase { .. })));
        assert!(errors.iter().any(|err| matches!(err, SchemaError::Cycle(_))));
    }

    #[test_traced("DEBUG")]
    fn test_lookup_struct() {
        let abi = AbiDef::from_json(
            r#"{
                "structs": [{"name": "hi", "base": "", "fields": [{"name": "user", "type": "account_name"}]}],
                "actions": [{"name": "greet", "type": "hi"}]
            }"#,
        )
        .unwrap();
        let config = Config {
            abis: Arc::new(AbiCache::new().with("hello", abi)),
            ..Config::default()
        };
        let registry = Registry::new(config).unwrap();

        let by_struct = registry.lookup_struct("hi", "hello").unwrap().unwrap();
        assert_eq!(by_struct.name(), "hi");
        let by_action = registry.lookup_struct("greet", "hello").unwrap().unwrap();
        assert_eq!(by_action.name(), "hi");
        assert!(registry.lookup_struct("other", "hello").unwrap().is_none());
        assert!(registry.lookup_struct("hi", "noabi").unwrap().is_none());
        assert!(registry.lookup_struct("transfer", SYSTEM_ACCOUNT).unwrap().is_some());
        assert!(registry.lookup_struct("hi", "Not A Name").is_err());
    }

    #[test]
    fn test_lookup_struct_reuses_compiled() {
        let abi = AbiDef::from_json(
            r#"{
                "structs": [{"name": "hi", "base": "", "fields": [{"name": "user", "type": "name"}]}],
                "actions": [{"name": "greet", "type": "hi"}]
            }"#,
        )
        .unwrap();
        let config = Config {
            abis: Arc::new(AbiCache::new().with("hello", abi)),
            ..Config::default()
        };
        let registry = Registry::new(config).unwrap();

        let first = registry.lookup_struct("hi", "hello").unwrap().unwrap();
        let second = registry.lookup_struct("hi", "hello").unwrap().unwrap();
        let by_action = registry.lookup_struct("greet", "hello").unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &by_action));
        assert_eq!(registry.compiled.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let registry = Registry::new(Config::default()).unwrap();
        let name = registry.get("name").unwrap();
        assert!(matches!(
            name.decode(vec![0u8; 9]),
            Err(Error::Codec(CodecError::ExtraData(1)))
        ));
    }
}
