//! Contract ABI definitions and the providers that supply them.

use crate::{
    schema::{Definition, Schema},
    Error,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};

/// A contract's ABI as published on chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiDef {
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub structs: Vec<StructDef>,
    #[serde(default)]
    pub actions: Vec<ActionDef>,
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub new_type_name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub ricardian_contract: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    #[serde(default)]
    pub index_type: String,
    #[serde(default)]
    pub key_names: Vec<String>,
    #[serde(default)]
    pub key_types: Vec<String>,
    #[serde(rename = "type")]
    pub ty: String,
}

impl AbiDef {
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn find_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|def| def.name == name)
    }

    /// Type of the payload of action `name`.
    pub fn action_type(&self, name: &str) -> Option<&str> {
        self.actions
            .iter()
            .find(|def| def.name == name)
            .map(|def| def.ty.as_str())
    }

    /// Converts the type aliases and structs into a schema.
    pub fn schema(&self) -> Schema {
        let mut schema = Schema::new();
        for def in &self.types {
            schema.insert(&def.new_type_name, Definition::Alias(def.ty.clone()));
        }
        for def in &self.structs {
            schema.insert(
                &def.name,
                Definition::Struct {
                    base: Some(def.base.clone()).filter(|base| !base.is_empty()),
                    fields: def
                        .fields
                        .iter()
                        .map(|field| (field.name.clone(), field.ty.clone()))
                        .collect(),
                },
            );
        }
        schema
    }
}

/// Supplies the ABI of a contract account.
pub trait AbiProvider: Send + Sync {
    fn abi(&self, account: &str) -> Option<Arc<AbiDef>>;
}

/// In-memory [AbiProvider].
#[derive(Clone, Debug, Default)]
pub struct AbiCache {
    abis: BTreeMap<String, Arc<AbiDef>>,
}

impl AbiCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, account: impl Into<String>, abi: AbiDef) -> Option<Arc<AbiDef>> {
        self.abis.insert(account.into(), Arc::new(abi))
    }

    pub fn with(mut self, account: impl Into<String>, abi: AbiDef) -> Self {
        self.insert(account, abi);
        self
    }
}

impl AbiProvider for AbiCache {
    fn abi(&self, account: &str) -> Option<Arc<AbiDef>> {
        self.abis.get(account).cloned()
    }
}
