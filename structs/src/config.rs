use crate::{
    overrides::{Assembler, Override},
    AbiCache, AbiProvider, TypeRef,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::Arc,
};

/// Vectors kept in canonical order, as `struct.field`.
pub const DEFAULT_SORT: &[&str] = &[
    "action.authorization",
    "authority.accounts",
    "authority.keys",
];

/// Configuration for a [crate::Registry].
#[derive(Clone)]
pub struct Config {
    /// Display resolved action payloads as hex rather than as structured fields.
    pub force_action_data_hex: bool,
    /// Compiles WebAssembly text supplied to `setcode.code`.
    pub assembler: Option<Arc<dyn Assembler>>,
    /// Source of contract ABIs used to resolve action payloads.
    pub abis: Arc<dyn AbiProvider>,
    /// Extra codecs, replacing built-in ones of the same name.
    pub custom_types: BTreeMap<String, TypeRef>,
    /// Extra hooks keyed by `struct` or `struct.field`, replacing built-in ones.
    pub overrides: BTreeMap<String, Override>,
    /// Extra vectors to keep sorted, as `struct.field`; added to [DEFAULT_SORT].
    pub sort: BTreeSet<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            force_action_data_hex: true,
            assembler: None,
            abis: Arc::new(AbiCache::default()),
            custom_types: BTreeMap::new(),
            overrides: BTreeMap::new(),
            sort: BTreeSet::new(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("force_action_data_hex", &self.force_action_data_hex)
            .field("assembler", &self.assembler.is_some())
            .field("custom_types", &self.custom_types.keys().collect::<Vec<_>>())
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}
