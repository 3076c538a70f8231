//! Schema-driven conversion of EOSIO structures between their wire, in-memory and display forms.
//!
//! # Overview
//!
//! A [Registry] compiles a schema (the built-in system schema, optionally extended) into codecs.
//! Every codec implements [Type]:
//!
//! - `decode_from_wire` / `encode_to_wire`: the little-endian binary form.
//! - `from_shorthand`: normalizes loose input (`"1 EOS"`, `"inita@owner"`, hex payloads) into
//!   the canonical in-memory [Value].
//! - `to_display`: renders a [Value] as JSON, optionally filling placeholders for absent values.
//!
//! Names, symbols, assets, keys and signatures have dedicated codecs ([types]). Selected structs
//! and fields are handled by [overrides], most notably `action.data`, whose type is resolved at
//! runtime from the action's contract ABI.
//!
//! # Example
//!
//! ```
//! use eosio_structs::{Config, Registry, Value};
//! use serde_json::json;
//!
//! let registry = Registry::new(Config::default()).unwrap();
//! let transfer = registry.get_struct("transfer").unwrap();
//!
//! let value = transfer
//!     .from_shorthand(&Value::from(json!({
//!         "from": "inita",
//!         "to": "initb",
//!         "quantity": "1 EOS",
//!         "memo": ""
//!     })))
//!     .unwrap();
//! let encoded = transfer.encode(&value).unwrap();
//! assert_eq!(encoded.len(), 33);
//!
//! let decoded = transfer.decode(encoded).unwrap();
//! let display = transfer.to_display(Some(&decoded), false).unwrap();
//! assert_eq!(display["quantity"], "1.0000 EOS");
//! ```

pub mod abi;
pub use abi::{AbiCache, AbiDef, AbiProvider};
mod config;
pub use config::{Config, DEFAULT_SORT};
mod error;
pub use error::{Error, SchemaError, SchemaErrors};
pub mod overrides;
pub mod registry;
pub use registry::{Handle, Registry, SYSTEM_ACCOUNT};
pub mod schema;
pub use schema::{Definition, Schema};
pub mod types;
pub use types::{Type, TypeRef};
mod value;
pub use value::{Map, Value};
