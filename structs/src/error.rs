use crate::Value;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when building a registry or converting values.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed {kind}: {reason}")]
    MalformedScalar { kind: &'static str, reason: String },
    #[error("precision mismatch in '{value}': {reason}")]
    PrecisionMismatch { value: String, reason: String },
    #[error("invalid public key: {0}")]
    KeyFormat(#[source] eosio_cryptography::Error),
    #[error("invalid signature: {0}")]
    SignatureFormat(#[source] eosio_cryptography::Error),
    #[error("missing abi definition for '{name}' on '{account}', provide serialized (hex) action data instead")]
    UnresolvedStructWithoutFallback { name: String, account: String },
    #[error("schema construction failed: {0}")]
    SchemaConstruction(SchemaErrors),
    #[error("codec: {0}")]
    Codec(#[from] eosio_codec::Error),
    #[error("{context}: expected {expected}, found {found}")]
    UnexpectedValue {
        context: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{structure}: missing field '{field}'")]
    MissingField { structure: String, field: String },
    #[error("unknown type '{0}'")]
    UnknownType(String),
    #[error("wasm text supplied but no assembler is configured")]
    MissingAssembler,
    #[error("wasm assembly failed: {reason}\n{source_text}")]
    Assembly { reason: String, source_text: String },
    #[error("invalid abi json: {0}")]
    AbiJson(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedScalar {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn unexpected(context: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        Error::UnexpectedValue {
            context: context.into(),
            expected,
            found: found.kind(),
        }
    }
}

/// A single failure found while compiling a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{context}: unknown type '{type_name}'")]
    UnknownType { context: String, type_name: String },
    #[error("{structure}: base '{base}' is not a struct")]
    InvalidBase { structure: String, base: String },
    #[error("{0}: circular definition")]
    Cycle(String),
    #[error("{name}: {reason}")]
    Malformed { name: String, reason: String },
}

/// Every failure found while compiling a schema, reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaErrors(pub Vec<SchemaError>);

impl SchemaErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s)", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaErrors> for Error {
    fn from(errors: SchemaErrors) -> Self {
        Error::SchemaConstruction(errors)
    }
}
