use super::StructHook;
use crate::{Error, Registry, Value};
use eosio_cryptography::PublicKey;
use serde_json::json;

const DEFAULT_PERMISSION: &str = "active";

/// Shapes accepted for an `authority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityInput<'a> {
    /// A single public key with weight 1.
    Key(&'a str),
    /// `actor` or `actor@permission` with weight 1.
    Account { actor: &'a str, permission: &'a str },
    /// Anything else; normalized as a regular struct.
    Full,
}

impl<'a> AuthorityInput<'a> {
    pub fn classify(value: &'a Value) -> Self {
        let Some(text) = value.as_str() else {
            return AuthorityInput::Full;
        };
        if text.parse::<PublicKey>().is_ok() {
            return AuthorityInput::Key(text);
        }
        let (actor, permission) = text.split_once('@').unwrap_or((text, DEFAULT_PERMISSION));
        AuthorityInput::Account { actor, permission }
    }
}

/// Expands `"EOS..."` and `"actor[@permission]"` into a threshold-1 authority.
#[derive(Debug)]
pub struct AuthorityShorthand;

impl StructHook for AuthorityShorthand {
    fn from_shorthand(&self, _: &Registry, value: &Value) -> Result<Option<Value>, Error> {
        let expanded = match AuthorityInput::classify(value) {
            AuthorityInput::Key(key) => json!({
                "threshold": 1,
                "keys": [{"key": key, "weight": 1}],
                "accounts": []
            }),
            AuthorityInput::Account { actor, permission } => json!({
                "threshold": 1,
                "keys": [],
                "accounts": [{
                    "permission": {"actor": actor, "permission": permission},
                    "weight": 1
                }]
            }),
            AuthorityInput::Full => return Ok(None),
        };
        Ok(Some(Value::from(expanded)))
    }
}
