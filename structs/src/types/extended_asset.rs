//! Assets qualified by their issuing contract, such as `1.0000 EOS@eosio.token`.

use super::{expect_str, name::Name, present, Asset, Type};
use crate::{registry::SYSTEM_ACCOUNT, Error, Registry, Value};
use bytes::{Bytes, BytesMut};
use eosio_codec::{ReadExt, Write};
use eosio_utils::decode_name;
use serde_json::{json, Value as JsonValue};

const DEFAULT: &str = "0.0001 SYMBOL@contract";

/// An [Asset] followed by the contract [Name]; the contract defaults to the system account.
#[derive(Debug)]
pub struct ExtendedAsset;

impl ExtendedAsset {
    fn split(value: &Value) -> Result<(&str, &str), Error> {
        let text = expect_str("extended_asset", value).map_err(|_| {
            Error::malformed(
                "extended_asset",
                format!("expected a string like '9.9999 SBL@contract', found {}", value.kind()),
            )
        })?;
        Ok(text.split_once('@').unwrap_or((text, SYSTEM_ACCOUNT)))
    }

    fn canonical(value: &Value) -> Result<String, Error> {
        let (asset, contract) = Self::split(value)?;
        let asset = Asset::canonical(&Value::from(asset))?;
        Name::pack(&Value::from(contract))?;
        Ok(format!("{asset}@{contract}"))
    }
}

impl Type for ExtendedAsset {
    fn name(&self) -> &str {
        "extended_asset"
    }

    fn decode_from_wire(&self, buf: &mut Bytes, _: &Registry) -> Result<Value, Error> {
        let asset = Asset::read(buf)?;
        let contract = decode_name(u64::read(buf)?);
        Ok(Value::String(format!("{asset}@{contract}")))
    }

    fn encode_to_wire(&self, buf: &mut BytesMut, value: &Value, _: &Registry) -> Result<(), Error> {
        let (asset, contract) = Self::split(value)?;
        Asset::write(buf, asset)?;
        Name::pack(&Value::from(contract))?.write(buf);
        Ok(())
    }

    fn from_shorthand(&self, value: &Value, _: &Registry) -> Result<Value, Error> {
        Self::canonical(value).map(Value::String)
    }

    fn to_display(
        &self,
        value: Option<&Value>,
        defaults: bool,
        _: &Registry,
    ) -> Result<JsonValue, Error> {
        match present(value) {
            Some(value) => Ok(json!(Self::canonical(value)?)),
            None if defaults => Ok(json!(DEFAULT)),
            None => Ok(JsonValue::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn test_default_contract() {
        let registry = Registry::new(Config::default()).unwrap();
        let value = ExtendedAsset
            .from_shorthand(&Value::from("1 EOS"), &registry)
            .unwrap();
        assert_eq!(value, Value::from("1.0000 EOS@eosio"));

        let encoded = registry.encode(&ExtendedAsset, &Value::from("1 EOS")).unwrap();
        assert_eq!(
            registry.decode(&ExtendedAsset, encoded).unwrap(),
            Value::from("1.0000 EOS@eosio")
        );
    }

    #[test]
    fn test_invalid_contract() {
        let registry = Registry::new(Config::default()).unwrap();
        for input in ["1 EOS@a@b", "1 EOS@UPPER", "1 EOS@waytoolongaccount"] {
            assert!(matches!(
                ExtendedAsset.from_shorthand(&Value::from(input), &registry),
                Err(Error::MalformedScalar { kind: "name", .. })
            ));
        }
        assert_eq!(
            ExtendedAsset
                .from_shorthand(&Value::from("1 EOS@eosio.token"), &registry)
                .unwrap(),
            Value::from("1.0000 EOS@eosio.token")
        );
    }

    #[test]
    fn test_not_a_string() {
        let registry = Registry::new(Config::default()).unwrap();
        assert!(matches!(
            ExtendedAsset.from_shorthand(&Value::from(1u64), &registry),
            Err(Error::MalformedScalar { kind: "extended_asset", .. })
        ));
    }
}
