use eosio_codec::Error as CodecError;
use eosio_macros::test_traced;
use eosio_structs::{AbiCache, AbiDef, Config, Error, Registry, Value};
use eosio_utils::{from_hex, hex};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

const TRANSFER_HEX: &str =
    "000000000093dd74000000008093dd74102700000000000004454f530000000000";

/// account=eosio, name=transfer, no authorization, 33 bytes of data.
const ACTION_PREFIX: &str = "0000000000ea3055000000572d3ccdcd0021";

fn transfer() -> JsonValue {
    json!({"from": "inita", "to": "initb", "quantity": "1.0000 EOS", "memo": ""})
}

fn action(account: &str, name: &str, data: JsonValue) -> JsonValue {
    json!({"account": account, "name": name, "authorization": [], "data": data})
}

fn registry(force_hex: bool) -> Registry {
    Registry::new(Config {
        force_action_data_hex: force_hex,
        ..Config::default()
    })
    .unwrap()
}

#[test]
fn test_action_data_json() {
    let registry = registry(false);
    let action_type = registry.get_struct("action").unwrap();
    let value = action("eosio", "transfer", transfer());

    let normalized = action_type.from_shorthand(&Value::from(value.clone())).unwrap();
    let encoded = action_type.encode(&normalized).unwrap();
    assert_eq!(hex(&encoded), format!("{ACTION_PREFIX}{TRANSFER_HEX}"));

    let decoded = action_type.decode(encoded).unwrap();
    assert_eq!(action_type.to_display(Some(&decoded), false).unwrap(), value);
}

#[test]
fn test_action_data_hex() {
    let registry = registry(false);
    let action_type = registry.get_struct("action").unwrap();
    let value = action("eosio", "transfer", json!(TRANSFER_HEX));

    let normalized = action_type.from_shorthand(&Value::from(value)).unwrap();
    assert_eq!(normalized.get("data"), Some(&Value::from(transfer())));

    let decoded = action_type
        .decode(action_type.encode(&normalized).unwrap())
        .unwrap();
    assert_eq!(
        action_type.to_display(Some(&decoded), false).unwrap(),
        action("eosio", "transfer", transfer())
    );
}

#[test]
fn test_action_data_force_hex() {
    let registry = registry(true);
    let action_type = registry.get_struct("action").unwrap();
    let value = Value::from(action("eosio", "transfer", transfer()));

    let normalized = action_type.from_shorthand(&value).unwrap();
    let decoded = action_type
        .decode(action_type.encode(&normalized).unwrap())
        .unwrap();
    let expected = action("eosio", "transfer", json!(TRANSFER_HEX));
    assert_eq!(action_type.to_display(Some(&decoded), false).unwrap(), expected);
    assert_eq!(action_type.to_display(Some(&normalized), false).unwrap(), expected);
}

#[test]
fn test_force_hex_is_default() {
    assert!(Config::default().force_action_data_hex);
}

#[test_traced]
fn test_unknown_type_keeps_hex() {
    for force_hex in [true, false] {
        let registry = registry(force_hex);
        let action_type = registry.get_struct("action").unwrap();
        let value = action("eosio", "mytype", json!("030a0b0c"));

        let normalized = action_type.from_shorthand(&Value::from(value.clone())).unwrap();
        assert_eq!(normalized.get("data"), Some(&Value::from("030a0b0c")));

        let decoded = action_type
            .decode(action_type.encode(&normalized).unwrap())
            .unwrap();
        assert_eq!(
            decoded.get("data"),
            Some(&Value::Bytes(from_hex("030a0b0c").unwrap().into()))
        );
        assert_eq!(action_type.to_display(Some(&decoded), false).unwrap(), value);
    }
}

#[test]
fn test_unresolved_without_fallback() {
    let registry = registry(true);
    let action_type = registry.get_struct("action").unwrap();
    let value = Value::from(action("eosio", "mytype", json!({"x": 1})));

    let normalized = action_type.from_shorthand(&value).unwrap();
    let err = action_type.encode(&normalized).unwrap_err();
    match &err {
        Error::UnresolvedStructWithoutFallback { name, account } => {
            assert_eq!(name, "mytype");
            assert_eq!(account, "eosio");
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("mytype") && message.contains("eosio"));
}

#[test]
fn test_trailing_bytes_in_payload() {
    let registry = registry(false);
    let action_type = registry.get_struct("action").unwrap();
    let wire = from_hex(&format!(
        "0000000000ea3055000000572d3ccdcd0022{TRANSFER_HEX}00"
    ))
    .unwrap();
    assert!(matches!(
        action_type.decode(wire),
        Err(Error::Codec(CodecError::ExtraData(1)))
    ));
}

#[test]
fn test_truncated_payload() {
    let registry = registry(false);
    let action_type = registry.get_struct("action").unwrap();
    let wire = from_hex(&format!("{ACTION_PREFIX}0000")).unwrap();
    assert!(matches!(
        action_type.decode(wire),
        Err(Error::Codec(CodecError::EndOfBuffer))
    ));
}

#[test_traced]
fn test_abi_resolved_payload() {
    let abi = AbiDef::from_json(
        r#"{
            "types": [{"new_type_name": "account_name", "type": "name"}],
            "structs": [{
                "name": "transfer_args",
                "base": "",
                "fields": [
                    {"name": "from", "type": "account_name"},
                    {"name": "to", "type": "account_name"},
                    {"name": "quantity", "type": "asset"},
                    {"name": "memo", "type": "string"}
                ]
            }],
            "actions": [{"name": "transfer", "type": "transfer_args"}]
        }"#,
    )
    .unwrap();
    let registry = Registry::new(Config {
        force_action_data_hex: false,
        abis: Arc::new(AbiCache::new().with("eosio.token", abi)),
        ..Config::default()
    })
    .unwrap();
    let action_type = registry.get_struct("action").unwrap();
    let value = action(
        "eosio.token",
        "transfer",
        json!({"from": "inita", "to": "initb", "quantity": "1 EOS", "memo": ""}),
    );

    let normalized = action_type.from_shorthand(&Value::from(value)).unwrap();
    let encoded = action_type.encode(&normalized).unwrap();
    assert!(hex(&encoded).ends_with(TRANSFER_HEX));

    let decoded = action_type.decode(encoded).unwrap();
    assert_eq!(
        action_type.to_display(Some(&decoded), false).unwrap(),
        action("eosio.token", "transfer", transfer())
    );
}

#[test_traced("INFO")]
fn test_missing_abi_falls_back_to_hex() {
    let registry = registry(true);
    let action_type = registry.get_struct("action").unwrap();
    let value = action("nobody", "transfer", json!(TRANSFER_HEX));

    let normalized = action_type.from_shorthand(&Value::from(value.clone())).unwrap();
    let decoded = action_type
        .decode(action_type.encode(&normalized).unwrap())
        .unwrap();
    assert_eq!(action_type.to_display(Some(&decoded), false).unwrap(), value);
}

#[test]
fn test_transaction_roundtrip() {
    let registry = registry(false);
    let transaction = registry.get_struct("signed_transaction").unwrap();
    let value = json!({
        "expiration": "2018-01-01T00:00:00",
        "ref_block_num": 1,
        "ref_block_prefix": 2,
        "max_net_usage_words": 0,
        "max_kcpu_usage": 0,
        "delay_sec": 0,
        "context_free_actions": [],
        "actions": [{
            "account": "eosio",
            "name": "transfer",
            "authorization": [{"actor": "inita", "permission": "active"}],
            "data": transfer()
        }],
        "signatures": [],
        "context_free_data": []
    });

    let normalized = transaction.from_shorthand(&Value::from(value.clone())).unwrap();
    let decoded = transaction
        .decode(transaction.encode(&normalized).unwrap())
        .unwrap();
    assert_eq!(transaction.to_display(Some(&decoded), false).unwrap(), value);
}

#[test]
fn test_transaction_defaults() {
    let registry = registry(true);
    let transaction = registry.get_struct("signed_transaction").unwrap();
    let defaults = transaction.to_display(None, true).unwrap();
    assert_eq!(defaults["expiration"], "1970-01-01T00:00:00");
    assert_eq!(defaults["actions"], json!([]));

    let normalized = transaction.from_shorthand(&Value::from(defaults.clone())).unwrap();
    let decoded = transaction
        .decode(transaction.encode(&normalized).unwrap())
        .unwrap();
    assert_eq!(transaction.to_display(Some(&decoded), false).unwrap(), defaults);
}
