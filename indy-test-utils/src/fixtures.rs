//! Sample values shared by the integration tests

use anyhow::{Context, Result};
use serde_json::{json, Value};

pub const POOL_NAME: &str = "sandbox";
pub const WALLET_NAME: &str = "test-wallet";

pub const STEWARD_DID: &str = "Th7MpTaRZVRYnPiabds81Y";
pub const STEWARD_SEED: &str = "000000000000000000000000Steward1";
pub const TRUST_ANCHOR_DID: &str = "VsKV7grR1BUE29mG2Fm2kZ";
pub const TRUST_ANCHOR_VERKEY: &str = "GjZWsBLgZCR18aL468JAT7w9CZRiBnpxUPPgyQxh4voa";

pub const SCHEMA_NAME: &str = "Job-Certificate";
pub const SCHEMA_VERSION: &str = "0.2";

pub fn pool_config() -> String {
    json!({ "genesis_txn": "./testdata/docker_pool_transactions_genesis" }).to_string()
}

pub fn did_json(seed: &str) -> String {
    json!({ "seed": seed }).to_string()
}

pub fn schema_attrs() -> String {
    json!(["first_name", "last_name", "salary", "employee_status", "experience"]).to_string()
}

pub fn schema_id(issuer_did: &str) -> String {
    format!("{issuer_did}:2:{SCHEMA_NAME}:{SCHEMA_VERSION}")
}

pub fn schema_json(issuer_did: &str) -> String {
    json!({
        "ver": "1.0",
        "id": schema_id(issuer_did),
        "name": SCHEMA_NAME,
        "version": SCHEMA_VERSION,
        "attrNames": ["first_name", "last_name", "salary", "employee_status", "experience"],
        "seqNo": null
    })
    .to_string()
}

pub fn cred_def_id(issuer_did: &str) -> String {
    format!("{issuer_did}:3:CL:1:TAG1")
}

pub fn pool_list(names: &[&str]) -> String {
    Value::Array(names.iter().map(|n| json!({ "pool": n })).collect()).to_string()
}

/// Read a top-level string field from JSON text
pub fn json_field(json: &str, field: &str) -> Result<String> {
    let value: Value = serde_json::from_str(json).context("fixture is not valid JSON")?;
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .with_context(|| format!("field {field} missing from {json}"))
}
