//! Ledger request builders and submission against the mock native library

use std::sync::Arc;

use indy_sdk::{Alias, ErrorCode, Indy, Payload, Pool, PoolHandle, Role, Wallet, WalletHandle};
use indy_test_utils::fixtures::{self, STEWARD_DID, TRUST_ANCHOR_DID, TRUST_ANCHOR_VERKEY};
use indy_test_utils::{MockLibrary, Reply};

fn setup() -> (Arc<MockLibrary>, Indy) {
    let mock = Arc::new(MockLibrary::new());
    let indy = Indy::with_library(mock.clone());
    (mock, indy)
}

#[test]
fn test_nym_request_arguments() {
    let (mock, indy) = setup();
    mock.on(
        "indy_build_nym_request",
        Reply::Complete(Payload::String(r#"{"operation":{"type":"1"}}"#.to_string())),
    );

    let request = indy
        .build_nym_request(
            STEWARD_DID,
            TRUST_ANCHOR_DID,
            TRUST_ANCHOR_VERKEY,
            Some(&Alias::new("alice")),
            Some(Role::TrustAnchor),
        )
        .expect("NYM request should build");
    assert_eq!(request, r#"{"operation":{"type":"1"}}"#);

    let call = mock.last_call("indy_build_nym_request").unwrap();
    assert_eq!(call.text("submitter_did"), Some(STEWARD_DID));
    assert_eq!(call.text("target_did"), Some(TRUST_ANCHOR_DID));
    assert_eq!(call.text("verkey"), Some(TRUST_ANCHOR_VERKEY));
    assert_eq!(call.text("alias"), Some("alice"));
    assert_eq!(call.text("role"), Some("TRUST_ANCHOR"));
}

#[test]
fn test_nym_role_reset_differs_from_no_role() {
    let (mock, indy) = setup();

    indy.build_nym_request(STEWARD_DID, TRUST_ANCHOR_DID, "", None, Some(Role::Reset))
        .expect("NYM request should build");
    let reset = mock.last_call("indy_build_nym_request").unwrap();
    assert_eq!(reset.text("role"), Some(""), "reset is an explicit empty role");
    assert_eq!(reset.text("verkey"), None, "empty verkey is omitted");
    assert_eq!(reset.text("alias"), None);

    indy.build_nym_request(STEWARD_DID, TRUST_ANCHOR_DID, "", None, None)
        .expect("NYM request should build");
    let unset = mock.last_call("indy_build_nym_request").unwrap();
    assert_eq!(unset.text("role"), None);
}

#[test]
fn test_nym_request_validation() {
    let (mock, indy) = setup();
    assert_eq!(
        indy.build_nym_request("", TRUST_ANCHOR_DID, "", None, None)
            .unwrap_err()
            .to_string(),
        "Submitter DID must be specified"
    );
    assert_eq!(
        indy.build_nym_request(STEWARD_DID, "", "", None, None)
            .unwrap_err()
            .to_string(),
        "Target DID must be specified"
    );
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn test_sign_and_submit_request() {
    let (mock, indy) = setup();
    mock.on(
        "indy_sign_and_submit_request",
        Reply::Complete(Payload::String(r#"{"op":"REPLY"}"#.to_string())),
    );
    let pool = Pool::new(fixtures::POOL_NAME, PoolHandle(2));
    let wallet = Wallet::new(fixtures::WALLET_NAME, WalletHandle(5));

    let response = indy
        .sign_and_submit_request(&pool, &wallet, STEWARD_DID, r#"{"operation":{}}"#)
        .expect("request should be submitted");
    assert_eq!(fixtures::json_field(&response, "op").unwrap(), "REPLY");

    let call = mock.last_call("indy_sign_and_submit_request").unwrap();
    assert_eq!(call.handle_arg("pool_handle"), Some(2));
    assert_eq!(call.handle_arg("wallet_handle"), Some(5));
}

#[test]
fn test_submit_request_without_consensus() {
    let (mock, indy) = setup();
    mock.on("indy_submit_request", Reply::Fail(ErrorCode::LedgerNoConsensusError.code()));
    let pool = Pool::new(fixtures::POOL_NAME, PoolHandle(2));

    let err = indy.submit_request(&pool, r#"{"operation":{}}"#).unwrap_err();
    assert!(err.is(ErrorCode::LedgerNoConsensusError));
    assert_eq!(
        indy.submit_request(&pool, "").unwrap_err().to_string(),
        "Request JSON must be specified"
    );
}

#[test]
fn test_schema_request_round() {
    let (mock, indy) = setup();
    let schema_id = fixtures::schema_id(TRUST_ANCHOR_DID);
    mock.on(
        "indy_parse_get_schema_response",
        Reply::Complete(Payload::String2(
            schema_id.clone(),
            fixtures::schema_json(TRUST_ANCHOR_DID),
        )),
    );

    indy.build_schema_request(TRUST_ANCHOR_DID, &fixtures::schema_json(TRUST_ANCHOR_DID))
        .expect("schema request should build");
    indy.build_get_schema_request(TRUST_ANCHOR_DID, &schema_id)
        .expect("get schema request should build");
    let (id, json) = indy
        .parse_get_schema_response(r#"{"result":{}}"#)
        .expect("response should parse");
    assert_eq!(id, schema_id);
    assert_eq!(fixtures::json_field(&json, "version").unwrap(), fixtures::SCHEMA_VERSION);

    assert_eq!(
        indy.build_get_schema_request(TRUST_ANCHOR_DID, "")
            .unwrap_err()
            .to_string(),
        "ID must be specified"
    );
}

#[test]
fn test_cred_def_request_round() {
    let (mock, indy) = setup();
    let cred_def_id = fixtures::cred_def_id(TRUST_ANCHOR_DID);
    mock.on(
        "indy_parse_get_cred_def_response",
        Reply::Complete(Payload::String2(cred_def_id.clone(), "{}".to_string())),
    );

    indy.build_cred_def_request(TRUST_ANCHOR_DID, "{}")
        .expect("cred def request should build");
    indy.build_get_cred_def_request(TRUST_ANCHOR_DID, &cred_def_id)
        .expect("get cred def request should build");
    let (id, _) = indy
        .parse_get_cred_def_response(r#"{"result":{}}"#)
        .expect("response should parse");
    assert_eq!(id, cred_def_id);

    assert_eq!(
        indy.build_cred_def_request(TRUST_ANCHOR_DID, "").unwrap_err().to_string(),
        "data must be specified"
    );
    assert_eq!(
        indy.parse_get_cred_def_response("").unwrap_err().to_string(),
        "response must be specified"
    );
    let names: Vec<_> = mock.calls().iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        vec![
            "indy_build_cred_def_request",
            "indy_build_get_cred_def_request",
            "indy_parse_get_cred_def_response",
        ]
    );
}
