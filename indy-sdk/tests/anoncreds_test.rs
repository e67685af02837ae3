//! Issuer, prover and verifier operations against the mock native library

use std::sync::Arc;

use indy_sdk::{BlobStorageReaderHandle, ErrorCode, Indy, IndyError, Payload, Wallet, WalletHandle};
use indy_test_utils::fixtures::{self, SCHEMA_NAME, SCHEMA_VERSION, TRUST_ANCHOR_DID};
use indy_test_utils::{MockLibrary, Reply};

fn setup() -> (Arc<MockLibrary>, Indy) {
    let mock = Arc::new(MockLibrary::new());
    let indy = Indy::with_library(mock.clone());
    (mock, indy)
}

fn wallet() -> Wallet {
    Wallet::new(fixtures::WALLET_NAME, WalletHandle(9))
}

#[test]
fn test_issuer_create_schema_returns_id_and_json() {
    let (mock, indy) = setup();
    mock.on(
        "indy_issuer_create_schema",
        Reply::Complete(Payload::String2(
            fixtures::schema_id(TRUST_ANCHOR_DID),
            fixtures::schema_json(TRUST_ANCHOR_DID),
        )),
    );

    let (schema_id, schema_json) = indy
        .issuer_create_schema(TRUST_ANCHOR_DID, SCHEMA_NAME, SCHEMA_VERSION, &fixtures::schema_attrs())
        .expect("schema creation should succeed");

    assert_eq!(schema_id, fixtures::schema_id(TRUST_ANCHOR_DID));
    assert_eq!(
        fixtures::json_field(&schema_json, "name").unwrap(),
        SCHEMA_NAME,
        "schema JSON should carry the schema name"
    );

    let call = mock.last_call("indy_issuer_create_schema").expect("call recorded");
    assert_eq!(call.text("issuer_did"), Some(TRUST_ANCHOR_DID));
    assert_eq!(call.text("name"), Some(SCHEMA_NAME));
    assert_eq!(call.text("version"), Some(SCHEMA_VERSION));
    assert_eq!(call.text("attrs"), Some(fixtures::schema_attrs().as_str()));
}

#[test]
fn test_empty_issuer_did_is_rejected_before_native_call() {
    let (mock, indy) = setup();

    let err = indy
        .issuer_create_schema("", SCHEMA_NAME, SCHEMA_VERSION, &fixtures::schema_attrs())
        .unwrap_err();

    assert_eq!(err, IndyError::MissingArgument { field: "issuer DID" });
    assert_eq!(err.to_string(), "issuer DID must be specified");
    assert_eq!(mock.call_count(), 0, "no native call may be issued");
}

#[test]
fn test_schema_failure_carries_native_code() {
    let (mock, indy) = setup();
    mock.on(
        "indy_issuer_create_schema",
        Reply::Fail(ErrorCode::CommonInvalidStructure.code()),
    );

    let err = indy
        .issuer_create_schema(TRUST_ANCHOR_DID, SCHEMA_NAME, SCHEMA_VERSION, "not-json")
        .unwrap_err();
    assert!(matches!(err, IndyError::Failed { code: 113, .. }));
    assert!(err.is(ErrorCode::CommonInvalidStructure));
}

#[test]
fn test_credential_def_signature_type_is_optional() {
    let (mock, indy) = setup();
    mock.on(
        "indy_issuer_create_and_store_credential_def",
        Reply::Complete(Payload::String2(
            fixtures::cred_def_id(TRUST_ANCHOR_DID),
            "{}".to_string(),
        )),
    );

    let (cred_def_id, _) = indy
        .issuer_create_and_store_credential_def(
            &wallet(),
            TRUST_ANCHOR_DID,
            &fixtures::schema_json(TRUST_ANCHOR_DID),
            "TAG1",
            None,
            r#"{"support_revocation": false}"#,
        )
        .expect("credential definition should be created");
    assert_eq!(cred_def_id, fixtures::cred_def_id(TRUST_ANCHOR_DID));

    let call = mock
        .last_call("indy_issuer_create_and_store_credential_def")
        .expect("call recorded");
    assert_eq!(call.handle_arg("wallet_handle"), Some(9));
    assert_eq!(call.text("signature_type"), None, "absent signature type is passed as null");
    assert_eq!(call.text("tag"), Some("TAG1"));
}

#[test]
fn test_credential_def_requires_config() {
    let (mock, indy) = setup();
    let err = indy
        .issuer_create_and_store_credential_def(&wallet(), TRUST_ANCHOR_DID, "{}", "TAG1", Some("CL"), "")
        .unwrap_err();
    assert_eq!(err.to_string(), "config must be specified");
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn test_non_revocable_credential_has_no_revocation_fields() {
    let (mock, indy) = setup();
    mock.on(
        "indy_issuer_create_credential",
        Reply::Complete(Payload::String3(
            r#"{"values":{}}"#.to_string(),
            String::new(),
            String::new(),
        )),
    );

    let issued = indy
        .issuer_create_credential(&wallet(), "{}", "{}", "{}", None, BlobStorageReaderHandle(-1))
        .expect("credential should be issued");
    assert_eq!(issued.credential_json, r#"{"values":{}}"#);
    assert_eq!(issued.revocation_id, None);
    assert_eq!(issued.revocation_delta_json, None);

    let call = mock.last_call("indy_issuer_create_credential").expect("call recorded");
    assert_eq!(call.text("rev_reg_id"), None);
    assert_eq!(call.handle_arg("blob_storage_reader_handle"), Some(-1));
}

#[test]
fn test_revocable_credential_keeps_revocation_fields() {
    let (mock, indy) = setup();
    mock.on(
        "indy_issuer_create_credential",
        Reply::Complete(Payload::String3(
            "{}".to_string(),
            "1".to_string(),
            r#"{"ver":"1.0"}"#.to_string(),
        )),
    );

    let issued = indy
        .issuer_create_credential(&wallet(), "{}", "{}", "{}", Some("rev-reg-1"), BlobStorageReaderHandle(4))
        .expect("credential should be issued");
    assert_eq!(issued.revocation_id.as_deref(), Some("1"));
    assert_eq!(issued.revocation_delta_json.as_deref(), Some(r#"{"ver":"1.0"}"#));
}

#[test]
fn test_master_secret_id_is_optional() {
    let (mock, indy) = setup();
    mock.on(
        "indy_prover_create_master_secret",
        Reply::Complete(Payload::String("generated-id".to_string())),
    );

    let id = indy
        .prover_create_master_secret(&wallet(), None)
        .expect("master secret should be created");
    assert_eq!(id, "generated-id");
    let call = mock.last_call("indy_prover_create_master_secret").unwrap();
    assert_eq!(call.text("master_secret_id"), None);
}

#[test]
fn test_duplicate_master_secret() {
    let (mock, indy) = setup();
    mock.on(
        "indy_prover_create_master_secret",
        Reply::Fail(ErrorCode::AnoncredsMasterSecretDuplicateNameError.code()),
    );

    let err = indy.prover_create_master_secret(&wallet(), Some("ms")).unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::AnoncredsMasterSecretDuplicateNameError));
}

#[test]
fn test_credential_request_returns_request_and_metadata() {
    let (mock, indy) = setup();
    mock.on(
        "indy_prover_create_credential_req",
        Reply::Complete(Payload::String2(
            r#"{"prover_did":"x"}"#.to_string(),
            r#"{"master_secret_name":"ms"}"#.to_string(),
        )),
    );

    let (request, metadata) = indy
        .prover_create_credential_req(&wallet(), TRUST_ANCHOR_DID, "{}", "{}", "ms")
        .expect("credential request should be created");
    assert_eq!(request, r#"{"prover_did":"x"}"#);
    assert_eq!(metadata, r#"{"master_secret_name":"ms"}"#);

    let err = indy
        .prover_create_credential_req(&wallet(), TRUST_ANCHOR_DID, "{}", "{}", "")
        .unwrap_err();
    assert_eq!(err.to_string(), "master secret ID must be specified");
}

#[test]
fn test_store_credential_optional_arguments_are_null() {
    let (mock, indy) = setup();
    mock.on(
        "indy_prover_store_credential",
        Reply::Complete(Payload::String("cred-1".to_string())),
    );

    let id = indy
        .prover_store_credential(&wallet(), Some(""), "{}", "{}", "{}", None)
        .expect("credential should be stored");
    assert_eq!(id, "cred-1");

    let call = mock.last_call("indy_prover_store_credential").unwrap();
    assert_eq!(call.text("cred_id"), None, "empty credential id is passed as null");
    assert_eq!(call.text("rev_reg_def_json"), None);
}

#[test]
fn test_create_proof_requires_every_argument() {
    let (mock, indy) = setup();

    let err = indy
        .prover_create_proof(&wallet(), "{}", "{}", "ms", "{}", "{}", "")
        .unwrap_err();
    assert_eq!(err.to_string(), "rev states must be specified");
    assert_eq!(mock.call_count(), 0);

    let proof = indy
        .prover_create_proof(&wallet(), "{}", "{}", "ms", "{}", "{}", "{}")
        .expect("proof should be created");
    assert_eq!(proof, "{}");
}

#[test]
fn test_verify_proof_decodes_boolean() {
    let (mock, indy) = setup();
    mock.on("indy_verifier_verify_proof", Reply::Complete(Payload::Bool(false)));

    let valid = indy
        .verifier_verify_proof("{}", "{}", "{}", "{}", "{}", "{}")
        .expect("verification should complete");
    assert!(!valid, "proof should be reported invalid");

    mock.on("indy_verifier_verify_proof", Reply::Complete(Payload::Bool(true)));
    assert!(indy.verifier_verify_proof("{}", "{}", "{}", "{}", "{}", "{}").unwrap());
}

#[test]
fn test_credential_offer_and_proof_request_lookup() {
    let (mock, indy) = setup();
    mock.on(
        "indy_issuer_create_credential_offer",
        Reply::Complete(Payload::String(r#"{"nonce":"1"}"#.to_string())),
    );

    let offer = indy
        .issuer_create_credential_offer(&wallet(), &fixtures::cred_def_id(TRUST_ANCHOR_DID))
        .expect("offer should be created");
    assert_eq!(fixtures::json_field(&offer, "nonce").unwrap(), "1");

    let err = indy.prover_get_credentials_for_proof_req(&wallet(), "").unwrap_err();
    assert_eq!(err.to_string(), "proof request must be specified");
}
