//! The libindy call surface.
//!
//! Every asynchronous entry point the wrapper drives is one [`NativeCall`]
//! variant holding already-marshaled, borrowed arguments. A [`NativeLibrary`]
//! issues the call; [`LibIndy`] forwards to the linked shared library while
//! tests substitute a scripted implementation.

use crate::callbacks::{Callback, Shape};
use crate::types::{BlobStorageReaderHandle, CommandHandle, PoolHandle, WalletHandle};
use std::ffi::CStr;

/// One libindy command with its marshaled arguments
#[derive(Debug, Clone, Copy)]
pub enum NativeCall<'a> {
    CreatePoolLedgerConfig {
        name: &'a CStr,
        config: &'a CStr,
    },
    DeletePoolLedgerConfig {
        name: &'a CStr,
    },
    OpenPoolLedger {
        name: &'a CStr,
        config: Option<&'a CStr>,
    },
    ListPools,
    RefreshPoolLedger {
        pool: PoolHandle,
    },
    ClosePoolLedger {
        pool: PoolHandle,
    },

    CreateWallet {
        pool_name: &'a CStr,
        name: &'a CStr,
        wallet_type: Option<&'a CStr>,
        config: Option<&'a CStr>,
        credentials: Option<&'a CStr>,
    },
    DeleteWallet {
        name: &'a CStr,
        credentials: Option<&'a CStr>,
    },
    OpenWallet {
        name: &'a CStr,
        config: Option<&'a CStr>,
        credentials: Option<&'a CStr>,
    },
    CloseWallet {
        wallet: WalletHandle,
    },

    CreateAndStoreMyDid {
        wallet: WalletHandle,
        did_json: &'a CStr,
    },
    KeyForDid {
        pool: PoolHandle,
        wallet: WalletHandle,
        did: &'a CStr,
    },

    AnonCrypt {
        recipient_vk: &'a CStr,
        message: &'a [u8],
    },
    AnonDecrypt {
        wallet: WalletHandle,
        recipient_vk: &'a CStr,
        encrypted: &'a [u8],
    },
    AuthCrypt {
        wallet: WalletHandle,
        sender_vk: &'a CStr,
        recipient_vk: &'a CStr,
        message: &'a [u8],
    },
    AuthDecrypt {
        wallet: WalletHandle,
        recipient_vk: &'a CStr,
        encrypted: &'a [u8],
    },

    BuildNymRequest {
        submitter_did: &'a CStr,
        target_did: &'a CStr,
        verkey: Option<&'a CStr>,
        alias: Option<&'a CStr>,
        role: Option<&'a CStr>,
    },
    SignAndSubmitRequest {
        pool: PoolHandle,
        wallet: WalletHandle,
        submitter_did: &'a CStr,
        request_json: &'a CStr,
    },
    SubmitRequest {
        pool: PoolHandle,
        request_json: &'a CStr,
    },
    BuildSchemaRequest {
        submitter_did: &'a CStr,
        data: &'a CStr,
    },
    BuildGetSchemaRequest {
        submitter_did: &'a CStr,
        id: &'a CStr,
    },
    ParseGetSchemaResponse {
        response: &'a CStr,
    },
    BuildCredDefRequest {
        submitter_did: &'a CStr,
        data: &'a CStr,
    },
    BuildGetCredDefRequest {
        submitter_did: &'a CStr,
        id: &'a CStr,
    },
    ParseGetCredDefResponse {
        response: &'a CStr,
    },

    IssuerCreateSchema {
        issuer_did: &'a CStr,
        name: &'a CStr,
        version: &'a CStr,
        attrs: &'a CStr,
    },
    IssuerCreateAndStoreCredentialDef {
        wallet: WalletHandle,
        issuer_did: &'a CStr,
        schema_json: &'a CStr,
        tag: &'a CStr,
        signature_type: Option<&'a CStr>,
        config_json: &'a CStr,
    },
    IssuerCreateCredentialOffer {
        wallet: WalletHandle,
        cred_def_id: &'a CStr,
    },
    IssuerCreateCredential {
        wallet: WalletHandle,
        cred_offer_json: &'a CStr,
        cred_req_json: &'a CStr,
        cred_values_json: &'a CStr,
        rev_reg_id: Option<&'a CStr>,
        blob_storage_reader: BlobStorageReaderHandle,
    },
    ProverCreateMasterSecret {
        wallet: WalletHandle,
        master_secret_id: Option<&'a CStr>,
    },
    ProverCreateCredentialReq {
        wallet: WalletHandle,
        prover_did: &'a CStr,
        cred_offer_json: &'a CStr,
        cred_def_json: &'a CStr,
        master_secret_id: &'a CStr,
    },
    ProverStoreCredential {
        wallet: WalletHandle,
        cred_id: Option<&'a CStr>,
        cred_req_metadata_json: &'a CStr,
        cred_json: &'a CStr,
        cred_def_json: &'a CStr,
        rev_reg_def_json: Option<&'a CStr>,
    },
    ProverGetCredentialsForProofReq {
        wallet: WalletHandle,
        proof_request_json: &'a CStr,
    },
    ProverCreateProof {
        wallet: WalletHandle,
        proof_request_json: &'a CStr,
        requested_credentials_json: &'a CStr,
        master_secret_id: &'a CStr,
        schemas_json: &'a CStr,
        credential_defs_json: &'a CStr,
        rev_states_json: &'a CStr,
    },
    VerifierVerifyProof {
        proof_request_json: &'a CStr,
        proof_json: &'a CStr,
        schemas_json: &'a CStr,
        credential_defs_json: &'a CStr,
        rev_reg_defs_json: &'a CStr,
        rev_regs_json: &'a CStr,
    },
}

/// A single marshaled argument, as seen by recording implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument<'a> {
    Text(&'static str, Option<&'a CStr>),
    Bytes(&'static str, &'a [u8]),
    Handle(&'static str, i32),
}

impl<'a> NativeCall<'a> {
    /// The libindy symbol this call is forwarded to
    pub fn name(&self) -> &'static str {
        match self {
            NativeCall::CreatePoolLedgerConfig { .. } => "indy_create_pool_ledger_config",
            NativeCall::DeletePoolLedgerConfig { .. } => "indy_delete_pool_ledger_config",
            NativeCall::OpenPoolLedger { .. } => "indy_open_pool_ledger",
            NativeCall::ListPools => "indy_list_pools",
            NativeCall::RefreshPoolLedger { .. } => "indy_refresh_pool_ledger",
            NativeCall::ClosePoolLedger { .. } => "indy_close_pool_ledger",
            NativeCall::CreateWallet { .. } => "indy_create_wallet",
            NativeCall::DeleteWallet { .. } => "indy_delete_wallet",
            NativeCall::OpenWallet { .. } => "indy_open_wallet",
            NativeCall::CloseWallet { .. } => "indy_close_wallet",
            NativeCall::CreateAndStoreMyDid { .. } => "indy_create_and_store_my_did",
            NativeCall::KeyForDid { .. } => "indy_key_for_did",
            NativeCall::AnonCrypt { .. } => "indy_crypto_anon_crypt",
            NativeCall::AnonDecrypt { .. } => "indy_crypto_anon_decrypt",
            NativeCall::AuthCrypt { .. } => "indy_crypto_auth_crypt",
            NativeCall::AuthDecrypt { .. } => "indy_crypto_auth_decrypt",
            NativeCall::BuildNymRequest { .. } => "indy_build_nym_request",
            NativeCall::SignAndSubmitRequest { .. } => "indy_sign_and_submit_request",
            NativeCall::SubmitRequest { .. } => "indy_submit_request",
            NativeCall::BuildSchemaRequest { .. } => "indy_build_schema_request",
            NativeCall::BuildGetSchemaRequest { .. } => "indy_build_get_schema_request",
            NativeCall::ParseGetSchemaResponse { .. } => "indy_parse_get_schema_response",
            NativeCall::BuildCredDefRequest { .. } => "indy_build_cred_def_request",
            NativeCall::BuildGetCredDefRequest { .. } => "indy_build_get_cred_def_request",
            NativeCall::ParseGetCredDefResponse { .. } => "indy_parse_get_cred_def_response",
            NativeCall::IssuerCreateSchema { .. } => "indy_issuer_create_schema",
            NativeCall::IssuerCreateAndStoreCredentialDef { .. } => {
                "indy_issuer_create_and_store_credential_def"
            }
            NativeCall::IssuerCreateCredentialOffer { .. } => "indy_issuer_create_credential_offer",
            NativeCall::IssuerCreateCredential { .. } => "indy_issuer_create_credential",
            NativeCall::ProverCreateMasterSecret { .. } => "indy_prover_create_master_secret",
            NativeCall::ProverCreateCredentialReq { .. } => "indy_prover_create_credential_req",
            NativeCall::ProverStoreCredential { .. } => "indy_prover_store_credential",
            NativeCall::ProverGetCredentialsForProofReq { .. } => {
                "indy_prover_get_credentials_for_proof_req"
            }
            NativeCall::ProverCreateProof { .. } => "indy_prover_create_proof",
            NativeCall::VerifierVerifyProof { .. } => "indy_verifier_verify_proof",
        }
    }

    /// Result signature libindy completes this call with
    pub fn shape(&self) -> Shape {
        match self {
            NativeCall::CreatePoolLedgerConfig { .. }
            | NativeCall::DeletePoolLedgerConfig { .. }
            | NativeCall::RefreshPoolLedger { .. }
            | NativeCall::ClosePoolLedger { .. }
            | NativeCall::CreateWallet { .. }
            | NativeCall::DeleteWallet { .. }
            | NativeCall::CloseWallet { .. } => Shape::Empty,

            NativeCall::OpenPoolLedger { .. } | NativeCall::OpenWallet { .. } => Shape::Handle,

            NativeCall::ListPools
            | NativeCall::KeyForDid { .. }
            | NativeCall::BuildNymRequest { .. }
            | NativeCall::SignAndSubmitRequest { .. }
            | NativeCall::SubmitRequest { .. }
            | NativeCall::BuildSchemaRequest { .. }
            | NativeCall::BuildGetSchemaRequest { .. }
            | NativeCall::BuildCredDefRequest { .. }
            | NativeCall::BuildGetCredDefRequest { .. }
            | NativeCall::IssuerCreateCredentialOffer { .. }
            | NativeCall::ProverCreateMasterSecret { .. }
            | NativeCall::ProverStoreCredential { .. }
            | NativeCall::ProverGetCredentialsForProofReq { .. }
            | NativeCall::ProverCreateProof { .. } => Shape::String,

            NativeCall::CreateAndStoreMyDid { .. }
            | NativeCall::ParseGetSchemaResponse { .. }
            | NativeCall::ParseGetCredDefResponse { .. }
            | NativeCall::IssuerCreateSchema { .. }
            | NativeCall::IssuerCreateAndStoreCredentialDef { .. }
            | NativeCall::ProverCreateCredentialReq { .. } => Shape::String2,

            NativeCall::IssuerCreateCredential { .. } => Shape::String3,

            NativeCall::AnonCrypt { .. }
            | NativeCall::AnonDecrypt { .. }
            | NativeCall::AuthCrypt { .. } => Shape::Bytes,

            NativeCall::AuthDecrypt { .. } => Shape::StringBytes,

            NativeCall::VerifierVerifyProof { .. } => Shape::Bool,
        }
    }

    /// Arguments in native parameter order, without the command handle
    pub fn arguments(&self) -> Vec<Argument<'a>> {
        use Argument::{Bytes, Handle, Text};

        match *self {
            NativeCall::CreatePoolLedgerConfig { name, config } => {
                vec![Text("name", Some(name)), Text("config", Some(config))]
            }
            NativeCall::DeletePoolLedgerConfig { name } => vec![Text("name", Some(name))],
            NativeCall::OpenPoolLedger { name, config } => {
                vec![Text("name", Some(name)), Text("config", config)]
            }
            NativeCall::ListPools => Vec::new(),
            NativeCall::RefreshPoolLedger { pool } | NativeCall::ClosePoolLedger { pool } => {
                vec![Handle("pool_handle", pool.0)]
            }
            NativeCall::CreateWallet {
                pool_name,
                name,
                wallet_type,
                config,
                credentials,
            } => vec![
                Text("pool_name", Some(pool_name)),
                Text("name", Some(name)),
                Text("xtype", wallet_type),
                Text("config", config),
                Text("credentials", credentials),
            ],
            NativeCall::DeleteWallet { name, credentials } => {
                vec![Text("name", Some(name)), Text("credentials", credentials)]
            }
            NativeCall::OpenWallet {
                name,
                config,
                credentials,
            } => vec![
                Text("name", Some(name)),
                Text("runtime_config", config),
                Text("credentials", credentials),
            ],
            NativeCall::CloseWallet { wallet } => vec![Handle("wallet_handle", wallet.0)],
            NativeCall::CreateAndStoreMyDid { wallet, did_json } => vec![
                Handle("wallet_handle", wallet.0),
                Text("did_json", Some(did_json)),
            ],
            NativeCall::KeyForDid { pool, wallet, did } => vec![
                Handle("pool_handle", pool.0),
                Handle("wallet_handle", wallet.0),
                Text("did", Some(did)),
            ],
            NativeCall::AnonCrypt {
                recipient_vk,
                message,
            } => vec![
                Text("recipient_vk", Some(recipient_vk)),
                Bytes("message", message),
            ],
            NativeCall::AnonDecrypt {
                wallet,
                recipient_vk,
                encrypted,
            }
            | NativeCall::AuthDecrypt {
                wallet,
                recipient_vk,
                encrypted,
            } => vec![
                Handle("wallet_handle", wallet.0),
                Text("recipient_vk", Some(recipient_vk)),
                Bytes("encrypted_msg", encrypted),
            ],
            NativeCall::AuthCrypt {
                wallet,
                sender_vk,
                recipient_vk,
                message,
            } => vec![
                Handle("wallet_handle", wallet.0),
                Text("sender_vk", Some(sender_vk)),
                Text("recipient_vk", Some(recipient_vk)),
                Bytes("message", message),
            ],
            NativeCall::BuildNymRequest {
                submitter_did,
                target_did,
                verkey,
                alias,
                role,
            } => vec![
                Text("submitter_did", Some(submitter_did)),
                Text("target_did", Some(target_did)),
                Text("verkey", verkey),
                Text("alias", alias),
                Text("role", role),
            ],
            NativeCall::SignAndSubmitRequest {
                pool,
                wallet,
                submitter_did,
                request_json,
            } => vec![
                Handle("pool_handle", pool.0),
                Handle("wallet_handle", wallet.0),
                Text("submitter_did", Some(submitter_did)),
                Text("request_json", Some(request_json)),
            ],
            NativeCall::SubmitRequest { pool, request_json } => vec![
                Handle("pool_handle", pool.0),
                Text("request_json", Some(request_json)),
            ],
            NativeCall::BuildSchemaRequest {
                submitter_did,
                data,
            }
            | NativeCall::BuildCredDefRequest {
                submitter_did,
                data,
            } => vec![
                Text("submitter_did", Some(submitter_did)),
                Text("data", Some(data)),
            ],
            NativeCall::BuildGetSchemaRequest { submitter_did, id }
            | NativeCall::BuildGetCredDefRequest { submitter_did, id } => vec![
                Text("submitter_did", Some(submitter_did)),
                Text("id", Some(id)),
            ],
            NativeCall::ParseGetSchemaResponse { response }
            | NativeCall::ParseGetCredDefResponse { response } => {
                vec![Text("response", Some(response))]
            }
            NativeCall::IssuerCreateSchema {
                issuer_did,
                name,
                version,
                attrs,
            } => vec![
                Text("issuer_did", Some(issuer_did)),
                Text("name", Some(name)),
                Text("version", Some(version)),
                Text("attrs", Some(attrs)),
            ],
            NativeCall::IssuerCreateAndStoreCredentialDef {
                wallet,
                issuer_did,
                schema_json,
                tag,
                signature_type,
                config_json,
            } => vec![
                Handle("wallet_handle", wallet.0),
                Text("issuer_did", Some(issuer_did)),
                Text("schema_json", Some(schema_json)),
                Text("tag", Some(tag)),
                Text("signature_type", signature_type),
                Text("config_json", Some(config_json)),
            ],
            NativeCall::IssuerCreateCredentialOffer {
                wallet,
                cred_def_id,
            } => vec![
                Handle("wallet_handle", wallet.0),
                Text("cred_def_id", Some(cred_def_id)),
            ],
            NativeCall::IssuerCreateCredential {
                wallet,
                cred_offer_json,
                cred_req_json,
                cred_values_json,
                rev_reg_id,
                blob_storage_reader,
            } => vec![
                Handle("wallet_handle", wallet.0),
                Text("cred_offer_json", Some(cred_offer_json)),
                Text("cred_req_json", Some(cred_req_json)),
                Text("cred_values_json", Some(cred_values_json)),
                Text("rev_reg_id", rev_reg_id),
                Handle("blob_storage_reader_handle", blob_storage_reader.0),
            ],
            NativeCall::ProverCreateMasterSecret {
                wallet,
                master_secret_id,
            } => vec![
                Handle("wallet_handle", wallet.0),
                Text("master_secret_id", master_secret_id),
            ],
            NativeCall::ProverCreateCredentialReq {
                wallet,
                prover_did,
                cred_offer_json,
                cred_def_json,
                master_secret_id,
            } => vec![
                Handle("wallet_handle", wallet.0),
                Text("prover_did", Some(prover_did)),
                Text("cred_offer_json", Some(cred_offer_json)),
                Text("cred_def_json", Some(cred_def_json)),
                Text("master_secret_id", Some(master_secret_id)),
            ],
            NativeCall::ProverStoreCredential {
                wallet,
                cred_id,
                cred_req_metadata_json,
                cred_json,
                cred_def_json,
                rev_reg_def_json,
            } => vec![
                Handle("wallet_handle", wallet.0),
                Text("cred_id", cred_id),
                Text("cred_req_metadata_json", Some(cred_req_metadata_json)),
                Text("cred_json", Some(cred_json)),
                Text("cred_def_json", Some(cred_def_json)),
                Text("rev_reg_def_json", rev_reg_def_json),
            ],
            NativeCall::ProverGetCredentialsForProofReq {
                wallet,
                proof_request_json,
            } => vec![
                Handle("wallet_handle", wallet.0),
                Text("proof_request_json", Some(proof_request_json)),
            ],
            NativeCall::ProverCreateProof {
                wallet,
                proof_request_json,
                requested_credentials_json,
                master_secret_id,
                schemas_json,
                credential_defs_json,
                rev_states_json,
            } => vec![
                Handle("wallet_handle", wallet.0),
                Text("proof_req_json", Some(proof_request_json)),
                Text("requested_credentials_json", Some(requested_credentials_json)),
                Text("master_secret_name", Some(master_secret_id)),
                Text("schemas_json", Some(schemas_json)),
                Text("credential_defs_json", Some(credential_defs_json)),
                Text("rev_states_json", Some(rev_states_json)),
            ],
            NativeCall::VerifierVerifyProof {
                proof_request_json,
                proof_json,
                schemas_json,
                credential_defs_json,
                rev_reg_defs_json,
                rev_regs_json,
            } => vec![
                Text("proof_request_json", Some(proof_request_json)),
                Text("proof_json", Some(proof_json)),
                Text("schemas_json", Some(schemas_json)),
                Text("credential_defs_json", Some(credential_defs_json)),
                Text("rev_reg_defs_json", Some(rev_reg_defs_json)),
                Text("rev_regs_json", Some(rev_regs_json)),
            ],
        }
    }
}

/// Something that can issue libindy commands.
///
/// `invoke` returns the immediate status of the entry point. Zero means the
/// command was accepted and `callback` will be called exactly once with
/// `handle`; any other value means it was rejected and `callback` will never
/// be called. Argument buffers only need to stay valid until `invoke` returns.
pub trait NativeLibrary: Send + Sync {
    fn invoke(&self, handle: CommandHandle, call: &NativeCall<'_>, callback: Callback) -> i32;
}

#[cfg(feature = "libindy")]
pub use linked::LibIndy;

#[cfg(feature = "libindy")]
mod linked {
    use super::{NativeCall, NativeLibrary};
    use crate::callbacks::{
        BoolCallback, BytesCallback, Callback, EmptyCallback, HandleCallback, String2Callback,
        String3Callback, StringBytesCallback, StringCallback,
    };
    use crate::memory::opt_ptr;
    use crate::types::CommandHandle;
    use indy_common::ErrorCode;
    use std::os::raw::c_char;

    extern "C" {
        fn indy_create_pool_ledger_config(
            command_handle: CommandHandle,
            config_name: *const c_char,
            config: *const c_char,
            cb: Option<EmptyCallback>,
        ) -> i32;
        fn indy_delete_pool_ledger_config(
            command_handle: CommandHandle,
            config_name: *const c_char,
            cb: Option<EmptyCallback>,
        ) -> i32;
        fn indy_open_pool_ledger(
            command_handle: CommandHandle,
            config_name: *const c_char,
            config: *const c_char,
            cb: Option<HandleCallback>,
        ) -> i32;
        fn indy_list_pools(command_handle: CommandHandle, cb: Option<StringCallback>) -> i32;
        fn indy_refresh_pool_ledger(
            command_handle: CommandHandle,
            handle: i32,
            cb: Option<EmptyCallback>,
        ) -> i32;
        fn indy_close_pool_ledger(
            command_handle: CommandHandle,
            handle: i32,
            cb: Option<EmptyCallback>,
        ) -> i32;

        fn indy_create_wallet(
            command_handle: CommandHandle,
            pool_name: *const c_char,
            name: *const c_char,
            xtype: *const c_char,
            config: *const c_char,
            credentials: *const c_char,
            cb: Option<EmptyCallback>,
        ) -> i32;
        fn indy_delete_wallet(
            command_handle: CommandHandle,
            name: *const c_char,
            credentials: *const c_char,
            cb: Option<EmptyCallback>,
        ) -> i32;
        fn indy_open_wallet(
            command_handle: CommandHandle,
            name: *const c_char,
            runtime_config: *const c_char,
            credentials: *const c_char,
            cb: Option<HandleCallback>,
        ) -> i32;
        fn indy_close_wallet(
            command_handle: CommandHandle,
            handle: i32,
            cb: Option<EmptyCallback>,
        ) -> i32;

        fn indy_create_and_store_my_did(
            command_handle: CommandHandle,
            wallet_handle: i32,
            did_json: *const c_char,
            cb: Option<String2Callback>,
        ) -> i32;
        fn indy_key_for_did(
            command_handle: CommandHandle,
            pool_handle: i32,
            wallet_handle: i32,
            did: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;

        fn indy_crypto_anon_crypt(
            command_handle: CommandHandle,
            recipient_vk: *const c_char,
            msg_data: *const u8,
            msg_len: u32,
            cb: Option<BytesCallback>,
        ) -> i32;
        fn indy_crypto_anon_decrypt(
            command_handle: CommandHandle,
            wallet_handle: i32,
            recipient_vk: *const c_char,
            encrypted_msg: *const u8,
            encrypted_len: u32,
            cb: Option<BytesCallback>,
        ) -> i32;
        fn indy_crypto_auth_crypt(
            command_handle: CommandHandle,
            wallet_handle: i32,
            sender_vk: *const c_char,
            recipient_vk: *const c_char,
            msg_data: *const u8,
            msg_len: u32,
            cb: Option<BytesCallback>,
        ) -> i32;
        fn indy_crypto_auth_decrypt(
            command_handle: CommandHandle,
            wallet_handle: i32,
            recipient_vk: *const c_char,
            encrypted_msg: *const u8,
            encrypted_len: u32,
            cb: Option<StringBytesCallback>,
        ) -> i32;

        fn indy_build_nym_request(
            command_handle: CommandHandle,
            submitter_did: *const c_char,
            target_did: *const c_char,
            verkey: *const c_char,
            alias: *const c_char,
            role: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_sign_and_submit_request(
            command_handle: CommandHandle,
            pool_handle: i32,
            wallet_handle: i32,
            submitter_did: *const c_char,
            request_json: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_submit_request(
            command_handle: CommandHandle,
            pool_handle: i32,
            request_json: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_build_schema_request(
            command_handle: CommandHandle,
            submitter_did: *const c_char,
            data: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_build_get_schema_request(
            command_handle: CommandHandle,
            submitter_did: *const c_char,
            id: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_parse_get_schema_response(
            command_handle: CommandHandle,
            get_schema_response: *const c_char,
            cb: Option<String2Callback>,
        ) -> i32;
        fn indy_build_cred_def_request(
            command_handle: CommandHandle,
            submitter_did: *const c_char,
            data: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_build_get_cred_def_request(
            command_handle: CommandHandle,
            submitter_did: *const c_char,
            id: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_parse_get_cred_def_response(
            command_handle: CommandHandle,
            get_cred_def_response: *const c_char,
            cb: Option<String2Callback>,
        ) -> i32;

        fn indy_issuer_create_schema(
            command_handle: CommandHandle,
            issuer_did: *const c_char,
            name: *const c_char,
            version: *const c_char,
            attrs: *const c_char,
            cb: Option<String2Callback>,
        ) -> i32;
        fn indy_issuer_create_and_store_credential_def(
            command_handle: CommandHandle,
            wallet_handle: i32,
            issuer_did: *const c_char,
            schema_json: *const c_char,
            tag: *const c_char,
            signature_type: *const c_char,
            config_json: *const c_char,
            cb: Option<String2Callback>,
        ) -> i32;
        fn indy_issuer_create_credential_offer(
            command_handle: CommandHandle,
            wallet_handle: i32,
            cred_def_id: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_issuer_create_credential(
            command_handle: CommandHandle,
            wallet_handle: i32,
            cred_offer_json: *const c_char,
            cred_req_json: *const c_char,
            cred_values_json: *const c_char,
            rev_reg_id: *const c_char,
            blob_storage_reader_handle: i32,
            cb: Option<String3Callback>,
        ) -> i32;
        fn indy_prover_create_master_secret(
            command_handle: CommandHandle,
            wallet_handle: i32,
            master_secret_id: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_prover_create_credential_req(
            command_handle: CommandHandle,
            wallet_handle: i32,
            prover_did: *const c_char,
            cred_offer_json: *const c_char,
            cred_def_json: *const c_char,
            master_secret_id: *const c_char,
            cb: Option<String2Callback>,
        ) -> i32;
        fn indy_prover_store_credential(
            command_handle: CommandHandle,
            wallet_handle: i32,
            cred_id: *const c_char,
            cred_req_metadata_json: *const c_char,
            cred_json: *const c_char,
            cred_def_json: *const c_char,
            rev_reg_def_json: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_prover_get_credentials_for_proof_req(
            command_handle: CommandHandle,
            wallet_handle: i32,
            proof_request_json: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_prover_create_proof(
            command_handle: CommandHandle,
            wallet_handle: i32,
            proof_req_json: *const c_char,
            requested_credentials_json: *const c_char,
            master_secret_name: *const c_char,
            schemas_json: *const c_char,
            credential_defs_json: *const c_char,
            rev_states_json: *const c_char,
            cb: Option<StringCallback>,
        ) -> i32;
        fn indy_verifier_verify_proof(
            command_handle: CommandHandle,
            proof_request_json: *const c_char,
            proof_json: *const c_char,
            schemas_json: *const c_char,
            credential_defs_json: *const c_char,
            rev_reg_defs_json: *const c_char,
            rev_regs_json: *const c_char,
            cb: Option<BoolCallback>,
        ) -> i32;
    }

    /// Native length of a buffer argument, or refuse the call as an invalid
    /// parameter when it does not fit
    macro_rules! len {
        ($data:expr, $param:ident) => {
            match u32::try_from($data.len()) {
                Ok(len) => len,
                Err(_) => return ErrorCode::$param.code(),
            }
        };
    }

    /// Pick the entry point of the expected shape or refuse the call
    macro_rules! entry {
        ($callback:expr, $shape:ident) => {
            match $callback {
                Callback::$shape(cb) => Some(cb),
                _ => return ErrorCode::CommonInvalidState.code(),
            }
        };
    }

    /// The linked libindy shared library
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LibIndy;

    impl LibIndy {
        pub fn new() -> Self {
            LibIndy
        }
    }

    impl NativeLibrary for LibIndy {
        fn invoke(&self, h: CommandHandle, call: &NativeCall<'_>, callback: Callback) -> i32 {
            // SAFETY: every pointer comes from a borrowed CStr or slice that
            // outlives this call, and every callback has the matching C signature.
            unsafe {
                match *call {
                    NativeCall::CreatePoolLedgerConfig { name, config } => indy_create_pool_ledger_config(
                        h,
                        name.as_ptr(),
                        config.as_ptr(),
                        entry!(callback, Empty),
                    ),
                    NativeCall::DeletePoolLedgerConfig { name } => {
                        indy_delete_pool_ledger_config(h, name.as_ptr(), entry!(callback, Empty))
                    }
                    NativeCall::OpenPoolLedger { name, config } => {
                        indy_open_pool_ledger(h, name.as_ptr(), opt_ptr(config), entry!(callback, Handle))
                    }
                    NativeCall::ListPools => indy_list_pools(h, entry!(callback, String)),
                    NativeCall::RefreshPoolLedger { pool } => {
                        indy_refresh_pool_ledger(h, pool.0, entry!(callback, Empty))
                    }
                    NativeCall::ClosePoolLedger { pool } => {
                        indy_close_pool_ledger(h, pool.0, entry!(callback, Empty))
                    }
                    NativeCall::CreateWallet {
                        pool_name,
                        name,
                        wallet_type,
                        config,
                        credentials,
                    } => indy_create_wallet(
                        h,
                        pool_name.as_ptr(),
                        name.as_ptr(),
                        opt_ptr(wallet_type),
                        opt_ptr(config),
                        opt_ptr(credentials),
                        entry!(callback, Empty),
                    ),
                    NativeCall::DeleteWallet { name, credentials } => indy_delete_wallet(
                        h,
                        name.as_ptr(),
                        opt_ptr(credentials),
                        entry!(callback, Empty),
                    ),
                    NativeCall::OpenWallet {
                        name,
                        config,
                        credentials,
                    } => indy_open_wallet(
                        h,
                        name.as_ptr(),
                        opt_ptr(config),
                        opt_ptr(credentials),
                        entry!(callback, Handle),
                    ),
                    NativeCall::CloseWallet { wallet } => {
                        indy_close_wallet(h, wallet.0, entry!(callback, Empty))
                    }
                    NativeCall::CreateAndStoreMyDid { wallet, did_json } => indy_create_and_store_my_did(
                        h,
                        wallet.0,
                        did_json.as_ptr(),
                        entry!(callback, String2),
                    ),
                    NativeCall::KeyForDid { pool, wallet, did } => {
                        indy_key_for_did(h, pool.0, wallet.0, did.as_ptr(), entry!(callback, String))
                    }
                    NativeCall::AnonCrypt {
                        recipient_vk,
                        message,
                    } => indy_crypto_anon_crypt(
                        h,
                        recipient_vk.as_ptr(),
                        message.as_ptr(),
                        len!(message, CommonInvalidParam3),
                        entry!(callback, Bytes),
                    ),
                    NativeCall::AnonDecrypt {
                        wallet,
                        recipient_vk,
                        encrypted,
                    } => indy_crypto_anon_decrypt(
                        h,
                        wallet.0,
                        recipient_vk.as_ptr(),
                        encrypted.as_ptr(),
                        len!(encrypted, CommonInvalidParam4),
                        entry!(callback, Bytes),
                    ),
                    NativeCall::AuthCrypt {
                        wallet,
                        sender_vk,
                        recipient_vk,
                        message,
                    } => indy_crypto_auth_crypt(
                        h,
                        wallet.0,
                        sender_vk.as_ptr(),
                        recipient_vk.as_ptr(),
                        message.as_ptr(),
                        len!(message, CommonInvalidParam5),
                        entry!(callback, Bytes),
                    ),
                    NativeCall::AuthDecrypt {
                        wallet,
                        recipient_vk,
                        encrypted,
                    } => indy_crypto_auth_decrypt(
                        h,
                        wallet.0,
                        recipient_vk.as_ptr(),
                        encrypted.as_ptr(),
                        len!(encrypted, CommonInvalidParam4),
                        entry!(callback, StringBytes),
                    ),
                    NativeCall::BuildNymRequest {
                        submitter_did,
                        target_did,
                        verkey,
                        alias,
                        role,
                    } => indy_build_nym_request(
                        h,
                        submitter_did.as_ptr(),
                        target_did.as_ptr(),
                        opt_ptr(verkey),
                        opt_ptr(alias),
                        opt_ptr(role),
                        entry!(callback, String),
                    ),
                    NativeCall::SignAndSubmitRequest {
                        pool,
                        wallet,
                        submitter_did,
                        request_json,
                    } => indy_sign_and_submit_request(
                        h,
                        pool.0,
                        wallet.0,
                        submitter_did.as_ptr(),
                        request_json.as_ptr(),
                        entry!(callback, String),
                    ),
                    NativeCall::SubmitRequest { pool, request_json } => {
                        indy_submit_request(h, pool.0, request_json.as_ptr(), entry!(callback, String))
                    }
                    NativeCall::BuildSchemaRequest {
                        submitter_did,
                        data,
                    } => indy_build_schema_request(
                        h,
                        submitter_did.as_ptr(),
                        data.as_ptr(),
                        entry!(callback, String),
                    ),
                    NativeCall::BuildGetSchemaRequest { submitter_did, id } => {
                        indy_build_get_schema_request(
                            h,
                            submitter_did.as_ptr(),
                            id.as_ptr(),
                            entry!(callback, String),
                        )
                    }
                    NativeCall::ParseGetSchemaResponse { response } => {
                        indy_parse_get_schema_response(h, response.as_ptr(), entry!(callback, String2))
                    }
                    NativeCall::BuildCredDefRequest {
                        submitter_did,
                        data,
                    } => indy_build_cred_def_request(
                        h,
                        submitter_did.as_ptr(),
                        data.as_ptr(),
                        entry!(callback, String),
                    ),
                    NativeCall::BuildGetCredDefRequest { submitter_did, id } => {
                        indy_build_get_cred_def_request(
                            h,
                            submitter_did.as_ptr(),
                            id.as_ptr(),
                            entry!(callback, String),
                        )
                    }
                    NativeCall::ParseGetCredDefResponse { response } => {
                        indy_parse_get_cred_def_response(h, response.as_ptr(), entry!(callback, String2))
                    }
                    NativeCall::IssuerCreateSchema {
                        issuer_did,
                        name,
                        version,
                        attrs,
                    } => indy_issuer_create_schema(
                        h,
                        issuer_did.as_ptr(),
                        name.as_ptr(),
                        version.as_ptr(),
                        attrs.as_ptr(),
                        entry!(callback, String2),
                    ),
                    NativeCall::IssuerCreateAndStoreCredentialDef {
                        wallet,
                        issuer_did,
                        schema_json,
                        tag,
                        signature_type,
                        config_json,
                    } => indy_issuer_create_and_store_credential_def(
                        h,
                        wallet.0,
                        issuer_did.as_ptr(),
                        schema_json.as_ptr(),
                        tag.as_ptr(),
                        opt_ptr(signature_type),
                        config_json.as_ptr(),
                        entry!(callback, String2),
                    ),
                    NativeCall::IssuerCreateCredentialOffer {
                        wallet,
                        cred_def_id,
                    } => indy_issuer_create_credential_offer(
                        h,
                        wallet.0,
                        cred_def_id.as_ptr(),
                        entry!(callback, String),
                    ),
                    NativeCall::IssuerCreateCredential {
                        wallet,
                        cred_offer_json,
                        cred_req_json,
                        cred_values_json,
                        rev_reg_id,
                        blob_storage_reader,
                    } => indy_issuer_create_credential(
                        h,
                        wallet.0,
                        cred_offer_json.as_ptr(),
                        cred_req_json.as_ptr(),
                        cred_values_json.as_ptr(),
                        opt_ptr(rev_reg_id),
                        blob_storage_reader.0,
                        entry!(callback, String3),
                    ),
                    NativeCall::ProverCreateMasterSecret {
                        wallet,
                        master_secret_id,
                    } => indy_prover_create_master_secret(
                        h,
                        wallet.0,
                        opt_ptr(master_secret_id),
                        entry!(callback, String),
                    ),
                    NativeCall::ProverCreateCredentialReq {
                        wallet,
                        prover_did,
                        cred_offer_json,
                        cred_def_json,
                        master_secret_id,
                    } => indy_prover_create_credential_req(
                        h,
                        wallet.0,
                        prover_did.as_ptr(),
                        cred_offer_json.as_ptr(),
                        cred_def_json.as_ptr(),
                        master_secret_id.as_ptr(),
                        entry!(callback, String2),
                    ),
                    NativeCall::ProverStoreCredential {
                        wallet,
                        cred_id,
                        cred_req_metadata_json,
                        cred_json,
                        cred_def_json,
                        rev_reg_def_json,
                    } => indy_prover_store_credential(
                        h,
                        wallet.0,
                        opt_ptr(cred_id),
                        cred_req_metadata_json.as_ptr(),
                        cred_json.as_ptr(),
                        cred_def_json.as_ptr(),
                        opt_ptr(rev_reg_def_json),
                        entry!(callback, String),
                    ),
                    NativeCall::ProverGetCredentialsForProofReq {
                        wallet,
                        proof_request_json,
                    } => indy_prover_get_credentials_for_proof_req(
                        h,
                        wallet.0,
                        proof_request_json.as_ptr(),
                        entry!(callback, String),
                    ),
                    NativeCall::ProverCreateProof {
                        wallet,
                        proof_request_json,
                        requested_credentials_json,
                        master_secret_id,
                        schemas_json,
                        credential_defs_json,
                        rev_states_json,
                    } => indy_prover_create_proof(
                        h,
                        wallet.0,
                        proof_request_json.as_ptr(),
                        requested_credentials_json.as_ptr(),
                        master_secret_id.as_ptr(),
                        schemas_json.as_ptr(),
                        credential_defs_json.as_ptr(),
                        rev_states_json.as_ptr(),
                        entry!(callback, String),
                    ),
                    NativeCall::VerifierVerifyProof {
                        proof_request_json,
                        proof_json,
                        schemas_json,
                        credential_defs_json,
                        rev_reg_defs_json,
                        rev_regs_json,
                    } => indy_verifier_verify_proof(
                        h,
                        proof_request_json.as_ptr(),
                        proof_json.as_ptr(),
                        schemas_json.as_ptr(),
                        credential_defs_json.as_ptr(),
                        rev_reg_defs_json.as_ptr(),
                        rev_regs_json.as_ptr(),
                        entry!(callback, Bool),
                    ),
                }
            }
        }
    }
}
