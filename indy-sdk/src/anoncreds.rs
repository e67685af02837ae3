//! Issuer, prover and verifier credential operations.
//!
//! All schema, credential and proof values are opaque JSON text passed
//! through to libindy unchanged.

use crate::command::{optional, required, Indy};
use crate::error::Result;
use crate::native::NativeCall;
use crate::types::{BlobStorageReaderHandle, IssuedCredential, Wallet};
use indy_common::logging::Component;

impl Indy {
    /// Create a schema, returning `(schema_id, schema_json)`.
    ///
    /// `attrs` is a JSON array of attribute names.
    pub fn issuer_create_schema(
        &self,
        issuer_did: &str,
        name: &str,
        version: &str,
        attrs: &str,
    ) -> Result<(String, String)> {
        let issuer_did_c = required("issuer DID", issuer_did)?;
        let name_c = required("name", name)?;
        let version_c = required("version", version)?;
        let attrs_c = required("attrs", attrs)?;

        self.logger(Component::Anoncreds)
            .debug_args(format_args!("creating schema {name} {version} for {issuer_did}"));
        self.run(&NativeCall::IssuerCreateSchema {
            issuer_did: &issuer_did_c,
            name: &name_c,
            version: &version_c,
            attrs: &attrs_c,
        })
    }

    /// Create a credential definition for `schema_json` and store its private
    /// part in `wallet`, returning `(cred_def_id, cred_def_json)`.
    ///
    /// `signature_type` defaults to `CL` when not given.
    pub fn issuer_create_and_store_credential_def(
        &self,
        wallet: &Wallet,
        issuer_did: &str,
        schema_json: &str,
        tag: &str,
        signature_type: Option<&str>,
        config_json: &str,
    ) -> Result<(String, String)> {
        let issuer_did_c = required("issuer DID", issuer_did)?;
        let schema_c = required("schema", schema_json)?;
        let tag_c = required("tag", tag)?;
        let config_c = required("config", config_json)?;
        let signature_type_c = optional("signature type", signature_type)?;

        self.logger(Component::Anoncreds).debug_args(format_args!(
            "creating credential definition {tag} for {issuer_did} in wallet {}",
            wallet.name()
        ));
        self.run(&NativeCall::IssuerCreateAndStoreCredentialDef {
            wallet: wallet.handle(),
            issuer_did: &issuer_did_c,
            schema_json: &schema_c,
            tag: &tag_c,
            signature_type: signature_type_c.as_deref(),
            config_json: &config_c,
        })
    }

    pub fn issuer_create_credential_offer(&self, wallet: &Wallet, cred_def_id: &str) -> Result<String> {
        let cred_def_id_c = required("credential def ID", cred_def_id)?;

        self.logger(Component::Anoncreds)
            .debug_args(format_args!("creating credential offer for {cred_def_id}"));
        self.run(&NativeCall::IssuerCreateCredentialOffer {
            wallet: wallet.handle(),
            cred_def_id: &cred_def_id_c,
        })
    }

    /// Issue a credential for a prover's request.
    ///
    /// `rev_reg_id` and `blob_storage_reader` only matter for revocable
    /// credential definitions; the revocation fields of the result are `None`
    /// otherwise.
    pub fn issuer_create_credential(
        &self,
        wallet: &Wallet,
        cred_offer_json: &str,
        cred_req_json: &str,
        cred_values_json: &str,
        rev_reg_id: Option<&str>,
        blob_storage_reader: BlobStorageReaderHandle,
    ) -> Result<IssuedCredential> {
        let offer_c = required("cred offer JSON", cred_offer_json)?;
        let request_c = required("cred request JSON", cred_req_json)?;
        let values_c = required("cred values JSON", cred_values_json)?;
        let rev_reg_id_c = optional("revocation registry ID", rev_reg_id)?;

        self.logger(Component::Anoncreds)
            .debug_args(format_args!("issuing credential from wallet {}", wallet.name()));
        let (credential_json, revocation_id, revocation_delta_json): (String, String, String) =
            self.run(&NativeCall::IssuerCreateCredential {
                wallet: wallet.handle(),
                cred_offer_json: &offer_c,
                cred_req_json: &request_c,
                cred_values_json: &values_c,
                rev_reg_id: rev_reg_id_c.as_deref(),
                blob_storage_reader,
            })?;

        Ok(IssuedCredential {
            credential_json,
            revocation_id: non_empty(revocation_id),
            revocation_delta_json: non_empty(revocation_delta_json),
        })
    }

    /// Create a master secret, returning its id.
    ///
    /// libindy generates an id when `master_secret_id` is not given.
    pub fn prover_create_master_secret(&self, wallet: &Wallet, master_secret_id: Option<&str>) -> Result<String> {
        let id_c = optional("master secret ID", master_secret_id)?;

        self.logger(Component::Anoncreds)
            .debug_args(format_args!("creating master secret in wallet {}", wallet.name()));
        self.run(&NativeCall::ProverCreateMasterSecret {
            wallet: wallet.handle(),
            master_secret_id: id_c.as_deref(),
        })
    }

    /// Create a credential request for an offer, returning
    /// `(cred_req_json, cred_req_metadata_json)`
    pub fn prover_create_credential_req(
        &self,
        wallet: &Wallet,
        prover_did: &str,
        cred_offer_json: &str,
        cred_def_json: &str,
        master_secret_id: &str,
    ) -> Result<(String, String)> {
        let prover_did_c = required("prover DID", prover_did)?;
        let offer_c = required("credential offer JSON", cred_offer_json)?;
        let cred_def_c = required("credential def JSON", cred_def_json)?;
        let master_secret_c = required("master secret ID", master_secret_id)?;

        self.logger(Component::Anoncreds)
            .debug_args(format_args!("creating credential request for {prover_did}"));
        self.run(&NativeCall::ProverCreateCredentialReq {
            wallet: wallet.handle(),
            prover_did: &prover_did_c,
            cred_offer_json: &offer_c,
            cred_def_json: &cred_def_c,
            master_secret_id: &master_secret_c,
        })
    }

    /// Store an issued credential, returning the id it was stored under
    pub fn prover_store_credential(
        &self,
        wallet: &Wallet,
        cred_id: Option<&str>,
        cred_req_metadata_json: &str,
        cred_json: &str,
        cred_def_json: &str,
        rev_reg_def_json: Option<&str>,
    ) -> Result<String> {
        let metadata_c = required("cred request metadata JSON", cred_req_metadata_json)?;
        let cred_c = required("cred JSON", cred_json)?;
        let cred_def_c = required("cred def JSON", cred_def_json)?;
        let cred_id_c = optional("credential ID", cred_id)?;
        let rev_reg_def_c = optional("revocation registry definition", rev_reg_def_json)?;

        self.logger(Component::Anoncreds)
            .debug_args(format_args!("storing credential in wallet {}", wallet.name()));
        self.run(&NativeCall::ProverStoreCredential {
            wallet: wallet.handle(),
            cred_id: cred_id_c.as_deref(),
            cred_req_metadata_json: &metadata_c,
            cred_json: &cred_c,
            cred_def_json: &cred_def_c,
            rev_reg_def_json: rev_reg_def_c.as_deref(),
        })
    }

    pub fn prover_get_credentials_for_proof_req(&self, wallet: &Wallet, proof_request_json: &str) -> Result<String> {
        let proof_request_c = required("proof request", proof_request_json)?;

        self.run(&NativeCall::ProverGetCredentialsForProofReq {
            wallet: wallet.handle(),
            proof_request_json: &proof_request_c,
        })
    }

    /// Create a proof for `proof_request_json` from stored credentials
    #[allow(clippy::too_many_arguments)]
    pub fn prover_create_proof(
        &self,
        wallet: &Wallet,
        proof_request_json: &str,
        requested_credentials_json: &str,
        master_secret_id: &str,
        schemas_json: &str,
        credential_defs_json: &str,
        rev_states_json: &str,
    ) -> Result<String> {
        let proof_request_c = required("proof request", proof_request_json)?;
        let requested_c = required("requested credentials", requested_credentials_json)?;
        let master_secret_c = required("master secret", master_secret_id)?;
        let schemas_c = required("schemas", schemas_json)?;
        let cred_defs_c = required("credential defs", credential_defs_json)?;
        let rev_states_c = required("rev states", rev_states_json)?;

        self.logger(Component::Anoncreds)
            .debug_args(format_args!("creating proof from wallet {}", wallet.name()));
        self.run(&NativeCall::ProverCreateProof {
            wallet: wallet.handle(),
            proof_request_json: &proof_request_c,
            requested_credentials_json: &requested_c,
            master_secret_id: &master_secret_c,
            schemas_json: &schemas_c,
            credential_defs_json: &cred_defs_c,
            rev_states_json: &rev_states_c,
        })
    }

    /// Verify `proof_json` against `proof_request_json`.
    ///
    /// `Ok(false)` means the proof was checked and is invalid.
    pub fn verifier_verify_proof(
        &self,
        proof_request_json: &str,
        proof_json: &str,
        schemas_json: &str,
        credential_defs_json: &str,
        rev_reg_defs_json: &str,
        rev_regs_json: &str,
    ) -> Result<bool> {
        let proof_request_c = required("proof request", proof_request_json)?;
        let proof_c = required("proof", proof_json)?;
        let schemas_c = required("schemas", schemas_json)?;
        let cred_defs_c = required("credential defs", credential_defs_json)?;
        let rev_reg_defs_c = required("revoc reg defs", rev_reg_defs_json)?;
        let rev_regs_c = required("revoc regs", rev_regs_json)?;

        let valid = self.run(&NativeCall::VerifierVerifyProof {
            proof_request_json: &proof_request_c,
            proof_json: &proof_c,
            schemas_json: &schemas_c,
            credential_defs_json: &cred_defs_c,
            rev_reg_defs_json: &rev_reg_defs_c,
            rev_regs_json: &rev_regs_c,
        })?;
        self.logger(Component::Anoncreds)
            .debug_args(format_args!("proof verified: {valid}"));
        Ok(valid)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
