//! Ledger request builders, submission and response parsers

use crate::command::{optional, required, Indy};
use crate::error::Result;
use crate::memory::to_cstring;
use crate::native::NativeCall;
use crate::types::{Alias, Pool, Role, Wallet};
use indy_common::logging::Component;

impl Indy {
    /// Build a NYM transaction registering `target_did`.
    ///
    /// An empty `verkey` is omitted from the request. `Role::Reset` is sent
    /// as an explicit empty role, which clears the target's role; `None`
    /// leaves the role unspecified.
    pub fn build_nym_request(
        &self,
        submitter_did: &str,
        target_did: &str,
        verkey: &str,
        alias: Option<&Alias>,
        role: Option<Role>,
    ) -> Result<String> {
        let submitter_c = required("Submitter DID", submitter_did)?;
        let target_c = required("Target DID", target_did)?;
        let verkey_c = optional("verkey", Some(verkey))?;
        let alias_c = alias.map(|a| to_cstring("alias", a.as_str())).transpose()?;
        let role_c = role.map(|r| to_cstring("role", r.as_str())).transpose()?;

        self.logger(Component::Ledger)
            .debug_args(format_args!("building NYM request for {target_did} by {submitter_did}"));
        self.run(&NativeCall::BuildNymRequest {
            submitter_did: &submitter_c,
            target_did: &target_c,
            verkey: verkey_c.as_deref(),
            alias: alias_c.as_deref(),
            role: role_c.as_deref(),
        })
    }

    /// Sign `request_json` with the key of `submitter_did` and send it to the pool
    pub fn sign_and_submit_request(
        &self,
        pool: &Pool,
        wallet: &Wallet,
        submitter_did: &str,
        request_json: &str,
    ) -> Result<String> {
        let submitter_c = required("Submitter DID", submitter_did)?;
        let request_c = required("Request JSON", request_json)?;

        self.logger(Component::Ledger).debug_args(format_args!(
            "signing and submitting request by {submitter_did} to pool {}",
            pool.name()
        ));
        self.run(&NativeCall::SignAndSubmitRequest {
            pool: pool.handle(),
            wallet: wallet.handle(),
            submitter_did: &submitter_c,
            request_json: &request_c,
        })
    }

    /// Send an already prepared request to the pool without signing it
    pub fn submit_request(&self, pool: &Pool, request_json: &str) -> Result<String> {
        let request_c = required("Request JSON", request_json)?;

        self.logger(Component::Ledger)
            .debug_args(format_args!("submitting request to pool {}", pool.name()));
        self.run(&NativeCall::SubmitRequest {
            pool: pool.handle(),
            request_json: &request_c,
        })
    }

    pub fn build_schema_request(&self, submitter_did: &str, data: &str) -> Result<String> {
        let submitter_c = required("submitter DID", submitter_did)?;
        let data_c = required("data", data)?;
        self.run(&NativeCall::BuildSchemaRequest {
            submitter_did: &submitter_c,
            data: &data_c,
        })
    }

    pub fn build_get_schema_request(&self, submitter_did: &str, id: &str) -> Result<String> {
        let submitter_c = required("submitter DID", submitter_did)?;
        let id_c = required("ID", id)?;
        self.run(&NativeCall::BuildGetSchemaRequest {
            submitter_did: &submitter_c,
            id: &id_c,
        })
    }

    /// Extract `(schema_id, schema_json)` from a GET_SCHEMA reply
    pub fn parse_get_schema_response(&self, response: &str) -> Result<(String, String)> {
        let response_c = required("response", response)?;
        self.run(&NativeCall::ParseGetSchemaResponse {
            response: &response_c,
        })
    }

    pub fn build_cred_def_request(&self, submitter_did: &str, data: &str) -> Result<String> {
        let submitter_c = required("submitter DID", submitter_did)?;
        let data_c = required("data", data)?;
        self.run(&NativeCall::BuildCredDefRequest {
            submitter_did: &submitter_c,
            data: &data_c,
        })
    }

    pub fn build_get_cred_def_request(&self, submitter_did: &str, id: &str) -> Result<String> {
        let submitter_c = required("submitter DID", submitter_did)?;
        let id_c = required("ID", id)?;
        self.run(&NativeCall::BuildGetCredDefRequest {
            submitter_did: &submitter_c,
            id: &id_c,
        })
    }

    /// Extract `(cred_def_id, cred_def_json)` from a GET_CRED_DEF reply
    pub fn parse_get_cred_def_response(&self, response: &str) -> Result<(String, String)> {
        let response_c = required("response", response)?;
        self.run(&NativeCall::ParseGetCredDefResponse {
            response: &response_c,
        })
    }
}
