//! DID creation and key lookup

use crate::command::{required, Indy};
use crate::error::Result;
use crate::native::NativeCall;
use crate::types::{DidInfo, Pool, Wallet};
use indy_common::logging::Component;

impl Indy {
    /// Create a DID and its keys in `wallet`.
    ///
    /// `did_json` follows the libindy format, e.g. `{"seed": "..."}`; a DID
    /// not given explicitly is derived from the first 16 bytes of the verkey.
    pub fn create_and_store_my_did(&self, wallet: &Wallet, did_json: &str) -> Result<DidInfo> {
        let did_json_c = required("JSON for DID", did_json)?;

        let (did, verkey) = self.run(&NativeCall::CreateAndStoreMyDid {
            wallet: wallet.handle(),
            did_json: &did_json_c,
        })?;
        self.logger(Component::Did)
            .debug_args(format_args!("stored DID {did} in wallet {}", wallet.name()));
        Ok(DidInfo { did, verkey })
    }

    /// Resolve the verkey of `did`, consulting the ledger when the wallet
    /// does not know it
    pub fn key_for_did(&self, pool: &Pool, wallet: &Wallet, did: &str) -> Result<String> {
        let did_c = required("DID", did)?;

        self.logger(Component::Did).debug_args(format_args!(
            "resolving key for {did} via pool {} and wallet {}",
            pool.name(),
            wallet.name()
        ));
        self.run(&NativeCall::KeyForDid {
            pool: pool.handle(),
            wallet: wallet.handle(),
            did: &did_c,
        })
    }
}
