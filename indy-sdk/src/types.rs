use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a pending native command.
///
/// Keys the process-wide callback registry from the moment a command is
/// issued until its completion callback fires.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandHandle(pub i32);

/// Handle of an opened wallet
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletHandle(pub i32);

/// Handle of an opened pool ledger
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolHandle(pub i32);

/// Handle of a configured blob storage reader (revocation tails)
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobStorageReaderHandle(pub i32);

impl fmt::Display for CommandHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Untyped resource handle returned by the single-handle callback.
///
/// Facades wrap it into [`WalletHandle`] or [`PoolHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceHandle(pub i32);

/// An opened pool ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    name: String,
    handle: PoolHandle,
}

impl Pool {
    pub fn new(name: impl Into<String>, handle: PoolHandle) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> PoolHandle {
        self.handle
    }
}

/// An opened wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    name: String,
    handle: WalletHandle,
}

impl Wallet {
    pub fn new(name: impl Into<String>, handle: WalletHandle) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> WalletHandle {
        self.handle
    }
}

/// Ledger role assigned by a NYM transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Trustee,
    Steward,
    TrustAnchor,
    /// Clears the role of the target DID
    Reset,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Trustee => "TRUSTEE",
            Role::Steward => "STEWARD",
            Role::TrustAnchor => "TRUST_ANCHOR",
            Role::Reset => "",
        }
    }
}

/// Alias recorded for the target DID of a NYM transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias(String);

impl Alias {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// DID and verification key created in a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidInfo {
    pub did: String,
    pub verkey: String,
}

/// Result of an authenticated decryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthDecrypted {
    pub sender_verkey: String,
    pub message: Vec<u8>,
}

/// Credential issued by `issuer_create_credential`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    pub credential_json: String,
    /// Local revocation id, absent for non-revocable credential definitions
    pub revocation_id: Option<String>,
    /// Revocation registry delta, absent for non-revocable credential definitions
    pub revocation_delta_json: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_values() {
        assert_eq!(Role::Trustee.as_str(), "TRUSTEE");
        assert_eq!(Role::Steward.as_str(), "STEWARD");
        assert_eq!(Role::TrustAnchor.as_str(), "TRUST_ANCHOR");
        assert_eq!(Role::Reset.as_str(), "");
    }

    #[test]
    fn test_did_info_json_shape() {
        let info: DidInfo =
            serde_json::from_str(r#"{"did":"VsKV7grR1BUE29mG2Fm2kZ","verkey":"GjZWsBLgZCR18aL468JAT7w9CZRiBnpxUPPgyQxh4voa"}"#)
                .expect("did info should parse");
        assert_eq!(info.did, "VsKV7grR1BUE29mG2Fm2kZ");
    }
}
