//! Indy SDK
//!
//! Blocking-style Rust wrapper over the asynchronous libindy C API.
//!
//! This crate provides:
//! - A process-wide registry of pending native commands
//! - The `extern "C"` completion entry points libindy calls back into
//! - The [`Indy`] facade for pool, wallet, DID, crypto, ledger and
//!   anoncreds operations
//!
//! Every operation validates its required arguments, issues one native
//! command and waits for exactly one completion. [`Indy::submit`] exposes the
//! same machinery as a [`Pending`] future for async callers.

pub mod anoncreds;
pub mod callbacks;
pub mod command;
pub mod config;
pub mod crypto;
pub mod did;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod native;
pub mod pool;
pub mod registry;
pub mod types;
pub mod wallet;

pub use callbacks::{
    clear_protocol_fault_handler, set_protocol_fault_handler, Callback, Payload, ProtocolFault, Shape,
};
pub use command::{CallbackResult, Indy, Pending};
pub use config::IndyConfig;
pub use error::{IndyError, Result};
pub use indy_common::{ErrorCategory, ErrorCode};
#[cfg(feature = "libindy")]
pub use native::LibIndy;
pub use native::{Argument, NativeCall, NativeLibrary};
pub use registry::{command_registry, CallbackRegistry};
pub use types::{
    Alias, AuthDecrypted, BlobStorageReaderHandle, CommandHandle, DidInfo, IssuedCredential, Pool,
    PoolHandle, ResourceHandle, Role, Wallet, WalletHandle,
};
