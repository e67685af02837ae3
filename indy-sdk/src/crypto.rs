//! Anonymous and authenticated message encryption.
//!
//! Messages are passed to libindy as length-delimited buffers and may
//! contain NUL bytes. Message contents are never logged.

use crate::command::{required, Indy};
use crate::error::{IndyError, Result};
use crate::memory::buffer_len;
use crate::native::NativeCall;
use crate::types::{AuthDecrypted, Wallet};
use indy_common::logging::Component;

impl Indy {
    /// Encrypt `message` for `recipient_vk` without revealing the sender
    pub fn anon_crypt(&self, recipient_vk: &str, message: &[u8]) -> Result<Vec<u8>> {
        let recipient_vk_c = required("recipient verification key", recipient_vk)?;
        let len = buffer_len("message", message)?;

        self.logger(Component::Crypto)
            .debug_args(format_args!("anon encrypting {len} bytes"));
        self.run(&NativeCall::AnonCrypt {
            recipient_vk: &recipient_vk_c,
            message,
        })
    }

    /// Decrypt a message produced by [`anon_crypt`](Indy::anon_crypt) with
    /// the private key of `recipient_vk` held in `wallet`
    pub fn anon_decrypt(&self, wallet: &Wallet, recipient_vk: &str, encrypted: &[u8]) -> Result<Vec<u8>> {
        let recipient_vk_c = required("recipient verification key", recipient_vk)?;
        if encrypted.is_empty() {
            return Err(IndyError::missing("encrypted message"));
        }
        let len = buffer_len("encrypted message", encrypted)?;

        self.logger(Component::Crypto).debug_args(format_args!(
            "anon decrypting {len} bytes with wallet {}",
            wallet.name()
        ));
        self.run(&NativeCall::AnonDecrypt {
            wallet: wallet.handle(),
            recipient_vk: &recipient_vk_c,
            encrypted,
        })
    }

    /// Encrypt `message` so that `recipient_vk` can verify it came from
    /// `sender_vk`, whose key must be in `wallet`
    pub fn auth_crypt(
        &self,
        wallet: &Wallet,
        sender_vk: &str,
        recipient_vk: &str,
        message: &[u8],
    ) -> Result<Vec<u8>> {
        let sender_vk_c = required("sender verification key", sender_vk)?;
        let recipient_vk_c = required("recipient verification key", recipient_vk)?;
        let len = buffer_len("message", message)?;

        self.logger(Component::Crypto).debug_args(format_args!(
            "auth encrypting {len} bytes with wallet {}",
            wallet.name()
        ));
        self.run(&NativeCall::AuthCrypt {
            wallet: wallet.handle(),
            sender_vk: &sender_vk_c,
            recipient_vk: &recipient_vk_c,
            message,
        })
    }

    /// Decrypt a message produced by [`auth_crypt`](Indy::auth_crypt),
    /// returning the sender's verkey alongside the plaintext
    pub fn auth_decrypt(&self, wallet: &Wallet, recipient_vk: &str, encrypted: &[u8]) -> Result<AuthDecrypted> {
        let recipient_vk_c = required("recipient verification key", recipient_vk)?;
        let len = buffer_len("encrypted message", encrypted)?;

        self.logger(Component::Crypto).debug_args(format_args!(
            "auth decrypting {len} bytes with wallet {}",
            wallet.name()
        ));
        let (sender_verkey, message) = self.run(&NativeCall::AuthDecrypt {
            wallet: wallet.handle(),
            recipient_vk: &recipient_vk_c,
            encrypted,
        })?;
        Ok(AuthDecrypted { sender_verkey, message })
    }
}
