//! Wallet lifecycle

use crate::command::{optional, required, Indy};
use crate::error::Result;
use crate::native::NativeCall;
use crate::types::{ResourceHandle, Wallet, WalletHandle};
use indy_common::logging::Component;

impl Indy {
    /// Create a wallet bound to `pool_name`.
    ///
    /// `wallet_type` selects a registered storage type (None = default
    /// storage). Fails with `WalletAlreadyExistsError` when `name` is taken.
    pub fn create_wallet(
        &self,
        pool_name: &str,
        name: &str,
        wallet_type: Option<&str>,
        config: Option<&str>,
        credentials: Option<&str>,
    ) -> Result<()> {
        let pool_name_c = required("pool name", pool_name)?;
        let name_c = required("wallet name", name)?;
        let wallet_type_c = optional("wallet type", wallet_type)?;
        let config_c = optional("config", config)?;
        let credentials_c = optional("credentials", credentials)?;

        self.logger(Component::Wallet)
            .debug_args(format_args!("creating wallet {name} for pool {pool_name}"));
        self.run(&NativeCall::CreateWallet {
            pool_name: &pool_name_c,
            name: &name_c,
            wallet_type: wallet_type_c.as_deref(),
            config: config_c.as_deref(),
            credentials: credentials_c.as_deref(),
        })
    }

    pub fn delete_wallet(&self, name: &str, credentials: Option<&str>) -> Result<()> {
        let name_c = required("wallet", name)?;
        let credentials_c = optional("credentials", credentials)?;

        self.logger(Component::Wallet)
            .debug_args(format_args!("deleting wallet {name}"));
        self.run(&NativeCall::DeleteWallet {
            name: &name_c,
            credentials: credentials_c.as_deref(),
        })
    }

    /// Open the wallet `name`
    pub fn open_wallet(
        &self,
        name: &str,
        config: Option<&str>,
        credentials: Option<&str>,
    ) -> Result<Wallet> {
        let name_c = required("wallet name", name)?;
        let config_c = optional("config", config)?;
        let credentials_c = optional("credentials", credentials)?;

        let ResourceHandle(handle) = self.run(&NativeCall::OpenWallet {
            name: &name_c,
            config: config_c.as_deref(),
            credentials: credentials_c.as_deref(),
        })?;
        self.logger(Component::Wallet)
            .debug_args(format_args!("opened wallet {name} as handle {handle}"));
        Ok(Wallet::new(name, WalletHandle(handle)))
    }

    pub fn close_wallet(&self, wallet: Wallet) -> Result<()> {
        self.logger(Component::Wallet)
            .debug_args(format_args!("closing wallet {}", wallet.name()));
        self.run(&NativeCall::CloseWallet {
            wallet: wallet.handle(),
        })
    }
}
