//! Pool ledger lifecycle

use crate::command::{optional, required, Indy};
use crate::error::{IndyError, Result};
use crate::native::NativeCall;
use crate::types::{Pool, PoolHandle, ResourceHandle};
use indy_common::logging::Component;
use serde::Deserialize;

#[derive(Deserialize)]
struct PoolEntry {
    pool: String,
}

impl Indy {
    /// Create a named pool ledger configuration.
    ///
    /// `config` is the JSON configuration, e.g. `{"genesis_txn": "<path>"}`.
    pub fn create_pool_ledger_config(&self, name: &str, config: &str) -> Result<()> {
        let name_c = required("pool name", name)?;
        let config_c = required("config path", config)?;
        self.logger(Component::Pool)
            .debug_args(format_args!("creating pool ledger config {name}"));
        self.run(&NativeCall::CreatePoolLedgerConfig {
            name: &name_c,
            config: &config_c,
        })
    }

    pub fn delete_pool_ledger_config(&self, name: &str) -> Result<()> {
        let name_c = required("pool name", name)?;
        self.logger(Component::Pool)
            .debug_args(format_args!("deleting pool ledger config {name}"));
        self.run(&NativeCall::DeletePoolLedgerConfig { name: &name_c })
    }

    /// Open the pool ledger `name`, optionally with a runtime configuration
    pub fn open_pool_ledger(&self, name: &str, config: Option<&str>) -> Result<Pool> {
        let name_c = required("pool name", name)?;
        let config_c = optional("config", config)?;
        let ResourceHandle(handle) = self.run(&NativeCall::OpenPoolLedger {
            name: &name_c,
            config: config_c.as_deref(),
        })?;
        self.logger(Component::Pool)
            .debug_args(format_args!("opened pool {name} as handle {handle}"));
        Ok(Pool::new(name, PoolHandle(handle)))
    }

    /// Names of all configured pool ledgers
    pub fn list_pools(&self) -> Result<Vec<String>> {
        let json: String = self.run(&NativeCall::ListPools)?;
        parse_pool_list(&json)
    }

    /// Refresh the pool's view of the ledger nodes
    pub fn refresh_pool_ledger(&self, pool: &Pool) -> Result<()> {
        self.run(&NativeCall::RefreshPoolLedger {
            pool: pool.handle(),
        })
    }

    pub fn close_pool_ledger(&self, pool: Pool) -> Result<()> {
        self.logger(Component::Pool)
            .debug_args(format_args!("closing pool {}", pool.name()));
        self.run(&NativeCall::ClosePoolLedger {
            pool: pool.handle(),
        })
    }
}

fn parse_pool_list(json: &str) -> Result<Vec<String>> {
    let entries: Vec<PoolEntry> = serde_json::from_str(json)
        .map_err(|e| IndyError::InvalidResponse(format!("malformed pool list: {e}")))?;
    Ok(entries.into_iter().map(|entry| entry.pool).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_list_parsing() {
        let pools = parse_pool_list(r#"[{"pool":"sandbox"},{"pool":"staging"}]"#).unwrap();
        assert_eq!(pools, vec!["sandbox", "staging"]);
        assert!(parse_pool_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_pool_list() {
        let err = parse_pool_list(r#"{"pool":"sandbox"}"#).unwrap_err();
        assert!(matches!(err, IndyError::InvalidResponse(_)));
    }
}
