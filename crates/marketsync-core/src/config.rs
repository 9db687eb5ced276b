//! Sync service configuration.

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Configuration for one sync service instance.
///
/// Constructed once at startup and passed by reference into the orchestrator
/// and reconcilers — no ambient process-scope state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// JSON-RPC endpoint of the chain node.
    pub rpc_url: String,
    /// Address of the marketplace contract to mirror.
    pub contract_address: String,
    /// Content-storage gateway used by the metadata resolver.
    pub ipfs_gateway: String,
    /// Record-store location: `"memory"` or a SQLite path/URL.
    pub store_url: String,
    /// Log directive string (e.g. `"info,marketsync_sync=debug"`).
    pub log_level: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".into(),
            contract_address: String::new(),
            ipfs_gateway: "https://ipfs.io/ipfs/".into(),
            store_url: "memory".into(),
            log_level: "info".into(),
        }
    }
}

impl SyncConfig {
    /// Load configuration from `MARKETSYNC_*` environment variables,
    /// falling back to defaults for anything unset.
    ///
    /// `MARKETSYNC_CONTRACT` has no default and must be set.
    pub fn from_env() -> Result<Self, SyncError> {
        let defaults = Self::default();
        let contract_address = std::env::var("MARKETSYNC_CONTRACT")
            .map_err(|_| SyncError::Config("MARKETSYNC_CONTRACT is not set".into()))?;

        Ok(Self {
            rpc_url: env_or("MARKETSYNC_RPC_URL", defaults.rpc_url),
            contract_address,
            ipfs_gateway: env_or("MARKETSYNC_IPFS_GATEWAY", defaults.ipfs_gateway),
            store_url: env_or("MARKETSYNC_STORE_URL", defaults.store_url),
            log_level: env_or("MARKETSYNC_LOG", defaults.log_level),
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SyncConfig::default();
        assert_eq!(cfg.rpc_url, "http://localhost:8545");
        assert_eq!(cfg.store_url, "memory");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn from_env_requires_contract() {
        // Serialized access to the process environment is not needed here:
        // the variable is never set by any other test in this crate.
        std::env::remove_var("MARKETSYNC_CONTRACT");
        assert!(SyncConfig::from_env().is_err());
    }
}
