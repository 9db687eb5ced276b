//! Fluent builder API for sync configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use marketsync_sync::SyncBuilder;
//!
//! let config = SyncBuilder::new()
//!     .rpc_url("https://rpc.sepolia.org")
//!     .contract("0xf4351BA9Ca701Cf689442833CDA5F7FF18C2e00C")
//!     .store_url("./marketsync.db")
//!     .build_config();
//! ```

use marketsync_core::config::SyncConfig;

/// Fluent builder for `SyncConfig`.
#[derive(Default)]
pub struct SyncBuilder {
    config: SyncConfig,
}

impl SyncBuilder {
    pub fn new() -> Self {
        Self { config: SyncConfig::default() }
    }

    /// Set the chain node's JSON-RPC endpoint.
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.config.rpc_url = url.into();
        self
    }

    /// Set the marketplace contract address to mirror.
    pub fn contract(mut self, address: impl Into<String>) -> Self {
        self.config.contract_address = address.into();
        self
    }

    /// Set the content-storage gateway for metadata resolution.
    pub fn ipfs_gateway(mut self, url: impl Into<String>) -> Self {
        self.config.ipfs_gateway = url.into();
        self
    }

    /// Set the record-store location (`"memory"` or a SQLite path/URL).
    pub fn store_url(mut self, url: impl Into<String>) -> Self {
        self.config.store_url = url.into();
        self
    }

    /// Set the log directive string.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Build the `SyncConfig`.
    pub fn build_config(self) -> SyncConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let cfg = SyncBuilder::new().build_config();
        assert_eq!(cfg.rpc_url, "http://localhost:8545");
        assert_eq!(cfg.store_url, "memory");
    }

    #[test]
    fn builder_custom() {
        let cfg = SyncBuilder::new()
            .rpc_url("https://rpc.sepolia.org")
            .contract("0xf4351BA9Ca701Cf689442833CDA5F7FF18C2e00C")
            .store_url("./marketsync.db")
            .log_level("debug")
            .build_config();

        assert_eq!(cfg.rpc_url, "https://rpc.sepolia.org");
        assert_eq!(cfg.contract_address, "0xf4351BA9Ca701Cf689442833CDA5F7FF18C2e00C");
        assert_eq!(cfg.store_url, "./marketsync.db");
        assert_eq!(cfg.log_level, "debug");
    }
}
