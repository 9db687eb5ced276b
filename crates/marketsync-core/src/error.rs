//! Error types for the sync pipeline.

use thiserror::Error;

/// Errors that can occur while mirroring marketplace state.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Resolver error: {0}")]
    Resolver(String),

    #[error("Handler error in '{handler}': {reason}")]
    Handler { handler: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl SyncError {
    /// Returns `true` if the error is fatal at startup (a failed backfill or
    /// store open must abort the process rather than degrade).
    pub fn is_fatal_at_startup(&self) -> bool {
        matches!(self, Self::Rpc(_) | Self::Storage(_) | Self::Resolver(_) | Self::Config(_))
    }
}
