//! Error types for the booking bot.

use crate::storage::StoreError;

/// Faults that abort a turn. They are reported to the guest as a generic
/// apology and never crash the process.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("State store error: {0}")]
    Store(#[from] StoreError),
}
