//! Error types for reward accounting and channel dispatch.

use thiserror::Error;

/// Errors that can occur while recording events or granting rewards.
///
/// None of these are fatal to the hosting server; callers log them and move
/// on to the next event.
#[derive(Debug, Error)]
pub enum RewardError {
    /// The caller supplied a threshold below 1. This is a contract
    /// violation rather than a runtime condition, so it is rejected instead
    /// of being clamped.
    #[error("events_per_reward must be at least 1, got {0}")]
    InvalidThreshold(u32),

    /// The currency channel accepted the call but failed to deposit.
    #[error("currency deposit failed for actor {actor}: {reason}")]
    CurrencyFailed { actor: u64, reason: String },

    /// The points channel accepted the call but failed to credit.
    #[error("points award failed for actor {actor}: {reason}")]
    PointsFailed { actor: u64, reason: String },
}
