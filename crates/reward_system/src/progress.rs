//! Threshold-gated progress accounting.
//!
//! Every qualifying event moves an actor one step toward their next reward;
//! the step that reaches the threshold fires the reward and wraps the
//! counter back to zero in the same operation. Death (or any other external
//! trigger the host wires up) can reset partial progress.

use crate::error::RewardError;
use crate::types::ActorId;
use dashmap::DashMap;

/// Per-actor counter of qualifying events since the last reward or reset.
///
/// Counters are created lazily on the first event for an actor and persist
/// for the lifetime of the process; entries are never evicted. That matches
/// the original plugin this is modelled on and keeps reward progress from
/// silently disappearing, at the cost of memory proportional to the number
/// of actors ever seen.
///
/// Immediately after [`record`](Self::record) returns, the stored value for
/// that actor is in `[0, threshold - 1]`.
#[derive(Debug, Default)]
pub struct ProgressLedger {
    counters: DashMap<ActorId, u32>,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self {
            counters: DashMap::new(),
        }
    }

    /// Counts one qualifying event for `actor` against `threshold`.
    ///
    /// Returns `Ok(true)` exactly when this event is the threshold-th since
    /// the actor's last reward or reset; the counter wraps to zero in the
    /// same guarded operation, so `fired` can never be reported twice for
    /// one wrap even under concurrent delivery. With `threshold == 1` every
    /// call fires.
    ///
    /// A `threshold` of zero is a caller contract violation and is rejected
    /// with [`RewardError::InvalidThreshold`] without touching the counter.
    pub fn record(&self, actor: ActorId, threshold: u32) -> Result<bool, RewardError> {
        if threshold == 0 {
            return Err(RewardError::InvalidThreshold(threshold));
        }

        // The entry guard holds the shard lock, making the compare and the
        // wrap a single atomic step for this actor.
        let mut count = self.counters.entry(actor).or_insert(0);
        // `>=` rather than `==`: a config reload can lower the threshold
        // below an actor's accumulated count, which then fires immediately.
        if *count >= threshold - 1 {
            *count = 0;
            Ok(true)
        } else {
            *count += 1;
            Ok(false)
        }
    }

    /// Unconditionally resets the actor's counter to zero.
    ///
    /// No-op for actors that have never recorded an event.
    pub fn reset(&self, actor: ActorId) {
        if let Some(mut count) = self.counters.get_mut(&actor) {
            *count = 0;
        }
    }

    /// Current progress for an actor (zero when untracked).
    pub fn progress(&self, actor: ActorId) -> u32 {
        self.counters.get(&actor).map(|count| *count).unwrap_or(0)
    }

    /// Number of actors with a counter, whatever its value.
    pub fn tracked_actors(&self) -> usize {
        self.counters.len()
    }
}
