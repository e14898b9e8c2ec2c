//! Once-per-object idempotence tracking.
//!
//! Some rewards are paid at most once per world object: the first actor to
//! open a supply container gets the reward, later opens of the same
//! container pay nothing. The ledger remembers which objects have already
//! been processed, and forgets them when the host reports the object
//! destroyed, so ids recycled by the host cannot be mistaken for
//! already-rewarded objects and the set does not grow without bound.

use crate::types::ObjectId;
use dashmap::DashMap;

/// Set of object ids that have already triggered their one-shot reward.
///
/// Every id inserted by [`record`](Self::record) must eventually leave the
/// set via [`forget`](Self::forget), driven by the host's object-destroyed
/// notification. Skipping that cleanup leaks an entry per object for the
/// rest of the process.
#[derive(Debug, Default)]
pub struct OneShotLedger {
    seen: DashMap<ObjectId, ()>,
}

impl OneShotLedger {
    pub fn new() -> Self {
        Self {
            seen: DashMap::new(),
        }
    }

    /// Marks `object` as processed.
    ///
    /// Returns `true` exactly once per id: the first call inserts and
    /// reports that the caller should process the event, every later call
    /// reports `false` without mutating anything, until the id is
    /// forgotten. The insert is a single map operation, so two racing
    /// first-opens cannot both see `true`.
    pub fn record(&self, object: ObjectId) -> bool {
        self.seen.insert(object, ()).is_none()
    }

    /// Removes `object` from the set. No-op for unknown ids.
    ///
    /// Called when the host destroys the object, whether or not it was ever
    /// processed.
    pub fn forget(&self, object: ObjectId) {
        self.seen.remove(&object);
    }

    /// Whether `object` is currently marked as processed.
    pub fn contains(&self, object: ObjectId) -> bool {
        self.seen.contains_key(&object)
    }

    /// Number of objects currently tracked.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRATE_A: ObjectId = ObjectId(1001);
    const CRATE_B: ObjectId = ObjectId(1002);

    #[test]
    fn first_record_wins_repeats_lose() {
        let ledger = OneShotLedger::new();
        assert!(ledger.record(CRATE_A));
        assert!(!ledger.record(CRATE_A));
        assert!(!ledger.record(CRATE_A));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn forget_rearms_the_id() {
        let ledger = OneShotLedger::new();
        assert!(ledger.record(CRATE_A));
        ledger.forget(CRATE_A);
        assert!(ledger.record(CRATE_A));
    }

    #[test]
    fn forget_of_unknown_id_is_a_noop() {
        let ledger = OneShotLedger::new();
        ledger.forget(CRATE_B);
        assert!(ledger.is_empty());
    }

    #[test]
    fn ids_are_independent() {
        let ledger = OneShotLedger::new();
        assert!(ledger.record(CRATE_A));
        assert!(ledger.record(CRATE_B));
        ledger.forget(CRATE_A);
        assert!(!ledger.record(CRATE_B));
        assert!(ledger.contains(CRATE_B));
        assert!(!ledger.contains(CRATE_A));
    }

    #[test]
    fn destroy_without_processing_keeps_the_set_clean() {
        // Objects can despawn without ever being opened; forgetting them
        // must leave no residue.
        let ledger = OneShotLedger::new();
        ledger.forget(CRATE_A);
        assert!(ledger.record(CRATE_A));
        ledger.forget(CRATE_A);
        assert!(ledger.is_empty());
    }
}
