//! Permission authority seam.
//!
//! Tier grants live in the hosting server's permission system, not here.
//! The host (or a test) implements [`PermissionAuthority`]; the plugin asks
//! it per event which configured tiers the actor currently holds.

use crate::types::{ActorId, GrantSet, TierTable};

/// Host-side permission lookups.
///
/// Implementations are expected to be cheap, synchronous lookups against
/// the host's in-memory permission registry; they are consulted on every
/// qualifying event.
pub trait PermissionAuthority: Send + Sync {
    /// Whether `actor` currently holds the permission tier `tier`.
    fn has_permission(&self, actor: ActorId, tier: &str) -> bool;
}

/// Builds the grant set for `actor`: every tier of `table` the authority
/// confirms the actor holds.
///
/// Called fresh per event so revoked or newly granted tiers take effect
/// immediately.
pub fn held_tiers(
    authority: &dyn PermissionAuthority,
    actor: ActorId,
    table: &TierTable,
) -> GrantSet {
    table
        .iter()
        .filter(|(name, _)| authority.has_permission(actor, name))
        .map(|(name, _)| name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Grants whatever tiers the test lists, to everyone.
    struct FixedGrants(Vec<&'static str>);

    impl PermissionAuthority for FixedGrants {
        fn has_permission(&self, _actor: ActorId, tier: &str) -> bool {
            self.0.contains(&tier)
        }
    }

    fn table() -> TierTable {
        [("default".to_string(), 2.0), ("vip".to_string(), 5.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn collects_only_held_tiers() {
        let authority = FixedGrants(vec!["default"]);
        let grants = held_tiers(&authority, ActorId(1), &table());
        assert!(grants.contains("default"));
        assert!(!grants.contains("vip"));
        assert_eq!(grants.len(), 1);
    }

    #[test]
    fn no_grants_yields_empty_set() {
        let authority = FixedGrants(vec![]);
        let grants = held_tiers(&authority, ActorId(1), &table());
        assert!(grants.is_empty());
    }

    #[test]
    fn grants_outside_the_table_are_never_asked_for() {
        // The authority may hold tiers the config does not price; they must
        // not appear in the grant set.
        let authority = FixedGrants(vec!["default", "vip", "moderator"]);
        let grants = held_tiers(&authority, ActorId(1), &table());
        assert_eq!(grants.len(), 2);
        assert!(!grants.contains("moderator"));
    }
}
