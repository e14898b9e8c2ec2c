//! # Core Type Definitions
//!
//! Fundamental types shared across the reward system: actor and object
//! identifiers plus the two read-only inputs of tier resolution.
//!
//! ## Design Principles
//!
//! - **Type Safety**: Wrapper types prevent ID confusion (an [`ActorId`] can
//!   never be passed where an [`ObjectId`] is expected)
//! - **Caller Ownership**: identifiers are supplied by the host on every
//!   call; this crate never invents them
//! - **Serialization**: identifiers and the tier table round-trip through
//!   serde so they can live in TOML configuration

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Stable identifier for a player in the hosting game server.
///
/// Wraps the host's 64-bit account id. The same actor must map to the same
/// `ActorId` across events, or progress accounting falls apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ActorId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<u64> for ActorId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Network identity of a world object (a lootable container, typically).
///
/// Object ids are only meaningful while the object exists; the host reuses
/// them after despawn, which is why [`crate::OneShotLedger::forget`] must be
/// called when the object is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Mapping from permission tier name to reward value.
///
/// Loaded once from configuration and treated as read-only afterwards.
/// Iteration order is unspecified; [`crate::resolve_tier`] documents the
/// consequence (tie resolution is undefined).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable(HashMap<String, f64>);

impl TierTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Inserts or replaces a tier.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    /// Returns the reward value for a tier, if the tier exists.
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Whether the table holds the given tier name.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over (tier name, reward value) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl FromIterator<(String, f64)> for TierTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The subset of tier names an actor currently holds.
///
/// Built fresh for each resolution from the permission authority; never
/// cached, because grants can change between events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantSet(HashSet<String>);

impl GrantSet {
    /// Creates an empty grant set.
    pub fn new() -> Self {
        Self(HashSet::new())
    }

    /// Records that the actor holds the given tier.
    pub fn insert(&mut self, tier: impl Into<String>) {
        self.0.insert(tier.into());
    }

    /// Whether the actor holds the given tier.
    pub fn contains(&self, tier: &str) -> bool {
        self.0.contains(tier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<String> for GrantSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for GrantSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_round_trips_through_display_and_parse() {
        let id = ActorId(76561198000000001);
        let parsed: ActorId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn tier_table_lookup() {
        let table: TierTable = [("default".to_string(), 2.0), ("vip".to_string(), 5.0)]
            .into_iter()
            .collect();

        assert_eq!(table.len(), 2);
        assert_eq!(table.value_of("vip"), Some(5.0));
        assert_eq!(table.value_of("missing"), None);
        assert!(table.contains("default"));
    }

    #[test]
    fn grant_set_membership() {
        let grants: GrantSet = ["default", "vip"].into_iter().collect();
        assert!(grants.contains("vip"));
        assert!(!grants.contains("admin"));
        assert_eq!(grants.len(), 2);
    }
}
