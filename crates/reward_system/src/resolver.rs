//! Tier resolution: which single tier does an actor get rewarded at.
//!
//! An actor may hold several permission tiers at once (everyone holds
//! `default`, supporters hold `vip` on top). Rewards are never stacked; the
//! actor is paid at the single highest-value tier present in both the grant
//! set and the configured tier table.

use crate::types::{GrantSet, TierTable};

/// Selects the highest-value tier present in both `grants` and `table`.
///
/// Pure function: no side effects, identical inputs yield identical output.
/// Returns `None` when no granted tier exists in the table (including when
/// either input is empty).
///
/// Ties between tiers of equal value resolve to whichever is encountered
/// first in the table's unspecified iteration order. Callers must not depend
/// on tie resolution; give tiers distinct values if the winner matters.
///
/// # Examples
///
/// ```rust
/// use reward_system::{resolve_tier, GrantSet, TierTable};
///
/// let table: TierTable = [("default".to_string(), 2.0), ("vip".to_string(), 5.0)]
///     .into_iter()
///     .collect();
/// let grants: GrantSet = ["default", "vip"].into_iter().collect();
///
/// assert_eq!(resolve_tier(&grants, &table), Some("vip"));
/// assert_eq!(resolve_tier(&GrantSet::new(), &table), None);
/// ```
pub fn resolve_tier<'t>(grants: &GrantSet, table: &'t TierTable) -> Option<&'t str> {
    let mut best: Option<(&str, f64)> = None;

    for (name, value) in table.iter() {
        if !grants.contains(name) {
            continue;
        }
        match best {
            Some((_, best_value)) if best_value >= value => {}
            _ => best = Some((name, value)),
        }
    }

    best.map(|(name, _)| name)
}
