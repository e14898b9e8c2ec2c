//! Player-facing reward notices.

/// Which configured trigger produced a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardTrigger {
    /// A qualifying object was destroyed.
    Destruction,
    /// A qualifying container was looted for the first time.
    FirstLoot,
}

impl RewardTrigger {
    fn phrase(self) -> &'static str {
        match self {
            RewardTrigger::Destruction => "destroying a barrel",
            RewardTrigger::FirstLoot => "looting a crate",
        }
    }
}

/// Notice for a currency deposit.
pub fn currency_notice(amount: f64, trigger: RewardTrigger) -> String {
    format!("You received ${amount} for {}!", trigger.phrase())
}

/// Notice for a points award.
pub fn points_notice(points: i64, trigger: RewardTrigger) -> String {
    format!("You received {points} points for {}!", trigger.phrase())
}
