//! Reward channel registry.
//!
//! Rewards are paid through sibling services the hosting server may or may
//! not have loaded: a currency service (deposits into an economy balance)
//! and a points service (loyalty-style points). Either, both, or neither
//! can be present, and they can appear or disappear while the server runs
//! as the host loads and unloads its plugins.
//!
//! The registry therefore never caches availability: every grant call reads
//! the current slots. A missing channel is skipped silently; a channel that
//! fails is logged and reported in the outcome, never escalated.

use crate::error::RewardError;
use crate::types::ActorId;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// Currency deposit service, typically backed by the host's economy plugin.
#[async_trait]
pub trait CurrencyService: Send + Sync {
    /// Deposits `amount` into the actor's balance.
    async fn deposit(&self, actor: ActorId, amount: f64) -> Result<(), RewardError>;
}

/// Points service, typically backed by the host's server-rewards plugin.
#[async_trait]
pub trait PointsService: Send + Sync {
    /// Credits `points` to the actor.
    async fn add_points(&self, actor: ActorId, points: i64) -> Result<(), RewardError>;
}

/// Result of one channel within a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelGrant {
    /// Channel disabled by config or not attached; nothing was attempted.
    Skipped,
    /// The channel accepted the reward.
    Granted,
    /// The channel was attempted and reported an error (already logged).
    Failed,
}

impl ChannelGrant {
    pub fn granted(self) -> bool {
        matches!(self, ChannelGrant::Granted)
    }
}

/// Per-channel outcome of a single reward grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantOutcome {
    pub currency: ChannelGrant,
    pub points: ChannelGrant,
}

impl GrantOutcome {
    /// Whether at least one channel paid out.
    pub fn any_granted(&self) -> bool {
        self.currency.granted() || self.points.granted()
    }
}

/// Hot-swappable slots for the two optional reward channels.
///
/// Attach/detach are cheap and safe at any time; in-flight grants finish
/// against the service instance they snapshotted.
#[derive(Default)]
pub struct ChannelRegistry {
    currency: RwLock<Option<Arc<dyn CurrencyService>>>,
    points: RwLock<Option<Arc<dyn PointsService>>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn attach_currency(&self, service: Arc<dyn CurrencyService>) {
        *self.currency.write().await = Some(service);
        debug!("currency channel attached");
    }

    pub async fn detach_currency(&self) {
        *self.currency.write().await = None;
        debug!("currency channel detached");
    }

    pub async fn currency_attached(&self) -> bool {
        self.currency.read().await.is_some()
    }

    pub async fn attach_points(&self, service: Arc<dyn PointsService>) {
        *self.points.write().await = Some(service);
        debug!("points channel attached");
    }

    pub async fn detach_points(&self) {
        *self.points.write().await = None;
        debug!("points channel detached");
    }

    pub async fn points_attached(&self) -> bool {
        self.points.read().await.is_some()
    }

    /// Pays `value` to `actor` through whichever enabled channels are
    /// currently attached.
    ///
    /// `use_currency` / `use_points` carry the session config; availability
    /// on top of that is read fresh from the slots. The currency channel
    /// receives `value` as-is, the points channel receives it rounded to
    /// the nearest whole point.
    pub async fn grant(
        &self,
        actor: ActorId,
        value: f64,
        use_currency: bool,
        use_points: bool,
    ) -> GrantOutcome {
        // Snapshot under the read locks, call outside them.
        let currency = if use_currency {
            self.currency.read().await.clone()
        } else {
            None
        };
        let points = if use_points {
            self.points.read().await.clone()
        } else {
            None
        };

        let currency_result = match currency {
            None => ChannelGrant::Skipped,
            Some(service) => match service.deposit(actor, value).await {
                Ok(()) => ChannelGrant::Granted,
                Err(e) => {
                    error!("currency grant for actor {actor} failed: {e}");
                    ChannelGrant::Failed
                }
            },
        };

        let points_result = match points {
            None => ChannelGrant::Skipped,
            Some(service) => match service.add_points(actor, value.round() as i64).await {
                Ok(()) => ChannelGrant::Granted,
                Err(e) => {
                    error!("points grant for actor {actor} failed: {e}");
                    ChannelGrant::Failed
                }
            },
        };

        GrantOutcome {
            currency: currency_result,
            points: points_result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCurrency {
        deposits: Mutex<Vec<(ActorId, f64)>>,
    }

    #[async_trait]
    impl CurrencyService for RecordingCurrency {
        async fn deposit(&self, actor: ActorId, amount: f64) -> Result<(), RewardError> {
            self.deposits.lock().unwrap().push((actor, amount));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingPoints {
        credits: Mutex<Vec<(ActorId, i64)>>,
    }

    #[async_trait]
    impl PointsService for RecordingPoints {
        async fn add_points(&self, actor: ActorId, points: i64) -> Result<(), RewardError> {
            self.credits.lock().unwrap().push((actor, points));
            Ok(())
        }
    }

    struct FailingCurrency;

    #[async_trait]
    impl CurrencyService for FailingCurrency {
        async fn deposit(&self, actor: ActorId, _amount: f64) -> Result<(), RewardError> {
            Err(RewardError::CurrencyFailed {
                actor: actor.0,
                reason: "balance store offline".to_string(),
            })
        }
    }

    const ACTOR: ActorId = ActorId(42);

    #[tokio::test]
    async fn grants_through_attached_channels_only() {
        let registry = ChannelRegistry::new();
        let currency = Arc::new(RecordingCurrency::default());
        registry.attach_currency(currency.clone()).await;

        let outcome = registry.grant(ACTOR, 5.0, true, true).await;
        assert_eq!(outcome.currency, ChannelGrant::Granted);
        // Points enabled by config but no service attached.
        assert_eq!(outcome.points, ChannelGrant::Skipped);
        assert!(outcome.any_granted());
        assert_eq!(*currency.deposits.lock().unwrap(), vec![(ACTOR, 5.0)]);
    }

    #[tokio::test]
    async fn config_flags_suppress_attached_channels() {
        let registry = ChannelRegistry::new();
        registry
            .attach_currency(Arc::new(RecordingCurrency::default()))
            .await;

        let outcome = registry.grant(ACTOR, 5.0, false, false).await;
        assert_eq!(outcome.currency, ChannelGrant::Skipped);
        assert_eq!(outcome.points, ChannelGrant::Skipped);
        assert!(!outcome.any_granted());
    }

    #[tokio::test]
    async fn points_are_rounded_to_whole_credits() {
        let registry = ChannelRegistry::new();
        let points = Arc::new(RecordingPoints::default());
        registry.attach_points(points.clone()).await;

        registry.grant(ACTOR, 2.6, false, true).await;
        assert_eq!(*points.credits.lock().unwrap(), vec![(ACTOR, 3)]);
    }

    #[tokio::test]
    async fn detach_takes_effect_on_the_next_grant() {
        let registry = ChannelRegistry::new();
        let currency = Arc::new(RecordingCurrency::default());
        registry.attach_currency(currency.clone()).await;

        assert!(registry.grant(ACTOR, 1.0, true, false).await.any_granted());
        registry.detach_currency().await;
        assert!(!registry.grant(ACTOR, 1.0, true, false).await.any_granted());
        assert_eq!(currency.deposits.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn a_failing_channel_does_not_poison_the_other() {
        let registry = ChannelRegistry::new();
        registry.attach_currency(Arc::new(FailingCurrency)).await;
        let points = Arc::new(RecordingPoints::default());
        registry.attach_points(points.clone()).await;

        let outcome = registry.grant(ACTOR, 4.0, true, true).await;
        assert_eq!(outcome.currency, ChannelGrant::Failed);
        assert_eq!(outcome.points, ChannelGrant::Granted);
        assert!(outcome.any_granted());
        assert_eq!(*points.credits.lock().unwrap(), vec![(ACTOR, 4)]);
    }
}
