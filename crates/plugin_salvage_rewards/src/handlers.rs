//! Host entry points.
//!
//! Each handler takes a snapshot of the settings up front so a concurrent
//! reload cannot change the rules half-way through a single event.

use crate::messages::{currency_notice, points_notice, RewardTrigger};
use crate::SalvageRewardsPlugin;
use reward_system::{held_tiers, resolve_tier, ActorId, ObjectId, RewardError, RewardSettings};
use std::sync::atomic::Ordering;
use tracing::debug;

impl SalvageRewardsPlugin {
    /// A destroyable object of `kind` was destroyed by `actor`.
    ///
    /// Counts toward the actor's destruction threshold when the kind is
    /// configured and the actor holds a tier; pays out on every N-th
    /// qualifying event. Returns whether a reward was paid.
    pub async fn handle_entity_destroyed(
        &self,
        actor: ActorId,
        kind: &str,
    ) -> Result<bool, RewardError> {
        let settings = self.settings.read().await.clone();

        if !settings.reward_destruction {
            return Ok(false);
        }
        if !settings.destruction_kinds.iter().any(|k| k == kind) {
            return Ok(false);
        }

        let Some(value) = self.tier_value(actor, &settings) else {
            debug!(%actor, "destruction ignored, actor holds no reward tier");
            return Ok(false);
        };

        let fired = self
            .progress
            .record(actor, settings.events_per_reward)?;
        if !fired {
            return Ok(false);
        }

        self.pay(actor, value, &settings, RewardTrigger::Destruction)
            .await;
        Ok(true)
    }

    /// A lootable container of `kind` was opened by `actor`.
    ///
    /// Pays at most once per container instance, on first open. The claim
    /// on the container is taken before tier resolution, so the second
    /// looter of a shared crate never gets paid for it either. Returns
    /// whether a reward was paid.
    pub async fn handle_container_looted(
        &self,
        actor: ActorId,
        object: ObjectId,
        kind: &str,
    ) -> Result<bool, RewardError> {
        let settings = self.settings.read().await.clone();

        if !settings.reward_first_loot {
            return Ok(false);
        }
        if !settings.container_kinds.iter().any(|k| k == kind) {
            return Ok(false);
        }

        if !self.loot_log.record(object) {
            debug!(%actor, %object, "container already claimed");
            return Ok(false);
        }

        let Some(value) = self.tier_value(actor, &settings) else {
            debug!(%actor, "loot ignored, actor holds no reward tier");
            return Ok(false);
        };

        self.pay(actor, value, &settings, RewardTrigger::FirstLoot)
            .await;
        Ok(true)
    }

    /// A tracked object left the world. Drops its loot-log entry so the
    /// ledger does not grow with every container the server ever spawned.
    pub async fn handle_object_destroyed(&self, object: ObjectId) {
        self.loot_log.forget(object);
    }

    /// An actor died. Wipes their destruction progress when configured.
    pub async fn handle_actor_died(&self, actor: ActorId) {
        let reset = self.settings.read().await.reset_progress_on_death;
        if reset {
            self.progress.reset(actor);
        }
    }

    /// Highest reward value among the tiers the actor holds, or `None`
    /// when they hold none. Read fresh on every event so permission
    /// changes apply immediately.
    fn tier_value(&self, actor: ActorId, settings: &RewardSettings) -> Option<f64> {
        let held = held_tiers(self.authority.as_ref(), actor, &settings.tiers);
        let tier = resolve_tier(&held, &settings.tiers)?;
        settings.tiers.value_of(tier)
    }

    async fn pay(
        &self,
        actor: ActorId,
        value: f64,
        settings: &RewardSettings,
        trigger: RewardTrigger,
    ) {
        let outcome = self
            .channels
            .grant(actor, value, settings.use_currency, settings.use_points)
            .await;

        if outcome.any_granted() {
            self.rewards_paid.fetch_add(1, Ordering::Relaxed);
        }

        if settings.notify_on_reward {
            if let Some(notifier) = &self.notifier {
                if outcome.currency.granted() {
                    notifier.message(actor, &currency_notice(value, trigger)).await;
                }
                if outcome.points.granted() {
                    notifier
                        .message(actor, &points_notice(value.round() as i64, trigger))
                        .await;
                }
            }
        }
    }
}
