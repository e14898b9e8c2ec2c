//! Salvage rewards plugin.
//!
//! Pays tiered rewards to actors for destroying qualifying objects (every
//! N-th destruction) and for the first loot of qualifying containers (once
//! per container). Tier resolution, threshold accounting, and channel
//! payout live in [`reward_system`]; this crate wires them behind the four
//! host entry points:
//!
//! - [`SalvageRewardsPlugin::handle_entity_destroyed`]
//! - [`SalvageRewardsPlugin::handle_container_looted`]
//! - [`SalvageRewardsPlugin::handle_object_destroyed`]
//! - [`SalvageRewardsPlugin::handle_actor_died`]
//!
//! All entry points are safe to call from concurrent tasks.

use async_trait::async_trait;
use reward_system::{
    ActorId, ChannelRegistry, OneShotLedger, PermissionAuthority, ProgressLedger, RewardSettings,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

pub mod handlers;
pub mod messages;

pub use messages::{currency_notice, points_notice, RewardTrigger};

/// Delivers reward notices to an actor. The host decides what delivery
/// means (chat, toast, log line).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn message(&self, actor: ActorId, text: &str);
}

/// The salvage rewards plugin instance.
///
/// One instance serves the whole server session. Settings are swappable at
/// runtime via [`reload`](Self::reload); reward progress and the container
/// loot log survive a reload.
pub struct SalvageRewardsPlugin {
    settings: RwLock<RewardSettings>,
    progress: ProgressLedger,
    loot_log: OneShotLedger,
    channels: ChannelRegistry,
    authority: Arc<dyn PermissionAuthority>,
    notifier: Option<Arc<dyn Notifier>>,
    rewards_paid: AtomicU64,
}

impl SalvageRewardsPlugin {
    pub fn new(settings: RewardSettings, authority: Arc<dyn PermissionAuthority>) -> Self {
        Self {
            settings: RwLock::new(settings),
            progress: ProgressLedger::new(),
            loot_log: OneShotLedger::new(),
            channels: ChannelRegistry::new(),
            authority,
            notifier: None,
            rewards_paid: AtomicU64::new(0),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// The channel registry, for the host to attach and detach reward
    /// backends at runtime.
    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    /// Probes the configured reward channels and disables the ones whose
    /// backend is not attached.
    ///
    /// A channel the config asks for but the host never wired up would
    /// silently swallow every payout, so it is turned off loudly here
    /// instead. Call after attaching backends and before feeding events.
    pub async fn on_init(&self) {
        let mut settings = self.settings.write().await;

        if settings.use_currency && !self.channels.currency_attached().await {
            error!("use_currency is enabled but no currency backend is attached, disabling");
            settings.use_currency = false;
        }
        if settings.use_points && !self.channels.points_attached().await {
            error!("use_points is enabled but no points backend is attached, disabling");
            settings.use_points = false;
        }

        if !settings.use_currency && !settings.use_points {
            error!("no reward channel is enabled, rewards will not be paid");
        }

        info!(
            events_per_reward = settings.events_per_reward,
            tiers = settings.tiers.len(),
            use_currency = settings.use_currency,
            use_points = settings.use_points,
            "salvage rewards initialized"
        );
    }

    /// Replaces the active settings.
    ///
    /// Progress counters and the loot log are kept. An actor mid-way
    /// through the old threshold keeps their count; if the new threshold
    /// is lower than their current count they fire on their next
    /// qualifying event.
    pub async fn reload(&self, new_settings: RewardSettings) {
        *self.settings.write().await = new_settings;
        info!("salvage rewards configuration reloaded");
        self.on_init().await;
    }

    /// Logs session totals. Ledgers are dropped with the instance.
    pub async fn on_shutdown(&self) {
        info!(
            rewards_paid = self.rewards_paid.load(Ordering::Relaxed),
            actors_tracked = self.progress.tracked_actors(),
            containers_tracked = self.loot_log.len(),
            "salvage rewards shutting down"
        );
    }

    /// Total rewards paid this session, across both triggers.
    pub fn rewards_paid(&self) -> u64 {
        self.rewards_paid.load(Ordering::Relaxed)
    }

    pub async fn settings(&self) -> RewardSettings {
        self.settings.read().await.clone()
    }
}
