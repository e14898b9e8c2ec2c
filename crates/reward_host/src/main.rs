//! Main entry point for the reward host.
//!
//! Loads configuration, wires the salvage rewards plugin to in-process
//! currency and points backends, and drives it with a deterministic
//! scripted event feed so the full grant path can be observed end to end.

use anyhow::Context;
use async_trait::async_trait;
use plugin_salvage_rewards::{Notifier, SalvageRewardsPlugin};
use reward_system::{
    ActorId, CurrencyService, LoggingSettings, ObjectId, PermissionAuthority, PointsService,
    RewardConfig, RewardError,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

use cli::CliArgs;

// ============================================================================
// Demo Collaborators
// ============================================================================

/// Permission authority for the demo: every actor holds the default tier,
/// actors listed under `[demo] vip_actors` also hold vip.
struct DemoAuthority {
    vip_actors: HashSet<u64>,
}

impl PermissionAuthority for DemoAuthority {
    fn has_permission(&self, actor: ActorId, tier: &str) -> bool {
        match tier {
            "default" => true,
            "vip" => self.vip_actors.contains(&actor.0),
            _ => false,
        }
    }
}

/// In-process currency backend keeping per-actor balances.
#[derive(Default)]
struct DemoBank {
    balances: Mutex<HashMap<u64, f64>>,
}

impl DemoBank {
    fn balances(&self) -> Vec<(u64, f64)> {
        let mut entries: Vec<_> = self
            .balances
            .lock()
            .expect("balance lock poisoned")
            .iter()
            .map(|(actor, balance)| (*actor, *balance))
            .collect();
        entries.sort_by_key(|(actor, _)| *actor);
        entries
    }
}

#[async_trait]
impl CurrencyService for DemoBank {
    async fn deposit(&self, actor: ActorId, amount: f64) -> Result<(), RewardError> {
        let mut balances = self.balances.lock().expect("balance lock poisoned");
        let balance = balances.entry(actor.0).or_insert(0.0);
        *balance += amount;
        info!(%actor, amount, balance = *balance, "currency deposited");
        Ok(())
    }
}

/// In-process points backend keeping per-actor totals.
#[derive(Default)]
struct DemoScoreboard {
    totals: Mutex<HashMap<u64, i64>>,
}

#[async_trait]
impl PointsService for DemoScoreboard {
    async fn add_points(&self, actor: ActorId, points: i64) -> Result<(), RewardError> {
        let mut totals = self.totals.lock().expect("totals lock poisoned");
        let total = totals.entry(actor.0).or_insert(0);
        *total += points;
        info!(%actor, points, total = *total, "points awarded");
        Ok(())
    }
}

/// Prints reward notices through the log instead of a chat window.
struct ChatNotifier;

#[async_trait]
impl Notifier for ChatNotifier {
    async fn message(&self, actor: ActorId, text: &str) {
        info!(target: "chat", %actor, "{text}");
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(config: &LoggingSettings, json_format: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);

    if json_format || config.json_format {
        registry
            .with(fmt::layer().json().with_file(false).with_line_number(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_ansi(true).with_file(false).with_line_number(false))
            .init();
    }

    info!("logging initialized with level: {}", config.level);
    Ok(())
}

// ============================================================================
// Scripted Feed
// ============================================================================

/// Feeds a fixed event script through the plugin's entry points.
///
/// Two actors destroy `barrels` barrels each, interleaved with events the
/// plugin must ignore or handle specially: an unconfigured object kind, a
/// double-looted crate, a crate despawn, and a mid-script death.
async fn run_script(plugin: &SalvageRewardsPlugin, barrels: u32) -> anyhow::Result<()> {
    let scrapper = ActorId(1);
    let vip = ActorId(2);
    let crate_a = ObjectId(1001);
    let crate_b = ObjectId(1002);

    info!("feeding scripted events ({barrels} barrels per actor)");

    for round in 0..barrels {
        plugin.handle_entity_destroyed(scrapper, "barrel").await?;
        plugin.handle_entity_destroyed(vip, "barrel").await?;

        // Half-way through, the first actor dies and loses their progress.
        if round == barrels / 2 {
            info!(actor = %scrapper, "actor died mid-script");
            plugin.handle_actor_died(scrapper).await;
        }
    }

    // Object kinds outside the configured lists never count.
    plugin.handle_entity_destroyed(scrapper, "roadsign").await?;

    // First loot pays once; the second open of the same crate pays nothing.
    plugin.handle_container_looted(vip, crate_a, "supply_crate").await?;
    plugin.handle_container_looted(scrapper, crate_a, "supply_crate").await?;

    // A despawned crate releases its id for reuse.
    plugin.handle_container_looted(scrapper, crate_b, "supply_crate").await?;
    plugin.handle_object_destroyed(crate_b).await;
    plugin.handle_container_looted(vip, crate_b, "supply_crate").await?;

    Ok(())
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = RewardConfig::load_from_file(&args.config_path)
        .await
        .with_context(|| format!("loading {}", args.config_path.display()))?;

    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }
    if args.json_logs {
        config.logging.json_format = true;
    }

    config.validate().context("configuration validation failed")?;
    setup_logging(&config.logging, args.json_logs)?;

    info!("reward host v{}", env!("CARGO_PKG_VERSION"));
    info!(config = %args.config_path.display(), "configuration loaded");

    if config.demo.vip_actors.is_empty() {
        warn!("[demo] vip_actors is empty, granting vip to actor 2 for the script");
        config.demo.vip_actors.push(2);
    }

    let authority = Arc::new(DemoAuthority {
        vip_actors: config.demo.vip_actors.iter().copied().collect(),
    });

    let bank = Arc::new(DemoBank::default());
    let scoreboard = Arc::new(DemoScoreboard::default());

    let plugin = SalvageRewardsPlugin::new(config.rewards.clone(), authority)
        .with_notifier(Arc::new(ChatNotifier));
    plugin.channels().attach_currency(bank.clone()).await;
    plugin.channels().attach_points(scoreboard.clone()).await;
    plugin.on_init().await;

    run_script(&plugin, args.barrels).await?;

    plugin.on_shutdown().await;

    info!("final balances:");
    for (actor, balance) in bank.balances() {
        info!("  actor {actor}: ${balance}");
    }
    info!("rewards paid this session: {}", plugin.rewards_paid());

    Ok(())
}
