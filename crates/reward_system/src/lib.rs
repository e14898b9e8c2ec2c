//! # Reward System
//!
//! Core accounting library for permission-tiered reward plugins. A hosting
//! game server delivers game events (entity destroyed, container first
//! opened, object despawned, actor died) to a plugin built on this crate;
//! this crate owns the bookkeeping those events mutate.
//!
//! ## Key Pieces
//!
//! - [`resolve_tier`] - pure selection of the highest-value permission tier
//!   an actor qualifies for
//! - [`ProgressLedger`] - per-actor counter that fires exactly once every N
//!   qualifying events, with a manual reset hook
//! - [`OneShotLedger`] - once-per-object idempotence set with an explicit
//!   forget lifecycle so it does not leak
//! - [`ChannelRegistry`] - two independently optional reward channels
//!   (currency deposits and points), hot-swappable at runtime
//! - [`RewardConfig`] - TOML configuration with validation and sensible
//!   defaults
//!
//! ## Concurrency Model
//!
//! The host is expected to deliver events for a given actor serially, the
//! way callback-driven plugin runtimes do. The ledgers nevertheless guard
//! each key individually, so a fired reward is computed atomically with the
//! counter wrap even if delivery overlaps.
//!
//! ## What This Crate Does Not Do
//!
//! It does not emulate the host's event bus, render UI, or persist anything.
//! All state lives in memory for the lifetime of the process.

pub mod authority;
pub mod channels;
pub mod config;
pub mod dedup;
pub mod error;
pub mod progress;
pub mod resolver;
pub mod types;

pub use authority::{held_tiers, PermissionAuthority};
pub use channels::{ChannelGrant, ChannelRegistry, CurrencyService, GrantOutcome, PointsService};
pub use config::{ConfigError, DemoSettings, LoggingSettings, RewardConfig, RewardSettings};
pub use dedup::OneShotLedger;
pub use error::RewardError;
pub use progress::ProgressLedger;
pub use resolver::resolve_tier;
pub use types::{ActorId, GrantSet, ObjectId, TierTable};
