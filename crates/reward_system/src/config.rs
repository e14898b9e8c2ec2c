//! Configuration loading and validation.
//!
//! All tunables live in one flat TOML file. Loading a path that does not
//! exist writes the default configuration there first, so a fresh install
//! produces an editable file instead of failing. The file is reloadable at
//! runtime; reward progress survives a reload.

use crate::types::TierTable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

fn default_events_per_reward() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_destruction_kinds() -> Vec<String> {
    vec!["barrel".to_string()]
}

fn default_container_kinds() -> Vec<String> {
    vec!["supply_crate".to_string()]
}

fn default_tiers() -> TierTable {
    [("default".to_string(), 2.0), ("vip".to_string(), 5.0)]
        .into_iter()
        .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("failed to serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Reward accounting settings consumed by the plugin.
    pub rewards: RewardSettings,
    /// Logging settings consumed by the host binary.
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Demo-feed settings consumed by the host binary only.
    #[serde(default)]
    pub demo: DemoSettings,
}

/// Settings for the rewards plugin itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardSettings {
    /// Tier name -> reward value. The highest-value tier an actor holds is
    /// the one paid out.
    #[serde(default = "default_tiers")]
    pub tiers: TierTable,
    /// Number of qualifying destruction events per reward (1 = every event).
    #[serde(default = "default_events_per_reward")]
    pub events_per_reward: u32,
    /// Pay rewards for destroying qualifying objects.
    #[serde(default = "default_true")]
    pub reward_destruction: bool,
    /// Pay a one-shot reward for the first loot of qualifying containers.
    #[serde(default)]
    pub reward_first_loot: bool,
    /// Wipe an actor's destruction progress when they die.
    #[serde(default = "default_true")]
    pub reset_progress_on_death: bool,
    /// Send the actor a chat notice when a reward is paid.
    #[serde(default = "default_true")]
    pub notify_on_reward: bool,
    /// Pay through the currency channel when it is attached.
    #[serde(default = "default_true")]
    pub use_currency: bool,
    /// Pay through the points channel when it is attached.
    #[serde(default)]
    pub use_points: bool,
    /// Object kinds whose destruction counts toward the threshold.
    #[serde(default = "default_destruction_kinds")]
    pub destruction_kinds: Vec<String>,
    /// Container kinds whose first loot pays a one-shot reward.
    #[serde(default = "default_container_kinds")]
    pub container_kinds: Vec<String>,
}

/// Logging output settings (applied by the host binary, not the plugin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit logs as JSON instead of human-readable lines.
    #[serde(default)]
    pub json_format: bool,
}

/// Settings for the demo host's scripted feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoSettings {
    /// Actor ids the demo permission authority treats as vip.
    #[serde(default)]
    pub vip_actors: Vec<u64>,
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            events_per_reward: default_events_per_reward(),
            reward_destruction: true,
            reward_first_loot: false,
            reset_progress_on_death: true,
            notify_on_reward: true,
            use_currency: true,
            use_points: false,
            destruction_kinds: default_destruction_kinds(),
            container_kinds: default_container_kinds(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            rewards: RewardSettings::default(),
            logging: LoggingSettings::default(),
            demo: DemoSettings::default(),
        }
    }
}

impl RewardConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file does not exist, writes the default configuration there
    /// and returns it, so operators always have a file to edit.
    pub async fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content =
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ConfigError::Read {
                        path: path.display().to_string(),
                        source,
                    })?;
            let config: RewardConfig =
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.display().to_string(),
                    source,
                })?;
            Ok(config)
        } else {
            let default_config = RewardConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content)
                .await
                .map_err(|source| ConfigError::Write {
                    path: path.display().to_string(),
                    source,
                })?;
            info!("created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Validates the configuration for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rewards = &self.rewards;

        if rewards.events_per_reward < 1 {
            return Err(ConfigError::Invalid(
                "events_per_reward must be at least 1".to_string(),
            ));
        }

        for (name, value) in rewards.tiers.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "tier '{name}' has invalid reward value {value}"
                )));
            }
        }

        let any_trigger = rewards.reward_destruction || rewards.reward_first_loot;
        if any_trigger && rewards.tiers.is_empty() {
            return Err(ConfigError::Invalid(
                "a reward trigger is enabled but the tier table is empty".to_string(),
            ));
        }

        if rewards.reward_destruction && rewards.destruction_kinds.is_empty() {
            return Err(ConfigError::Invalid(
                "reward_destruction is enabled but destruction_kinds is empty".to_string(),
            ));
        }

        if rewards.reward_first_loot && rewards.container_kinds.is_empty() {
            return Err(ConfigError::Invalid(
                "reward_first_loot is enabled but container_kinds is empty".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "invalid log level: {}. Must be one of: {valid_levels:?}",
                self.logging.level
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        let config = RewardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rewards.events_per_reward, 1);
        assert_eq!(config.rewards.tiers.value_of("default"), Some(2.0));
        assert_eq!(config.rewards.tiers.value_of("vip"), Some(5.0));
        assert!(config.rewards.use_currency);
        assert!(!config.rewards.use_points);
        assert!(config.rewards.reset_progress_on_death);
    }

    #[test]
    fn validation_rejects_zero_threshold() {
        let mut config = RewardConfig::default();
        config.rewards.events_per_reward = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("events_per_reward"));
    }

    #[test]
    fn validation_rejects_negative_tier_value() {
        let mut config = RewardConfig::default();
        config.rewards.tiers.insert("broken", -1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_non_finite_tier_value() {
        let mut config = RewardConfig::default();
        config.rewards.tiers.insert("broken", f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_empty_tiers_with_trigger_on() {
        let mut config = RewardConfig::default();
        config.rewards.tiers = TierTable::new();
        assert!(config.validate().is_err());

        // With every trigger off an empty table is fine.
        config.rewards.reward_destruction = false;
        config.rewards.reward_first_loot = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_empty_kind_lists_for_enabled_triggers() {
        let mut config = RewardConfig::default();
        config.rewards.destruction_kinds.clear();
        assert!(config.validate().is_err());

        let mut config = RewardConfig::default();
        config.rewards.reward_first_loot = true;
        config.rewards.container_kinds.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_unknown_log_level() {
        let mut config = RewardConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_a_full_file_with_serde_defaults() {
        let toml_content = r#"
[rewards]
events_per_reward = 3
reward_first_loot = true
use_points = true
destruction_kinds = ["barrel", "roadsign"]
container_kinds = ["supply_crate", "airdrop"]

[rewards.tiers]
default = 1.5
vip = 4.0
elite = 9.0

[logging]
level = "debug"
"#;

        let config: RewardConfig = toml::from_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.rewards.events_per_reward, 3);
        assert!(config.rewards.reward_first_loot);
        assert!(config.rewards.use_points);
        assert_eq!(config.rewards.tiers.len(), 3);
        assert_eq!(config.rewards.tiers.value_of("elite"), Some(9.0));
        // Missing fields fall back to defaults.
        assert!(config.rewards.reward_destruction);
        assert!(config.rewards.notify_on_reward);
        assert!(config.demo.vip_actors.is_empty());
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.json_format);
    }

    #[tokio::test]
    async fn load_from_missing_path_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("rewards.toml");

        let config = RewardConfig::load_from_file(&path).await.unwrap();
        assert!(config.validate().is_ok());
        assert!(path.exists());

        // The written file must parse back to the same settings.
        let reloaded = RewardConfig::load_from_file(&path).await.unwrap();
        assert_eq!(
            reloaded.rewards.events_per_reward,
            config.rewards.events_per_reward
        );
        assert_eq!(reloaded.rewards.tiers, config.rewards.tiers);
    }

    #[tokio::test]
    async fn load_from_existing_file_reads_it() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("rewards.toml");
        tokio::fs::write(
            &path,
            r#"
[rewards]
events_per_reward = 5

[demo]
vip_actors = [7, 11]
"#,
        )
        .await
        .unwrap();

        let config = RewardConfig::load_from_file(&path).await.unwrap();
        assert_eq!(config.rewards.events_per_reward, 5);
        assert_eq!(config.demo.vip_actors, vec![7, 11]);
    }

    #[tokio::test]
    async fn load_reports_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("rewards.toml");
        tokio::fs::write(&path, "rewards = 'not a table'").await.unwrap();

        let err = RewardConfig::load_from_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
