//! Game configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `ECO_SORTER_SEED` | random | Item supplier seed |
//! | `ECO_SORTER_USER` | `local` | High-score owner |
//! | `ECO_SORTER_SCORES_PATH` | unset | JSON high-score file (in-memory when unset) |
//! | `ECO_SORTER_SCORE_CAP` | `0` | `1`/`true`: reaching 100 wins |
//! | `ECO_SORTER_STARS` | `standard` | `standard` (90/70/50) or `strict` (100/75/50) |
//! | `ECO_SORTER_BONUS_MESSAGE` | `replace` | `replace` or `append` |
//! | `ECO_SORTER_MAX_PENDING` | `32` | Command queue capacity |
//! | `ECO_SORTER_LOG_PATH` | unset | Log file (no logging when unset) |
//! | `ECO_SORTER_LOG` | `info` | Log filter directive |
//!
//! Values that fail to parse fall back to their defaults.

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::{BonusMessage, RulePolicy, StarThresholds};
use crate::store::{HighScoreStore, JsonFileStore, MemoryStore};

pub const DEFAULT_USER: &str = "local";
pub const DEFAULT_MAX_PENDING: usize = 32;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// `None` picks a fresh seed per run.
    pub seed: Option<u32>,
    pub user_id: String,
    pub scores_path: Option<PathBuf>,
    pub policy: RulePolicy,
    pub max_pending_commands: usize,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            user_id: DEFAULT_USER.to_string(),
            scores_path: None,
            policy: RulePolicy::CANONICAL,
            max_pending_commands: DEFAULT_MAX_PENDING,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (used by tests instead of the process env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let defaults = Self::default();

        let seed = get("ECO_SORTER_SEED").and_then(|s| s.parse().ok());
        let user_id = get("ECO_SORTER_USER").unwrap_or(defaults.user_id);
        let scores_path = get("ECO_SORTER_SCORES_PATH").map(PathBuf::from);

        let score_cap_ends_game = get("ECO_SORTER_SCORE_CAP")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let star_thresholds = match get("ECO_SORTER_STARS").map(|s| s.to_lowercase()) {
            Some(s) if s == "strict" => StarThresholds::STRICT,
            _ => StarThresholds::STANDARD,
        };
        let bonus_message = match get("ECO_SORTER_BONUS_MESSAGE").map(|s| s.to_lowercase()) {
            Some(s) if s == "append" => BonusMessage::Append,
            _ => BonusMessage::Replace,
        };

        let max_pending_commands = get("ECO_SORTER_MAX_PENDING")
            .and_then(|s| s.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.max_pending_commands);

        let log_path = get("ECO_SORTER_LOG_PATH").map(PathBuf::from);
        let log_filter = get("ECO_SORTER_LOG").unwrap_or(defaults.log_filter);

        Self {
            seed,
            user_id,
            scores_path,
            policy: RulePolicy {
                score_cap_ends_game,
                star_thresholds,
                bonus_message,
            },
            max_pending_commands,
            log_path,
            log_filter,
        }
    }

    /// Configured seed, or a fresh random one.
    pub fn seed_or_random(&self) -> u32 {
        self.seed.unwrap_or_else(|| fastrand::u32(..))
    }

    /// High-score store for this configuration.
    pub fn build_store(&self) -> Arc<dyn HighScoreStore> {
        match &self.scores_path {
            Some(path) => Arc::new(JsonFileStore::new(path.clone())),
            None => Arc::new(MemoryStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> GameConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.policy, RulePolicy::CANONICAL);
        assert!(cfg.seed.is_none());
        assert_eq!(cfg.user_id, "local");
    }

    #[test]
    fn test_reads_all_variables() {
        let cfg = config(&[
            ("ECO_SORTER_SEED", "42"),
            ("ECO_SORTER_USER", "ana"),
            ("ECO_SORTER_SCORES_PATH", "/tmp/scores.json"),
            ("ECO_SORTER_SCORE_CAP", "true"),
            ("ECO_SORTER_STARS", "Strict"),
            ("ECO_SORTER_BONUS_MESSAGE", "append"),
            ("ECO_SORTER_MAX_PENDING", "8"),
            ("ECO_SORTER_LOG_PATH", "/tmp/eco.log"),
            ("ECO_SORTER_LOG", "debug"),
        ]);

        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.user_id, "ana");
        assert_eq!(cfg.scores_path, Some(PathBuf::from("/tmp/scores.json")));
        assert!(cfg.policy.score_cap_ends_game);
        assert_eq!(cfg.policy.star_thresholds, StarThresholds::STRICT);
        assert_eq!(cfg.policy.bonus_message, BonusMessage::Append);
        assert_eq!(cfg.max_pending_commands, 8);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/eco.log")));
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn test_bad_values_fall_back() {
        let cfg = config(&[
            ("ECO_SORTER_SEED", "not-a-number"),
            ("ECO_SORTER_USER", "   "),
            ("ECO_SORTER_SCORE_CAP", "yes please"),
            ("ECO_SORTER_STARS", "generous"),
            ("ECO_SORTER_MAX_PENDING", "0"),
        ]);

        assert!(cfg.seed.is_none());
        assert_eq!(cfg.user_id, "local");
        assert!(!cfg.policy.score_cap_ends_game);
        assert_eq!(cfg.policy.star_thresholds, StarThresholds::STANDARD);
        assert_eq!(cfg.max_pending_commands, DEFAULT_MAX_PENDING);
    }

    #[test]
    fn test_seed_or_random_prefers_configured() {
        let cfg = config(&[("ECO_SORTER_SEED", "7")]);
        assert_eq!(cfg.seed_or_random(), 7);
    }
}
