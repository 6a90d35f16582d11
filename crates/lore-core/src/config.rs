//! Configuration for relation display, search, and caching.
//!
//! Load order: `.lore/config.toml` → environment variables → defaults.

use crate::model::Locale;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoreConfig {
    pub display: DisplayConfig,
    pub search: SearchConfig,
    pub cache: CacheConfig,
}

/// Relation panel display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Groups with more entries than this are dense (carousel layout).
    pub dense_threshold: usize,
    /// Locale used when none is requested.
    pub default_locale: Locale,
}

/// Name search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of search results returned.
    pub result_limit: usize,
    /// Minimum normalized Levenshtein similarity for a fuzzy token match.
    pub min_similarity: f64,
}

/// Memoization cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached entries before the oldest is evicted.
    pub capacity: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            dense_threshold: 3,
            default_locale: Locale::En,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: 10,
            min_similarity: 0.6,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var) {
        match v.parse() {
            Ok(n) => *target = n,
            Err(_) => tracing::warn!("ignoring unparseable {}={:?}", var, v),
        }
    }
}

impl LoreConfig {
    /// Load config from `.lore/config.toml` under the content root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(".lore").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("LORE_DENSE_THRESHOLD", &mut config.display.dense_threshold);
        env_override("LORE_DEFAULT_LOCALE", &mut config.display.default_locale);
        env_override("LORE_SEARCH_LIMIT", &mut config.search.result_limit);
        env_override(
            "LORE_SEARCH_MIN_SIMILARITY",
            &mut config.search.min_similarity,
        );
        env_override("LORE_CACHE_CAPACITY", &mut config.cache.capacity);

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.search.min_similarity) {
            anyhow::bail!(
                "search.min_similarity ({}) must be within 0.0..=1.0",
                self.search.min_similarity
            );
        }
        if self.cache.capacity == 0 {
            anyhow::bail!("cache.capacity must be at least 1");
        }
        if self.search.result_limit == 0 {
            anyhow::bail!("search.result_limit must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoreConfig::default();
        assert_eq!(config.display.dense_threshold, 3);
        assert_eq!(config.display.default_locale, Locale::En);
        assert_eq!(config.search.result_limit, 10);
        assert_eq!(config.search.min_similarity, 0.6);
        assert_eq!(config.cache.capacity, 64);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[display]
dense_threshold = 5
default_locale = "pl"

[search]
result_limit = 20
"#;
        let config: LoreConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.dense_threshold, 5);
        assert_eq!(config.display.default_locale, Locale::Pl);
        assert_eq!(config.search.result_limit, 20);
        // Defaults for unspecified fields
        assert_eq!(config.search.min_similarity, 0.6);
        assert_eq!(config.cache.capacity, 64);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = LoreConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert_eq!(config.search.result_limit, 10);
    }

    #[test]
    fn test_load_rejects_out_of_range_similarity() {
        let tmp = tempfile::tempdir().unwrap();
        let lore_dir = tmp.path().join(".lore");
        std::fs::create_dir_all(&lore_dir).unwrap();
        std::fs::write(
            lore_dir.join("config.toml"),
            "[search]\nmin_similarity = 1.5\n",
        )
        .unwrap();

        let err = LoreConfig::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("min_similarity"));
    }

    #[test]
    fn test_load_reads_file_from_lore_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let lore_dir = tmp.path().join(".lore");
        std::fs::create_dir_all(&lore_dir).unwrap();
        std::fs::write(lore_dir.join("config.toml"), "[cache]\ncapacity = 8\n").unwrap();

        let config = LoreConfig::load(tmp.path()).unwrap();
        assert_eq!(config.cache.capacity, 8);
    }
}
