//! Analyzer configuration.
//!
//! The vocabulary and phrase tables are configuration data, not hardcoded
//! logic: `AnalyzerConfig::default()` carries the built-in tables, and a
//! YAML file can replace them wholesale.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Minimum similarity for a raw spec key to be rewritten to a
    /// vocabulary term.
    pub key_match_threshold: u32,
    /// Minimum partial similarity for the fuzzy red-flag token strategy.
    pub fuzzy_token_threshold: u32,
    /// Known spec keys, in tie-break priority order.
    pub known_spec_keys: Vec<String>,
    /// Phrases associated with counterfeit or misrepresented listings.
    pub red_flag_phrases: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            key_match_threshold: 80,
            fuzzy_token_threshold: 85,
            known_spec_keys: [
                "storage",
                "camera",
                "brand",
                "price",
                "battery",
                "bluetooth",
                "color",
                "size",
                "power",
                "port",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            red_flag_phrases: [
                "replica",
                "copy",
                "fake",
                "authentic?",
                "genuine?",
                "looks like",
                "not original",
                "1st copy",
                "first copy",
                "dupe",
                "knockoff",
                "mirror of",
                "inspired by",
                "just like original",
                "top copy",
                "same as original",
                "clone version",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl AnalyzerConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AnalyzerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the built-in defaults to a YAML file.
    pub fn generate_default(path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(&AnalyzerConfig::default())
            .context("failed to serialize default config")?;
        fs::write(path, yaml)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_match_threshold > 100 {
            bail!(
                "key_match_threshold must be in [0, 100], got {}",
                self.key_match_threshold
            );
        }
        if self.fuzzy_token_threshold > 100 {
            bail!(
                "fuzzy_token_threshold must be in [0, 100], got {}",
                self.fuzzy_token_threshold
            );
        }
        if self.known_spec_keys.is_empty() {
            bail!("known_spec_keys must not be empty");
        }
        if self.red_flag_phrases.is_empty() {
            bail!("red_flag_phrases must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AnalyzerConfig::default().validate().is_ok());
    }

    #[test]
    fn default_tables_contain_expected_entries() {
        let config = AnalyzerConfig::default();
        assert!(config.known_spec_keys.contains(&"storage".to_string()));
        assert!(config.known_spec_keys.contains(&"port".to_string()));
        assert!(config.red_flag_phrases.contains(&"fake".to_string()));
        assert!(config.red_flag_phrases.contains(&"clone version".to_string()));
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = AnalyzerConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AnalyzerConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.key_match_threshold, config.key_match_threshold);
        assert_eq!(parsed.known_spec_keys, config.known_spec_keys);
        assert_eq!(parsed.red_flag_phrases, config.red_flag_phrases);
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let parsed: AnalyzerConfig = serde_yaml::from_str("key_match_threshold: 90\n").unwrap();
        assert_eq!(parsed.key_match_threshold, 90);
        assert_eq!(
            parsed.red_flag_phrases,
            AnalyzerConfig::default().red_flag_phrases
        );
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let config = AnalyzerConfig {
            key_match_threshold: 101,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_phrase_table_is_rejected() {
        let config = AnalyzerConfig {
            red_flag_phrases: Vec::new(),
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn generate_and_reload_default_config() {
        let path = std::env::temp_dir().join("listing-verifier-config-test.yaml");
        AnalyzerConfig::generate_default(&path).unwrap();
        let loaded = AnalyzerConfig::load_from_file(&path).unwrap();
        assert_eq!(
            loaded.known_spec_keys,
            AnalyzerConfig::default().known_spec_keys
        );
        let _ = fs::remove_file(&path);
    }
}
