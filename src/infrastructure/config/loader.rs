use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;

use crate::domain::models::config::S2MatchConfig;

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (`Serialized`)
    /// 2. `s2match.yaml` in the working directory, if present
    /// 3. Environment variables (`S2MATCH_` prefix, highest priority)
    pub fn load() -> Result<S2MatchConfig> {
        let config: S2MatchConfig = Figment::new()
            .merge(Serialized::defaults(S2MatchConfig::default()))
            .merge(Yaml::file("s2match.yaml"))
            .merge(Env::prefixed("S2MATCH_").split("__"))
            .extract()
            .context("failed to extract configuration from figment")?;

        config.validate().context("configuration failed validation")?;
        Ok(config)
    }

    /// Load configuration from a specific YAML file, still layered over the
    /// programmatic defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<S2MatchConfig> {
        let config: S2MatchConfig = Figment::new()
            .merge(Serialized::defaults(S2MatchConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("failed to load config from {}", path.as_ref().display()))?;

        config.validate().context("configuration failed validation")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_cleanly() {
        let config = S2MatchConfig::default();
        assert_eq!(config.restarts, 4);
        assert!((config.cutoff - 0.5).abs() < f64::EPSILON);
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn load_from_file_merges_over_defaults() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "restarts: 10\ncutoff: 0.3").unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.restarts, 10);
        assert!((config.cutoff - 0.3).abs() < f64::EPSILON);
        // untouched field keeps its default
        assert!((config.diffsense - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn load_from_file_rejects_out_of_range_cutoff() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cutoff: 1.5").unwrap();
        file.flush().unwrap();

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }
}
