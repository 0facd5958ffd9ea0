//! CLI command implementations

pub mod migrate;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use encore_core::EngineConfig;

/// Load the engine config from a TOML file, or fall back to defaults
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_config_path_uses_defaults() {
        let config = load_engine_config(None).unwrap();
        assert_eq!(config.plays_per_bonus_unit, 4);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("encore.toml");
        std::fs::write(&path, "tracked_media = [\"track-1\"]\n").unwrap();

        let config = load_engine_config(Some(&path)).unwrap();
        assert_eq!(config.tracked_media, vec!["track-1".to_string()]);
    }

    #[test]
    fn test_missing_config_file_errors() {
        let result = load_engine_config(Some(Path::new("/nonexistent/encore.toml")));
        assert!(result.is_err());
    }
}
