mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/talent-score/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("talent-score")
}

/// Get the default config file path (~/.config/talent-score/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to the built-in tables when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => {
            let default_path = get_config_path();
            if default_path.exists() {
                read_config(&default_path)
            } else {
                tracing::debug!(
                    path = %default_path.display(),
                    "no config file, using built-in scoring tables"
                );
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        custom_tables = config.scoring.is_some(),
        "loaded config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_missing_explicit_path_errors() {
        let path = env::temp_dir().join("talent_score_test_missing.yaml");
        let _ = fs::remove_file(&path);

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_top_only() {
        let path = env::temp_dir().join("talent_score_test_top.yaml");
        fs::write(&path, "top: 3\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.top, Some(3));
        assert!(config.scoring.is_none());
        assert_eq!(config.effective_tables(), crate::scoring::ScoringTables::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_scoring_tables() {
        let path = env::temp_dir().join("talent_score_test_tables.yaml");
        let config = Config {
            scoring: Some(crate::scoring::ScoringTables::default()),
            top: None,
        };
        fs::write(&path, serde_saphyr::to_string(&config).unwrap()).unwrap();

        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded.scoring, config.scoring);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_yaml_errors() {
        let path = env::temp_dir().join("talent_score_test_invalid.yaml");
        fs::write(&path, "scoring: [unclosed\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_key_errors() {
        let path = env::temp_dir().join("talent_score_test_unknown.yaml");
        fs::write(&path, "queries: []\n").unwrap();

        assert!(load_config(Some(path.clone())).is_err());

        let _ = fs::remove_file(&path);
    }
}
