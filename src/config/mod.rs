use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    core::{
        services::DEFAULT_COMPARISON_MONTHS,
        utils::{ensure_dir, write_atomic, PathResolver},
    },
    domain::TipMode,
    errors::Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tip_mode: TipMode,
    pub comparison_months: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<Decimal>,
    pub currency_symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_user: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tip_mode: TipMode::default(),
            comparison_months: DEFAULT_COMPARISON_MONTHS,
            monthly_budget: None,
            currency_symbol: "$".into(),
            last_user: None,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.comparison_months, 4);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            tip_mode: TipMode::Strict,
            comparison_months: 6,
            monthly_budget: Some(Decimal::new(1500, 0)),
            currency_symbol: "€".into(),
            last_user: Some("rosa".into()),
        };
        manager.save(&config).unwrap();
        assert!(manager.path().ends_with("config/config.json"));
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"tip_mode":"comfort"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.tip_mode, TipMode::Comfort);
        assert_eq!(config.comparison_months, 4);
    }
}
