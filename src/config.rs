//! Configuration file handling.
//!
//! A configuration file is optional. Without one the built-in emission factors are used. With one,
//! the factors it holds replace the built-in ones for the whole run.

use crate::model::EmissionFactors;
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "footprint";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app: where it was loaded from, if
/// anywhere, and the emission factors in effect.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    path: Option<PathBuf>,
    config_file: ConfigFile,
}

impl Config {
    /// Writes a configuration file holding the built-in factors to `path`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    /// - Returns an error if `path` already exists.
    /// - Returns an error if any file operations fail.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            bail!(
                "Refusing to overwrite the existing config file '{}'",
                path.display()
            )
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            utils::make_dir(parent)
                .await
                .context("Unable to create the config directory")?;
        }
        let config_file = ConfigFile::default();
        config_file.save(&path).await?;
        Ok(Self {
            path: Some(path),
            config_file,
        })
    }

    /// Loads the configuration file at `path`, or returns the built-in configuration when `path`
    /// is `None`.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("No config file given, using built-in emission factors");
            return Ok(Self::default());
        };
        if !path.is_file() {
            bail!("The config file is missing '{}'", path.display())
        }
        let config_file = ConfigFile::load(path).await?;
        debug!("Loaded config file {}", path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            config_file,
        })
    }

    /// Where the configuration was loaded from, `None` for the built-in configuration.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn factors(&self) -> &EmissionFactors {
        &self.config_file.factors
    }
}

/// The default location that `footprint init` writes to, e.g. `~/.config/footprint/config.json`.
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(APP_NAME).join(CONFIG_JSON),
        None => PathBuf::from(CONFIG_JSON),
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "footprint",
///   "config_version": 1,
///   "factors": {
///     "transport": { "car": 0.2511, "bus": 0.0553, "plane": 0.1585, "train": 0.0255 },
///     "food": { "meat-heavy": 3.5, "low-meat": 2.0, "vegetarian": 1.5, "vegan": 1.0 },
///     "energy": { "lights": 0.06, "appliances": 0.5, "heating": 2.0 },
///     "electricity_kg_per_kwh": 0.417,
///     "average_daily_kg": 21.0
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "footprint"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The emission factors. The built-in factors are used when this is absent.
    #[serde(default)]
    factors: EmissionFactors,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            factors: EmissionFactors::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, names another app, or holds an
    /// unusable factor.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version {} in config file, expected {}",
            config.config_version,
            CONFIG_VERSION
        );
        config
            .factors
            .validate()
            .with_context(|| format!("Invalid factors in config file {}", path.display()))?;

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Kind, Meal};
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_load_none_uses_defaults() {
        let config = Config::load(None).await.unwrap();
        assert!(config.path().is_none());
        assert_eq!(config.factors(), &EmissionFactors::default());
    }

    #[tokio::test]
    async fn test_create_then_load() {
        let env = TestEnv::new();
        let path = env.path("nested/dir/config.json");
        let created = Config::create(&path).await.unwrap();
        assert!(path.is_file());
        let loaded = Config::load(Some(path.as_path())).await.unwrap();
        assert_eq!(created, loaded);
        assert_eq!(loaded.path(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_create_refuses_to_overwrite() {
        let env = TestEnv::new();
        let path = env.write("config.json", "{}");
        let err = Config::create(&path).await.unwrap_err();
        assert!(err.to_string().contains("Refusing to overwrite"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let env = TestEnv::new();
        let path = env.path("nope.json");
        let err = Config::load(Some(path.as_path())).await.unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn test_load_minimal_config() {
        let env = TestEnv::new();
        let path = env.write(
            "config.json",
            r#"{ "app_name": "footprint", "config_version": 1 }"#,
        );
        let config = Config::load(Some(path.as_path())).await.unwrap();
        assert_eq!(config.factors(), &EmissionFactors::default());
    }

    #[tokio::test]
    async fn test_load_custom_factors() {
        let env = TestEnv::new();
        let mut factors = EmissionFactors::default();
        factors.food.vegan = 0.8;
        factors.average_daily_kg = 15.0;
        let file = ConfigFile {
            factors,
            ..ConfigFile::default()
        };
        let path = env.path("config.json");
        file.save(&path).await.unwrap();

        let config = Config::load(Some(path.as_path())).await.unwrap();
        assert_eq!(config.factors().factor(Kind::Food(Meal::Vegan)), 0.8);
        assert_eq!(config.factors().average_daily_kg, 15.0);
    }

    #[tokio::test]
    async fn test_load_invalid_app_name() {
        let env = TestEnv::new();
        let path = env.write(
            "config.json",
            r#"{ "app_name": "carbon", "config_version": 1 }"#,
        );
        let err = Config::load(Some(path.as_path())).await.unwrap_err();
        assert!(err.to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_load_negative_factor() {
        let env = TestEnv::new();
        let mut file = ConfigFile::default();
        file.factors.energy.heating = -2.0;
        let path = env.path("config.json");
        file.save(&path).await.unwrap();
        let err = Config::load(Some(path.as_path())).await.unwrap_err();
        assert!(format!("{err:#}").contains("'heating'"));
    }

    #[tokio::test]
    async fn test_load_incomplete_table() {
        let env = TestEnv::new();
        let path = env.write(
            "config.json",
            r#"{
                "app_name": "footprint",
                "config_version": 1,
                "factors": {
                    "transport": { "car": 0.25 },
                    "food": { "meat-heavy": 3.5, "low-meat": 2.0, "vegetarian": 1.5, "vegan": 1.0 },
                    "energy": { "lights": 0.06, "appliances": 0.5, "heating": 2.0 },
                    "electricity_kg_per_kwh": 0.417,
                    "average_daily_kg": 21.0
                }
            }"#,
        );
        assert!(Config::load(Some(path.as_path())).await.is_err());
    }

    #[test]
    fn test_default_config_path_file_name() {
        assert!(default_config_path().ends_with("config.json"));
    }
}
