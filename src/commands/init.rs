use crate::commands::Out;
use crate::config::default_config_path;
use crate::{Config, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes a configuration file holding the built-in emission factors.
///
/// # Arguments
/// - `path` - Where to write the file. Defaults to `footprint/config.json` in the user's
///   configuration directory.
///
/// # Errors
/// - Returns an error if a file already exists at the path.
/// - Returns an error if any file operations fail.
pub async fn init(path: Option<&Path>) -> Result<Out<PathBuf>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    debug!("Creating config file at {}", path.display());
    let _config = Config::create(&path)
        .await
        .context("Unable to create the config file")?;
    Ok(Out::new(
        format!(
            "Wrote the built-in emission factors to {}. Edit the file and pass it with --config \
            or FOOTPRINT_CONFIG to use your own factors.",
            path.display()
        ),
        path,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_init_writes_loadable_config() {
        let env = TestEnv::new();
        let path = env.path("footprint/config.json");
        let out = init(Some(path.as_path())).await.unwrap();
        assert_eq!(out.structure(), Some(&path));
        let config = Config::load(Some(path.as_path())).await.unwrap();
        assert_eq!(config.path(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let env = TestEnv::new();
        let path = env.path("config.json");
        let _ = init(Some(path.as_path())).await.unwrap();
        let err = init(Some(path.as_path())).await.unwrap_err();
        assert!(format!("{err:#}").contains("Refusing to overwrite"));
    }
}
