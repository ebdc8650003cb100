use crate::{
    APP_DIR_NAME, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    FIELD_GRADIO_PORT, FIELD_PDF2ZH_PATH, StartupConfig,
};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

const MIN_PORT: u64 = 1;
const MAX_PORT: u64 = u16::MAX as u64;

/// Settings the launcher needs before it can start the translation server.
///
/// There are no fallbacks for the two required values: starting the server
/// on a guessed port or from a guessed path is refused outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub gradio_port: u16,
    pub pdf2zh_path: PathBuf,
    pub startup: StartupConfig,
}

/// On-disk shape. Every field is optional here so that absence can be
/// reported by name instead of as a generic serde error.
#[derive(Debug, Deserialize)]
struct RawConfig {
    gradio_port: Option<u64>,
    pdf2zh_path: Option<String>,
    #[serde(default)]
    startup: Option<StartupConfig>,
}

impl LauncherConfig {
    /// Load from the per-user data directory.
    pub fn load() -> ConfigErrorResult<Self> {
        let dir = Self::config_dir()?;
        Self::load_from(&dir)
    }

    /// Load `config.json` from an explicit directory.
    pub fn load_from(dir: &Path) -> ConfigErrorResult<Self> {
        let path = dir.join(CONFIG_FILENAME);
        debug!("Loading launcher config from {}", path.display());

        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::missing_file(path.clone()),
            _ => ConfigError::unreadable(path.clone(), e),
        })?;

        let config = Self::parse(&path, &content)?;
        info!(
            "Loaded launcher config: port={}, pdf2zh={}",
            config.gradio_port,
            config.pdf2zh_path.display()
        );
        Ok(config)
    }

    /// Directory holding `config.json`.
    ///
    /// `PDF2ZH_DESKTOP_CONFIG_DIR` wins over the platform data directory.
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir));
        }

        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .ok_or_else(ConfigError::no_data_dir)
    }

    /// Full path of the config file that `load()` reads.
    pub fn config_path() -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    fn parse(path: &Path, content: &str) -> ConfigErrorResult<Self> {
        let raw: RawConfig = serde_json::from_str(content)
            .map_err(|e| ConfigError::malformed(path.to_path_buf(), e.to_string()))?;

        let port = raw
            .gradio_port
            .ok_or_else(|| ConfigError::missing_field(FIELD_GRADIO_PORT))?;
        if !(MIN_PORT..=MAX_PORT).contains(&port) {
            return Err(ConfigError::malformed(
                path.to_path_buf(),
                format!("{FIELD_GRADIO_PORT} must be {MIN_PORT}-{MAX_PORT}, got {port}"),
            ));
        }

        let pdf2zh_path = raw
            .pdf2zh_path
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ConfigError::missing_field(FIELD_PDF2ZH_PATH))?;

        let startup = raw.startup.unwrap_or_default();
        if let Some(reason) = startup.invalid_reason() {
            return Err(ConfigError::malformed(path.to_path_buf(), reason));
        }

        Ok(Self {
            gradio_port: port as u16,
            pdf2zh_path: PathBuf::from(pdf2zh_path),
            startup,
        })
    }
}
