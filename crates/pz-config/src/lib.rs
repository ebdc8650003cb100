mod config;
mod error;
mod startup_config;

pub use config::LauncherConfig;
pub use error::{ConfigError, ConfigErrorKind, ConfigErrorResult};
pub use startup_config::StartupConfig;

#[cfg(test)]
mod tests;

pub const CONFIG_FILENAME: &str = "config.json";
pub const CONFIG_DIR_ENV: &str = "PDF2ZH_DESKTOP_CONFIG_DIR";
/// Per-user directory name under the platform data dir. Must match the Tauri
/// `identifier` so config and logs share one directory.
pub const APP_DIR_NAME: &str = "com.pdf2zh.desktop";

pub const FIELD_GRADIO_PORT: &str = "gradio_port";
pub const FIELD_PDF2ZH_PATH: &str = "pdf2zh_path";
