use serde::Serialize;

/// Startup snapshot for the splash window.
#[derive(Debug, Clone, Serialize)]
pub struct StartupStatus {
    pub state: String,
    pub attempt: Option<u32>,
    pub max_attempts: Option<u32>,
    pub url: Option<String>,
    pub error: Option<String>,
}
