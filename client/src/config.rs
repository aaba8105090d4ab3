use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const SESSION_FILE_NAME: &str = "session.json";

/// Where the store lives and where the signed-in session is kept
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Read configuration from the process environment
    pub fn load() -> Self {
        Self::load_with(|key| std::env::var(key).ok(), dirs::config_dir())
    }

    /// Build configuration from an explicit environment lookup and base directory
    pub fn load_with<F>(env: F, config_dir: Option<PathBuf>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = env("ASSETS_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_file = match env("ASSETS_SESSION_FILE") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => config_dir
                .unwrap_or_else(|| PathBuf::from("."))
                .join("assets-manager")
                .join(SESSION_FILE_NAME),
        };

        Self {
            api_base_url,
            session_file,
        }
    }
}
