//! Runtime configuration, built from environment variables.

use std::path::PathBuf;

/// How many message ids to request per run when unconfigured.
const DEFAULT_MAX_RESULTS: u32 = 20;

/// Runtime configuration for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of messages to list per run.
    pub max_results: u32,
    /// Root of the category-keyed output tree.
    pub output_dir: PathBuf,
    /// OAuth client secrets file (Google "installed" format).
    pub credentials_path: PathBuf,
    /// Cached authorized-user token file.
    pub token_path: PathBuf,
}

impl Config {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let max_results = std::env::var("MAILSIFT_MAX_RESULTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_RESULTS);

        let output_dir = std::env::var("MAILSIFT_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("emails"));

        let credentials_path = std::env::var("MAILSIFT_CREDENTIALS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("credentials.json"));

        let token_path = std::env::var("MAILSIFT_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("token.json"));

        Self {
            max_results,
            output_dir,
            credentials_path,
            token_path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            output_dir: PathBuf::from("emails"),
            credentials_path: PathBuf::from("credentials.json"),
            token_path: PathBuf::from("token.json"),
        }
    }
}
