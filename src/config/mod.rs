use std::env;

/// Config holds all generator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub output_dir: String,
    pub file_prefix: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            output_dir: get_env("CCG_OUTPUT_DIR", "."),
            file_prefix: get_env("CCG_FILE_PREFIX", "ccg-"),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
