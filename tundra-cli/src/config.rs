//! Application configuration, loaded through confy

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Directory holding the task snapshot and its backup
    pub data_directory: String,
    /// Snapshot filename inside the data directory
    pub tasks_filename: String,
    /// Base URL of the remote task API used by `tundra sync`
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_directory = dirs::data_dir()
            .map(|p| p.join("tundra"))
            .and_then(|p| p.to_str().map(String::from))
            .unwrap_or_else(|| String::from("."));

        Config {
            data_directory,
            tasks_filename: "tundra.json".to_string(),
            api_base_url: "http://localhost:8000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.tasks_filename, "tundra.json");
        assert!(!cfg.data_directory.is_empty());
        assert!(cfg.api_base_url.starts_with("http"));
    }
}
