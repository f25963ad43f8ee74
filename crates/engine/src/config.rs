use std::env;

use crate::backend::ollama::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    pub backend_url: String,
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: BIND_ADDR.to_string(),
            backend_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Reads `.env` (if present) and the process environment.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: defaults.bind_addr,
            backend_url: non_empty("RELAY_BACKEND_URL").unwrap_or(defaults.backend_url),
            model: non_empty("RELAY_MODEL").unwrap_or(defaults.model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert_eq!(config.model, "qwen3:0.6b");
    }

    #[test]
    fn environment_overrides_backend_and_model() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RELAY_BACKEND_URL", "http://gpu-box:11434"),
            ("RELAY_MODEL", "qwen3:8b"),
            ("RELAY_BIND", "127.0.0.1:9"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.backend_url, "http://gpu-box:11434");
        assert_eq!(config.model, "qwen3:8b");
        assert_eq!(config.bind_addr, BIND_ADDR);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }
}
