//! Application configuration

use ipcsense_classifiers::ClassifierConfig;
use ipcsense_llm::LlmConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands};

/// Top-level configuration, read from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Statistical classifier backend
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Override rule table; the built-in IPC table when unset
    #[serde(default)]
    pub rules: Option<PathBuf>,

    /// Model server used by `ask` and the LLM endpoint
    #[serde(default)]
    pub llm: LlmConfig,

    /// HTTP API settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(rules) = &cli.rules {
            config.rules = Some(rules.clone());
        }

        if let Some(url) = &cli.llm_url {
            config.llm.base_url = url.clone();
        }

        if let Some(model) = &cli.model {
            config.llm.model = model.clone();
        }

        if let Commands::Serve { listen, port } = &cli.command {
            if let Some(listen) = listen {
                config.server.listen = listen.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }

        Ok(config)
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ipcsense_classifiers::ClassifierBackend;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let cli = Cli::parse_from(["ipcsense", "serve"]);
        let config = AppConfig::load("/nonexistent/ipcsense.yaml", &cli).unwrap();

        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.llm, LlmConfig::default());
        assert!(config.rules.is_none());
    }

    #[test]
    fn test_yaml_file_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
classifier:
  backend:
    type: keyword
rules: /etc/ipcsense/rules.yaml
llm:
  model: custom-model
server:
  port: 8080
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::parse_from([
            "ipcsense",
            "serve",
            "--listen",
            "0.0.0.0",
            "--llm-url",
            "http://gpu-box:11434",
        ]);
        let config = AppConfig::load(&path, &cli).unwrap();

        assert_eq!(config.classifier.backend, ClassifierBackend::Keyword);
        assert_eq!(config.rules, Some(PathBuf::from("/etc/ipcsense/rules.yaml")));
        assert_eq!(config.llm.model, "custom-model");
        assert_eq!(config.llm.base_url, "http://gpu-box:11434");
        assert_eq!(config.llm.timeout_secs, 120);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.listen, "0.0.0.0");
    }

    #[test]
    fn test_shipped_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/ipcsense.yaml");
        let cli = Cli::parse_from(["ipcsense", "analyze", "text"]);
        let config = AppConfig::load(path, &cli).unwrap();

        assert!(matches!(
            config.classifier.backend,
            ClassifierBackend::Artifacts { .. }
        ));
        assert_eq!(config.server, ServerConfig::default());
    }
}
