//! Configuration for the statistical classifier backend

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Classifier configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Which backend answers `classify`
    #[serde(default)]
    pub backend: ClassifierBackend,
}

/// Classifier backend specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClassifierBackend {
    /// Serialized artifact set, searched in `search_paths` order
    Artifacts {
        #[serde(default = "default_search_paths")]
        search_paths: Vec<PathBuf>,
    },

    /// Built-in keyword table
    Keyword,
}

impl Default for ClassifierBackend {
    fn default() -> Self {
        Self::Artifacts {
            search_paths: default_search_paths(),
        }
    }
}

impl ClassifierConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }
}

fn default_search_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("."),
        PathBuf::from(".."),
        PathBuf::from("legal_model"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_artifacts() {
        let config = ClassifierConfig::default();
        match config.backend {
            ClassifierBackend::Artifacts { search_paths } => assert_eq!(search_paths.len(), 3),
            _ => panic!("Wrong backend"),
        }
    }

    #[test]
    fn test_keyword_backend_yaml() {
        let yaml = r#"
backend:
  type: keyword
"#;
        let config = ClassifierConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.backend, ClassifierBackend::Keyword);
    }

    #[test]
    fn test_artifact_paths_yaml() {
        let yaml = r#"
backend:
  type: artifacts
  search_paths:
    - /srv/models/ipc
"#;
        let config = ClassifierConfig::from_yaml(yaml).unwrap();
        assert_eq!(
            config.backend,
            ClassifierBackend::Artifacts {
                search_paths: vec![PathBuf::from("/srv/models/ipc")]
            }
        );
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = ClassifierConfig::from_yaml("{}").unwrap();
        assert!(matches!(config.backend, ClassifierBackend::Artifacts { .. }));
    }
}
