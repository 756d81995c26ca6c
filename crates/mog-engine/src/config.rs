use std::path::Path;

use serde::{Deserialize, Serialize};

use mog_gate::GateConfig;

use crate::error::{EngineError, EngineResult};

/// Default-scope behaviour of tree queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Descriptor used when a query names no scope, e.g. `Gen.1.1-3`.
    pub default_scope: Option<String>,
    /// Number of leading containers shown when no default scope is set.
    pub default_window: usize,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            default_scope: None,
            default_window: 3,
        }
    }
}

/// Engine configuration.
///
/// ```toml
/// [gate]
/// allow_cross_container = false
/// max_depth = 8
///
/// [scope]
/// default_scope = "Gen.1"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gate: GateConfig,
    pub scope: ScopeConfig,
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> EngineResult<Self> {
        toml::from_str(raw).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.gate
            .validate()
            .map_err(|e| EngineError::Config(e.to_string()))?;
        if self.scope.default_window == 0 {
            return Err(EngineError::Config("scope.default_window must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.scope.default_window, 3);
        assert!(!config.gate.allow_cross_container);
    }

    #[test]
    fn nested_sections() {
        let config = EngineConfig::from_toml_str(
            r#"
            [gate]
            allow_cross_container = true
            max_depth = 5

            [scope]
            default_scope = "Gen.1"
            "#,
        )
        .unwrap();
        assert!(config.gate.allow_cross_container);
        assert_eq!(config.gate.max_depth, Some(5));
        assert_eq!(config.scope.default_scope.as_deref(), Some("Gen.1"));
        assert_eq!(config.scope.default_window, 3);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        assert!(matches!(
            EngineConfig::from_toml_str("[gate\nmax_depth = "),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scope]\ndefault_window = 5").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.scope.default_window, 5);
    }

    #[test]
    fn zero_window_fails_validation() {
        let mut config = EngineConfig::default();
        config.scope.default_window = 0;
        assert!(config.validate().is_err());
    }
}
