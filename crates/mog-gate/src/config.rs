use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// Configuration for the mutation gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Permit a child and its new mother to sit in different containers.
    pub allow_cross_container: bool,
    /// Deepest level a reparented child may land on. Roots are level 0.
    pub max_depth: Option<usize>,
    /// Whether rootify is offered at all.
    pub allow_rootify: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            allow_cross_container: false,
            max_depth: None,
            allow_rootify: true,
        }
    }
}

impl GateConfig {
    /// Accept every structurally sound edit: no container or depth limits.
    pub fn permissive() -> Self {
        Self {
            allow_cross_container: true,
            max_depth: None,
            allow_rootify: true,
        }
    }

    pub fn validate(&self) -> GateResult<()> {
        if self.max_depth == Some(0) {
            return Err(GateError::Config(
                "max_depth of 0 forbids every reparent; omit it to disable the limit".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_on_containers() {
        let config = GateConfig::default();
        assert!(!config.allow_cross_container);
        assert_eq!(config.max_depth, None);
        assert!(config.allow_rootify);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: GateConfig = toml::from_str("max_depth = 4").unwrap();
        assert_eq!(config.max_depth, Some(4));
        assert!(!config.allow_cross_container);
        assert!(config.allow_rootify);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = GateConfig {
            max_depth: Some(0),
            ..GateConfig::default()
        };
        assert!(matches!(config.validate(), Err(GateError::Config(_))));
    }
}
