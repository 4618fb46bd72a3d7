//! Configuration system for Versus.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> overrides.
//! Configuration is loaded from `~/.config/versus/config.toml` and/or `.versus/config.toml`
//! in the workspace directory.

use crate::error::ConfigError;
use crate::gateway::GatewayConfig;
use crate::lexicon::MarkerLexicon;
use crate::links::LinksConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersusConfig {
    /// Marker word lists.
    #[serde(default)]
    pub lexicon: MarkerLexicon,
    /// Descriptive term extraction.
    #[serde(default)]
    pub links: LinksConfig,
    /// HTTP gateway.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl VersusConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lexicon.clone().normalized().validate()?;
        if self.links.max_terms == 0 {
            return Err(ConfigError::Invalid {
                message: "links.max_terms must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

/// Path of the user-level config file, if a config directory can be resolved.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "versus", "versus")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Path of the workspace-level config file.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".versus").join("config.toml")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `VERSUS_`)
/// 3. Workspace-local config (`.versus/config.toml`)
/// 4. User config (`~/.config/versus/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&VersusConfig>,
) -> Result<VersusConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(VersusConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // VERSUS_GATEWAY__PORT, VERSUS_LINKS__MAX_TERMS, ...
    figment = figment.merge(Env::prefixed("VERSUS_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(Box::new)
}

/// Check whether a user-level or workspace-level config file exists.
pub fn config_exists(workspace: Option<&Path>) -> bool {
    if user_config_path().is_some_and(|p| p.exists()) {
        return true;
    }
    workspace.is_some_and(|ws| workspace_config_path(ws).exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VersusConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.links.max_terms, 10);
        assert_eq!(config.gateway.port, 5000);
        assert!(config.lexicon.positive.contains(&"better".to_string()));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = VersusConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: VersusConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_load_config_with_overrides() {
        let mut overrides = VersusConfig::default();
        overrides.links.max_terms = 3;
        overrides.gateway.port = 9090;

        let config = load_config(None, Some(&overrides)).unwrap();
        assert_eq!(config.links.max_terms, 3);
        assert_eq!(config.gateway.port, 9090);
    }

    #[test]
    fn test_load_config_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let versus_dir = dir.path().join(".versus");
        std::fs::create_dir_all(&versus_dir).unwrap();
        std::fs::write(
            versus_dir.join("config.toml"),
            r#"
[lexicon]
positive = ["better", "tastier"]

[links]
max_terms = 4
"#,
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None).unwrap();
        assert_eq!(config.lexicon.positive, vec!["better", "tastier"]);
        assert!(config.lexicon.negative.contains(&"worse".to_string()));
        assert_eq!(config.links.max_terms, 4);
        assert_eq!(config.links.min_term_length, 3);
        assert!(config_exists(Some(dir.path())));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: VersusConfig = toml::from_str("[gateway]\nport = 8000\n").unwrap();
        assert_eq!(config.gateway.port, 8000);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.lexicon, MarkerLexicon::default());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let mut config = VersusConfig::default();
        config.lexicon.negation.push("Better".into());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OverlappingMarkers { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_terms() {
        let mut config = VersusConfig::default();
        config.links.max_terms = 0;
        assert!(config.validate().is_err());
    }
}
