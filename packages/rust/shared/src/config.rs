//! Application configuration for PortfolioBuilder.
//!
//! User config lives at `~/.portfoliobuilder/portfoliobuilder.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalogs;
use crate::error::{PortfolioBuilderError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "portfoliobuilder.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".portfoliobuilder";

// ---------------------------------------------------------------------------
// Config structs (matching portfoliobuilder.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Publish pipeline timing.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Where downloaded packages are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Template id used to style generated packages.
    #[serde(default = "default_template")]
    pub template: String,

    /// Color scheme name within the template.
    #[serde(default = "default_color_scheme")]
    pub color_scheme: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            template: default_template(),
            color_scheme: default_color_scheme(),
        }
    }
}

fn default_output_dir() -> String {
    "~/portfolios".into()
}
fn default_template() -> String {
    "minimal-pro".into()
}
fn default_color_scheme() -> String {
    "Classic".into()
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Interval between download progress ticks.
    #[serde(default = "default_download_tick_ms")]
    pub download_tick_ms: u64,

    /// Delay before each hosting stage.
    #[serde(default = "default_hosting_stage_ms")]
    pub hosting_stage_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            download_tick_ms: default_download_tick_ms(),
            hosting_stage_ms: default_hosting_stage_ms(),
        }
    }
}

fn default_download_tick_ms() -> u64 {
    200
}
fn default_hosting_stage_ms() -> u64 {
    1000
}

// ---------------------------------------------------------------------------
// Pipeline timing (runtime, derived from config)
// ---------------------------------------------------------------------------

/// Runtime stage timing for the publish pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineTiming {
    pub download_tick: Duration,
    pub hosting_stage: Duration,
}

impl Default for PipelineTiming {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl PipelineTiming {
    /// Zero delays, for tests and headless dry runs.
    pub fn instant() -> Self {
        Self {
            download_tick: Duration::ZERO,
            hosting_stage: Duration::ZERO,
        }
    }
}

impl From<&AppConfig> for PipelineTiming {
    fn from(config: &AppConfig) -> Self {
        Self {
            download_tick: Duration::from_millis(config.pipeline.download_tick_ms),
            hosting_stage: Duration::from_millis(config.pipeline.hosting_stage_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.portfoliobuilder/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PortfolioBuilderError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.portfoliobuilder/portfoliobuilder.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content =
        std::fs::read_to_string(path).map_err(|e| PortfolioBuilderError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PortfolioBuilderError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PortfolioBuilderError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content = toml::to_string_pretty(&config)
        .map_err(|e| PortfolioBuilderError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PortfolioBuilderError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the configured template and color scheme exist in the catalog.
pub fn validate_config(config: &AppConfig, catalogs: &Catalogs) -> Result<()> {
    let template = catalogs.template(&config.defaults.template)?;
    if template.scheme(&config.defaults.color_scheme).is_none() {
        let available: Vec<_> = template.color_schemes.iter().map(|s| s.name).collect();
        return Err(PortfolioBuilderError::config(format!(
            "template '{}' has no color scheme '{}' (available: {})",
            template.id,
            config.defaults.color_scheme,
            available.join(", ")
        )));
    }
    Ok(())
}

/// Expand a leading `~/` in a configured directory to the home directory.
pub fn resolve_output_dir(raw: &str) -> Result<PathBuf> {
    match raw.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().ok_or_else(|| {
                PortfolioBuilderError::config("could not determine home directory")
            })?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("output_dir"));
        assert!(toml_str.contains("download_tick_ms"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.pipeline.download_tick_ms, 200);
        assert_eq!(parsed.defaults.template, "minimal-pro");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[pipeline]
hosting_stage_ms = 10
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.pipeline.hosting_stage_ms, 10);
        assert_eq!(config.pipeline.download_tick_ms, 200);
        assert_eq!(config.defaults.color_scheme, "Classic");
    }

    #[test]
    fn timing_from_app_config() {
        let timing = PipelineTiming::from(&AppConfig::default());
        assert_eq!(timing.download_tick, Duration::from_millis(200));
        assert_eq!(timing.hosting_stage, Duration::from_secs(1));
    }

    #[test]
    fn validate_rejects_unknown_scheme() {
        let catalogs = Catalogs::builtin();
        let mut config = AppConfig::default();
        assert!(validate_config(&config, &catalogs).is_ok());

        config.defaults.color_scheme = "Neon".into();
        let err = validate_config(&config, &catalogs).unwrap_err();
        assert!(err.to_string().contains("no color scheme 'Neon'"));

        config.defaults.template = "nope".into();
        assert!(validate_config(&config, &catalogs).is_err());
    }

    #[test]
    fn resolve_plain_output_dir() {
        let dir = resolve_output_dir("/tmp/out").expect("resolve");
        assert_eq!(dir, PathBuf::from("/tmp/out"));
    }
}
