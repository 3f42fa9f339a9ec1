//! Configuration for furnacectl
//!
//! Settings are loaded once at process start from a TOML file at the
//! platform config directory (overridable with `--config-file`), then
//! adjusted from `FURNACE_*` environment variables. A missing file yields
//! the defaults; commands receive the resulting [`Config`] by reference, so
//! there is no ambient global lookup anywhere in the codebase.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config from {path}: {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to determine config directory")]
    ConfigDirError,

    #[error("Template file error for '{path}': {source}")]
    TemplateError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Process-wide settings, read-only after startup
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// AWS region the stack lives in
    pub region: String,
    /// Default stack name when the positional argument is omitted
    pub stack_name: String,
    /// Default application name; falls back to the stack name when unset
    pub app_name: Option<String>,
    /// Name of the IAM role CodeDeploy assumes
    pub code_deploy_role: String,
    /// Commit to deploy on `push`
    pub git_revision: String,
    /// GitHub repository in `owner/repo` form
    pub git_account: String,
    /// Seconds between status polls
    pub wait_frequency_secs: u64,
    /// Overall deadline in seconds for any single wait
    pub timeout_secs: u64,
    /// Classic load balancer referenced by the deployment group
    pub elb_name: String,
    /// Tag key used to select deployment target instances
    pub stage_tag_key: String,
    /// Deploy only to instances running an outdated revision
    pub update_outdated_instances_only: bool,
    /// CloudFormation template used by `create`; `~` is expanded
    pub template: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            stack_name: "FurnaceStack".to_string(),
            app_name: None,
            code_deploy_role: "CodeDeployServiceRole".to_string(),
            git_revision: String::new(),
            git_account: String::new(),
            wait_frequency_secs: 2,
            timeout_secs: 1800,
            elb_name: "ElasticLoadBalancer".to_string(),
            stage_tag_key: "fu_stage".to_string(),
            update_outdated_instances_only: false,
            template: None,
        }
    }
}

impl Config {
    /// Load from the default platform location, then apply env overrides
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        let mut config = Self::load_from_path(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, then apply env overrides
    ///
    /// A nonexistent file is not an error; it yields the defaults, same as
    /// running without any configuration.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default config file path: `<platform config dir>/furnacectl/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let dirs =
            ProjectDirs::from("", "", "furnacectl").ok_or(ConfigError::ConfigDirError)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Environment variables take precedence over file contents
    pub fn apply_env_overrides(&mut self) {
        if let Ok(region) = std::env::var("FURNACE_REGION") {
            self.region = region;
        }
        if let Ok(stack_name) = std::env::var("FURNACE_STACK_NAME") {
            self.stack_name = stack_name;
        }
        if let Ok(role) = std::env::var("FURNACE_CODE_DEPLOY_ROLE") {
            self.code_deploy_role = role;
        }
        if let Ok(revision) = std::env::var("FURNACE_GIT_REVISION") {
            self.git_revision = revision;
        }
        if let Ok(account) = std::env::var("FURNACE_GIT_ACCOUNT") {
            self.git_account = account;
        }
    }

    /// Application name default: explicit setting, else the stack name
    pub fn app_name_or_default<'a>(&'a self, stack_name: &'a str) -> &'a str {
        self.app_name.as_deref().unwrap_or(stack_name)
    }

    /// Read the CloudFormation template body for `create`
    ///
    /// `override_path` (from `--template`) wins over the configured path.
    pub fn read_template(&self, override_path: Option<&str>) -> Result<String> {
        let path = override_path
            .or(self.template.as_deref())
            .ok_or_else(|| ConfigError::TemplateError {
                path: "<none>".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no template configured; set template in the config file or pass --template",
                ),
            })?;
        let expanded = shellexpand::tilde(path);
        fs::read_to_string(expanded.as_ref()).map_err(|source| ConfigError::TemplateError {
            path: expanded.into_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.stack_name, "FurnaceStack");
        assert_eq!(config.wait_frequency_secs, 2);
        assert_eq!(config.stage_tag_key, "fu_stage");
        assert!(!config.update_outdated_instances_only);
    }

    #[test]
    fn test_app_name_falls_back_to_stack() {
        let mut config = Config::default();
        assert_eq!(config.app_name_or_default("Demo"), "Demo");
        config.app_name = Some("Web".to_string());
        assert_eq!(config.app_name_or_default("Demo"), "Web");
    }
}
