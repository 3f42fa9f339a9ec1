//! Error types for furnacectl
//!
//! The library reports everything as `CoreError`; this type adds the
//! CLI-facing context (which config file, which suggestion) and owns the
//! final operator-visible rendering. The command entry point decides the
//! process exit code - nothing below it terminates the process.

use colored::Colorize;
use furnacectl_core::CoreError;
use thiserror::Error;

/// Main error type for the furnacectl binary
#[derive(Error, Debug)]
pub enum FurnaceCtlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Core(#[from] CoreError),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, FurnaceCtlError>;

impl FurnaceCtlError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            FurnaceCtlError::Config(_) => vec![
                "Check the config file syntax (TOML)".to_string(),
                "Run with --config-file to point at an explicit file".to_string(),
            ],
            FurnaceCtlError::Core(err) if err.is_not_found() => vec![
                "Verify the stack name: furnacectl status <stack>".to_string(),
                "Check that you are using the intended region".to_string(),
            ],
            FurnaceCtlError::Core(CoreError::Connection(_)) => vec![
                "Check network connectivity and AWS credentials".to_string(),
                "Verify the configured region is correct".to_string(),
            ],
            FurnaceCtlError::Core(CoreError::TaskTimeout(_)) => vec![
                "Re-running the command is safe; completed steps are skipped".to_string(),
                "Raise timeout_secs in the config file for slow stacks".to_string(),
            ],
            FurnaceCtlError::Core(CoreError::Validation(_)) => vec![
                "Check the config file keys: furnacectl push needs git_revision and git_account"
                    .to_string(),
            ],
            _ => vec![],
        }
    }

    /// Render the error with its suggestions, cargo-diagnostic style
    pub fn display_with_suggestions(&self) -> String {
        let mut out = format!("{}{}{}", "error".red().bold(), ": ".bold(), self);
        for suggestion in self.suggestions() {
            out.push_str(&format!(
                "\n  {}{}{}",
                "tip".yellow().bold(),
                ": ".bold(),
                suggestion
            ));
        }
        out
    }
}

impl From<furnacectl_core::ConfigError> for FurnaceCtlError {
    fn from(err: furnacectl_core::ConfigError) -> Self {
        FurnaceCtlError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_timeout_suggestions_mention_rerun() {
        let err = FurnaceCtlError::Core(CoreError::TaskTimeout(Duration::from_secs(60)));
        let rendered = err.display_with_suggestions();
        assert!(rendered.contains("Re-running"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: FurnaceCtlError =
            furnacectl_core::ConfigError::ConfigDirError.into();
        assert!(matches!(err, FurnaceCtlError::Config(_)));
    }
}
