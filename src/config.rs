//! Server configuration.
//!
//! Values come from command line flags first, then the process environment
//! (optionally seeded from a `.env` file), then defaults.

use std::path::Path;

use crate::error::{McpError, Result};

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 12-digit account that owns the QuickSight resources
    pub aws_account_id: String,
    pub aws_region: String,
    /// Named AWS CLI profile
    pub aws_profile: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub aws_account_id: Option<String>,
    pub aws_region: Option<String>,
    pub aws_profile: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,
}

impl Config {
    /// Loads `.env` from the working directory when present, then resolves
    /// against the process environment.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        load_env_file(Path::new(".env"))?;
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves the configuration using `lookup` for environment variables.
    pub fn resolve<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |flag: Option<String>, key: &str| {
            flag.filter(|v| !v.is_empty())
                .or_else(|| lookup(key).filter(|v| !v.is_empty()))
        };

        let aws_account_id = pick(overrides.aws_account_id, "AWS_ACCOUNT_ID").ok_or_else(|| {
            McpError::Config(
                "AWS_ACCOUNT_ID is required. Set it in .env, the environment, or pass --aws-account-id"
                    .to_string(),
            )
        })?;

        let config = Self {
            aws_account_id,
            aws_region: pick(overrides.aws_region, "AWS_REGION")
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            aws_profile: pick(overrides.aws_profile, "AWS_PROFILE"),
            aws_access_key_id: pick(overrides.aws_access_key_id, "AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: pick(overrides.aws_secret_access_key, "AWS_SECRET_ACCESS_KEY"),
            aws_session_token: pick(overrides.aws_session_token, "AWS_SESSION_TOKEN"),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let id = &self.aws_account_id;
        if id.len() != 12 || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(McpError::Config(format!(
                "Invalid AWS_ACCOUNT_ID: {}. Must be a 12-digit number.",
                id
            )));
        }
        Ok(())
    }
}

/// Existing environment variables always win over the file.
fn load_env_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    dotenvy::from_path(path)
        .map_err(|e| McpError::Config(format!("Failed to read {}: {}", path.display(), e)))
}
