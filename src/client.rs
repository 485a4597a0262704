use std::collections::HashMap;
use std::process::Stdio;

use async_trait::async_trait;
use bstr::ByteSlice;
use convert_case::{Case, Casing};
use eyre::{Result, WrapErr};
use serde_json::{Map, Value};

use crate::config::Config;

/// The environment variable name where we set additional metadata for the AWS CLI user agent.
const USER_AGENT_ENV_VAR: &str = "AWS_EXECUTION_ENV";
const USER_AGENT_APP_NAME: &str = "QuickSight-MCP-Server";
const USER_AGENT_VERSION_KEY: &str = "Version";
const USER_AGENT_VERSION_VALUE: &str = env!("CARGO_PKG_VERSION");

/// A single QuickSight API call: operation name in API casing
/// (`ListAnalyses`) plus its request parameters.
#[async_trait]
pub trait QuickSightApi: Send + Sync {
    async fn call(&self, operation: &str, params: Map<String, Value>) -> Result<Value>;
}

/// Runs QuickSight operations through the `aws` command line tool.
#[derive(Debug, Clone)]
pub struct AwsCliClient {
    program: String,
    region: String,
    profile_name: Option<String>,
    credentials: Vec<(&'static str, String)>,
}

impl AwsCliClient {
    pub fn new(config: &Config) -> Self {
        let credentials = [
            ("AWS_ACCESS_KEY_ID", &config.aws_access_key_id),
            ("AWS_SECRET_ACCESS_KEY", &config.aws_secret_access_key),
            ("AWS_SESSION_TOKEN", &config.aws_session_token),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
        .collect();

        Self {
            program: "aws".to_string(),
            region: config.aws_region.clone(),
            profile_name: config.aws_profile.clone(),
            credentials,
        }
    }

    /// Use a different executable than `aws` found on `PATH`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments passed to the AWS CLI for `operation`, without the program name.
    fn cli_arguments(&self, operation: &str, params: &Map<String, Value>) -> Result<Vec<String>> {
        let input = serde_json::to_string(params)
            .wrap_err_with(|| format!("Unable to encode parameters for {}", operation))?;

        let mut args = vec!["--region".to_string(), self.region.clone()];
        if let Some(profile_name) = self.profile_name.as_deref() {
            args.push("--profile".to_string());
            args.push(profile_name.to_string());
        }
        args.extend([
            "quicksight".to_string(),
            cli_command(operation),
            "--cli-input-json".to_string(),
            input,
            "--no-paginate".to_string(),
            "--output".to_string(),
            "json".to_string(),
        ]);
        Ok(args)
    }

    fn environment(&self) -> HashMap<String, String> {
        let mut env_vars: HashMap<String, String> = std::env::vars().collect();

        let user_agent_metadata_value = format!(
            "{} {}/{}",
            USER_AGENT_APP_NAME, USER_AGENT_VERSION_KEY, USER_AGENT_VERSION_VALUE
        );

        // Append to an existing user agent value rather than replacing it
        match env_vars.get(USER_AGENT_ENV_VAR) {
            Some(existing_value) if !existing_value.is_empty() => {
                let combined = format!("{} {}", existing_value, user_agent_metadata_value);
                env_vars.insert(USER_AGENT_ENV_VAR.to_string(), combined);
            }
            _ => {
                env_vars.insert(USER_AGENT_ENV_VAR.to_string(), user_agent_metadata_value);
            }
        }

        for (name, value) in &self.credentials {
            env_vars.insert(name.to_string(), value.clone());
        }
        env_vars
    }
}

#[async_trait]
impl QuickSightApi for AwsCliClient {
    async fn call(&self, operation: &str, params: Map<String, Value>) -> Result<Value> {
        let args = self.cli_arguments(operation, &params)?;
        tracing::debug!(operation, region = %self.region, "invoking aws quicksight");

        let output = tokio::process::Command::new(&self.program)
            .envs(self.environment())
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .wrap_err_with(|| format!("Unable to spawn '{}' for {}", self.program, operation))?
            .wait_with_output()
            .await
            .wrap_err_with(|| format!("Unable to run '{}' for {}", self.program, operation))?;

        if !output.status.success() {
            let stderr = output.stderr.to_str_lossy();
            let message = stderr.trim();
            if message.is_empty() {
                eyre::bail!(
                    "{} failed with exit status {}",
                    operation,
                    output.status.code().unwrap_or(-1)
                );
            }
            eyre::bail!("{}", message);
        }

        let stdout = output.stdout.to_str_lossy();
        if stdout.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(&stdout)
            .wrap_err_with(|| format!("Unable to parse the {} response", operation))
    }
}

/// `ListDataSets` -> `list-data-sets`
pub fn cli_command(operation: &str) -> String {
    operation.to_case(Case::Kebab)
}

/// Pulls the AWS error code out of a CLI error message such as
/// `An error occurred (ResourceNotFoundException) when calling ...`.
pub fn aws_error_code(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("An error occurred (")?;
    let (code, _) = rest.split_once(')')?;
    (!code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '.'))
        .then_some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            aws_account_id: "123456789012".to_string(),
            aws_region: "eu-west-1".to_string(),
            aws_profile: Some("analytics".to_string()),
            aws_access_key_id: Some("AKIDEXAMPLE".to_string()),
            aws_secret_access_key: None,
            aws_session_token: None,
        }
    }

    #[test]
    fn test_cli_command() {
        assert_eq!(cli_command("ListAnalyses"), "list-analyses");
        assert_eq!(cli_command("ListDataSets"), "list-data-sets");
        assert_eq!(
            cli_command("GenerateEmbedUrlForAnonymousUser"),
            "generate-embed-url-for-anonymous-user"
        );
        assert_eq!(
            cli_command("UpdateDashboardPublishedVersion"),
            "update-dashboard-published-version"
        );
    }

    #[test]
    fn test_cli_arguments() {
        let client = AwsCliClient::new(&config());
        let mut params = Map::new();
        params.insert("AwsAccountId".to_string(), Value::from("123456789012"));
        params.insert("NextToken".to_string(), Value::from("abc"));

        let args = client.cli_arguments("ListDashboards", &params).unwrap();

        assert_eq!(
            &args[..6],
            &["--region", "eu-west-1", "--profile", "analytics", "quicksight", "list-dashboards"]
        );
        assert_eq!(args[6], "--cli-input-json");
        let input: Value = serde_json::from_str(&args[7]).unwrap();
        assert_eq!(input["NextToken"], "abc");
        assert_eq!(input["AwsAccountId"], "123456789012");
        assert!(args.contains(&"--no-paginate".to_string()));
    }

    #[test]
    fn test_cli_arguments_without_profile() {
        let mut config = config();
        config.aws_profile = None;
        let client = AwsCliClient::new(&config);

        let args = client.cli_arguments("ListThemes", &Map::new()).unwrap();

        assert!(!args.contains(&"--profile".to_string()));
        assert_eq!(&args[..4], &["--region", "eu-west-1", "quicksight", "list-themes"]);
    }

    #[test]
    fn test_environment_carries_user_agent_and_credentials() {
        let env_vars = AwsCliClient::new(&config()).environment();

        assert!(env_vars[USER_AGENT_ENV_VAR].contains("QuickSight-MCP-Server Version/"));
        assert_eq!(env_vars["AWS_ACCESS_KEY_ID"], "AKIDEXAMPLE");
    }

    #[test]
    fn test_aws_error_code() {
        let message = "An error occurred (ResourceNotFoundException) when calling the \
                       DescribeAnalysis operation: Analysis not found";
        assert_eq!(aws_error_code(message), Some("ResourceNotFoundException"));
        assert_eq!(
            aws_error_code("\nAn error occurred (ThrottlingException): Rate exceeded"),
            Some("ThrottlingException")
        );
        assert_eq!(aws_error_code("Unable to locate credentials"), None);
        assert_eq!(aws_error_code("An error occurred () oops"), None);
    }

    #[tokio::test]
    async fn test_missing_program_is_reported() {
        let client = AwsCliClient::new(&config()).with_program("quicksight-mcp-no-such-binary");

        let err = client.call("ListAnalyses", Map::new()).await.unwrap_err();

        assert!(err.to_string().contains("Unable to spawn"), "{err}");
    }
}
