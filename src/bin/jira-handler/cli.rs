use std::path::PathBuf;

use clap::{ArgAction, Parser};
use jira_handler::config::{ConfigLayer, Key};
use jira_handler::error::ConfigError;

/// Every option can also be set through its environment variable, which
/// takes precedence over the flag.
#[derive(Parser, Debug)]
#[command(name = "jira-handler", author, version, about = "Sensu handler that opens Jira issues", long_about = None)]
pub struct Cli {
    /// The Jira URL (JIRA_URL).
    #[arg(long, value_name = "URL")]
    pub jira_url: Option<String>,

    /// The Jira user (JIRA_USER).
    #[arg(long, value_name = "USER")]
    pub jira_user: Option<String>,

    /// The Jira password or API token (JIRA_PASSWORD).
    #[arg(long, value_name = "PASSWORD")]
    pub jira_password: Option<String>,

    /// The Jira project key, may be a template (JIRA_PROJECT).
    #[arg(long, value_name = "TEMPLATE")]
    pub jira_project: Option<String>,

    /// The Jira issue type, may be a template (JIRA_ISSUE_TYPE).
    #[arg(long, value_name = "TEMPLATE")]
    pub jira_issue_type: Option<String>,

    /// The template to use to populate the issue summary (JIRA_SUMMARY).
    #[arg(long, value_name = "TEMPLATE")]
    pub jira_summary: Option<String>,

    /// The template to use to populate the issue description (JIRA_DESCRIPTION).
    #[arg(long, value_name = "TEMPLATE")]
    pub jira_description: Option<String>,

    /// Request timeout for the Jira call, e.g. "30s" (JIRA_TIMEOUT).
    #[arg(long, value_name = "DURATION")]
    pub jira_timeout: Option<String>,

    /// Optional TOML file with a [jira] table, lowest priority source.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use a JSON layer for logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "jira_handler=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Values given on the command line, as one configuration layer.
    pub fn config_layer(&self) -> Result<ConfigLayer, ConfigError> {
        let flags = [
            (Key::Url, &self.jira_url),
            (Key::User, &self.jira_user),
            (Key::Password, &self.jira_password),
            (Key::Project, &self.jira_project),
            (Key::IssueType, &self.jira_issue_type),
            (Key::Summary, &self.jira_summary),
            (Key::Description, &self.jira_description),
            (Key::Timeout, &self.jira_timeout),
        ];
        ConfigLayer::from_pairs(
            flags
                .into_iter()
                .filter_map(|(key, value)| value.clone().map(|v| (key, v))),
        )
    }
}
