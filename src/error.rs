use std::path::PathBuf;

use thiserror::Error;

/// Exit status reported for every failure the handler can hit.
pub const FAILURE_EXIT_CODE: u8 = 2;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Event(#[from] EventError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Jira(#[from] JiraError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("--{flag} or {env} environment variable is required")]
    MissingOption {
        flag: &'static str,
        env: &'static str,
    },
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to read event from stdin")]
    Read {
        #[source]
        source: std::io::Error,
    },
    #[error("failed to unmarshal event")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
    #[error("event does not contain a check")]
    MissingCheck,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template {template}: {message}")]
    Parse {
        template: &'static str,
        message: String,
    },
    /// A field outside the check context, or a label/annotation key the
    /// check does not carry.
    #[error("template {template}: {message}")]
    Undefined {
        template: &'static str,
        message: String,
    },
    #[error("template {template}: {message}")]
    Render {
        template: &'static str,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum JiraError {
    #[error("invalid Jira URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("failed to build HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },
    #[error("request failed")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("authentication rejected by Jira (HTTP {status})")]
    Unauthorized { status: reqwest::StatusCode },
    #[error("Jira rejected the issue (HTTP {status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("invalid JSON payload: {message}")]
    Json { message: String },
}

impl From<reqwest::Error> for JiraError {
    fn from(source: reqwest::Error) -> Self {
        Self::Request { source }
    }
}

impl Error {
    /// Process exit status for this error. Every category is terminal.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        FAILURE_EXIT_CODE
    }
}
