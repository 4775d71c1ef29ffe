use std::time::{Duration, Instant};

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::Result;
use crate::config::Config;
use crate::error::JiraError;

use super::models::{CreateIssueRequest, CreatedIssue, IssueFields, body_preview, rejection_message};

const ISSUE_PATH: &str = "rest/api/2/issue";
const CORRELATION_HEADER: &str = "x-correlation-id";

#[derive(Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    issue_url: Url,
    user: String,
    password: SecretString,
}

impl JiraClient {
    /// Build a client for the Jira instance rooted at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not an http(s) URL or if the underlying
    /// HTTP client fails to build. No request is made here.
    pub fn new(
        base: &str,
        user: &str,
        password: SecretString,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let issue_url = issue_url(base)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(concat!("jira-handler/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| JiraError::Client { source })?;

        Ok(Self {
            http,
            issue_url,
            user: user.to_string(),
            password,
        })
    }

    /// # Errors
    ///
    /// See [`JiraClient::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.url,
            &config.user,
            config.password.clone(),
            config.http_request_timeout,
            config.http_connect_timeout,
        )
    }

    /// Create one issue. The request is sent exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::Request`] on transport failure,
    /// [`JiraError::Unauthorized`] on 401/403, [`JiraError::Api`] for any
    /// other non-success status, and [`JiraError::Json`] if the success body
    /// cannot be decoded.
    pub async fn create_issue(&self, fields: &IssueFields) -> Result<CreatedIssue> {
        let correlation_id = Uuid::now_v7().to_string();
        let started = Instant::now();

        let response = self
            .http
            .post(self.issue_url.clone())
            .basic_auth(&self.user, Some(self.password.expose_secret()))
            .header(CORRELATION_HEADER, &correlation_id)
            .json(&CreateIssueRequest::from(fields))
            .send()
            .await
            .map_err(JiraError::from)?;

        let status = response.status();
        let body = response.bytes().await.map_err(JiraError::from)?;

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!(%correlation_id, %status, "jira rejected credentials");
            return Err(JiraError::Unauthorized { status }.into());
        }
        if !status.is_success() {
            let message = rejection_message(&body);
            warn!(%correlation_id, %status, %message, "jira rejected issue");
            return Err(JiraError::Api { status, message }.into());
        }

        let created: CreatedIssue = serde_json::from_slice(&body).map_err(|err| JiraError::Json {
            message: format!(
                "error decoding response body: {err}; body preview: {}",
                body_preview(&body)
            ),
        })?;
        info!(
            %correlation_id,
            key = %created.key,
            latency_ms = started.elapsed().as_millis(),
            "jira issue created"
        );
        debug!(id = %created.id, url = ?created.self_url, "created issue details");
        Ok(created)
    }
}

fn issue_url(base: &str) -> std::result::Result<Url, JiraError> {
    let invalid = |message: String| JiraError::InvalidUrl {
        url: base.to_string(),
        message,
    };
    let mut url = Url::parse(base.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.join(ISSUE_PATH).map_err(|err| invalid(err.to_string()))
}
