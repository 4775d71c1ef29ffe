use std::collections::BTreeMap;
use std::time::Duration;

use humantime::parse_duration;
use serde::Deserialize;
use serde_with::{DeserializeAs, serde_as};

use crate::Result;
use crate::error::ConfigError;
use crate::event::Event;

use super::defaults::{
    default_connect_timeout, default_description, default_request_timeout, default_summary,
};
use super::env::env_string;
use super::options::Key;
use super::Config;

/// `timeout = "1m 30s"` in the config file.
struct HumantimeDuration;

impl<'de> DeserializeAs<'de, Duration> for HumantimeDuration {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_duration(raw.trim()).map_err(serde::de::Error::custom)
    }
}

/// One source of option values. Layers are stacked lowest first; a value
/// that is unset or empty never hides the layer beneath it.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ConfigLayer {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[serde_as(as = "Option<HumantimeDuration>")]
    pub timeout: Option<Duration>,
}

impl ConfigLayer {
    pub(super) fn defaults() -> Self {
        Self {
            summary: Some(default_summary()),
            description: Some(default_description()),
            timeout: Some(default_request_timeout()),
            ..Self::default()
        }
    }

    /// Build a layer from string values keyed by option.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when the timeout is not a
    /// humantime duration.
    pub fn from_pairs<I>(pairs: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Key, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in pairs {
            layer.set(key, value)?;
        }
        Ok(layer)
    }

    /// Environment layer read through `lookup`, which stands in for
    /// `std::env::var` so resolution can be exercised without touching the
    /// process environment.
    ///
    /// # Errors
    ///
    /// See [`ConfigLayer::from_pairs`].
    pub fn from_env_with<F>(lookup: F) -> std::result::Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        Self::from_pairs(
            Key::ALL
                .into_iter()
                .filter_map(|key| lookup(key.env()).map(|value| (key, value))),
        )
    }

    /// # Errors
    ///
    /// Fails on non-unicode variables and unparsable timeouts.
    pub fn from_process_env() -> std::result::Result<Self, ConfigError> {
        let mut pairs = Vec::new();
        for key in Key::ALL {
            if let Some(value) = env_string(key.env())? {
                pairs.push((key, value));
            }
        }
        Self::from_pairs(pairs)
    }

    /// Overrides carried by the event's entity and check annotations, the
    /// check's taking precedence.
    ///
    /// # Errors
    ///
    /// See [`ConfigLayer::from_pairs`].
    pub fn from_annotations(event: &Event) -> std::result::Result<Self, ConfigError> {
        let entity = event.entity.as_ref().map(|e| &e.metadata.annotations);
        let check = event.check.as_ref().map(|c| &c.metadata.annotations);
        let mut pairs = Vec::new();
        for annotations in [entity, check].into_iter().flatten() {
            collect_annotations(annotations, &mut pairs);
        }
        Self::from_pairs(pairs)
    }

    fn set(&mut self, key: Key, value: String) -> std::result::Result<(), ConfigError> {
        let slot = match key {
            Key::Url => &mut self.url,
            Key::User => &mut self.user,
            Key::Password => &mut self.password,
            Key::Project => &mut self.project,
            Key::IssueType => &mut self.issue_type,
            Key::Summary => &mut self.summary,
            Key::Description => &mut self.description,
            Key::Timeout => {
                if value.trim().is_empty() {
                    return Ok(());
                }
                let timeout =
                    parse_duration(value.trim()).map_err(|err| ConfigError::InvalidField {
                        field: key.flag(),
                        message: err.to_string(),
                    })?;
                self.timeout = Some(timeout);
                return Ok(());
            }
        };
        if !value.is_empty() {
            *slot = Some(value);
        }
        Ok(())
    }

    fn get(&self, key: Key) -> Option<&str> {
        match key {
            Key::Url => self.url.as_deref(),
            Key::User => self.user.as_deref(),
            Key::Password => self.password.as_deref(),
            Key::Project => self.project.as_deref(),
            Key::IssueType => self.issue_type.as_deref(),
            Key::Summary => self.summary.as_deref(),
            Key::Description => self.description.as_deref(),
            Key::Timeout => None,
        }
    }

    /// Stack `upper` on top of `self`.
    #[must_use]
    pub fn overlay(self, upper: Self) -> Self {
        fn pick(lower: Option<String>, upper: Option<String>) -> Option<String> {
            upper.filter(|v| !v.is_empty()).or(lower)
        }
        Self {
            url: pick(self.url, upper.url),
            user: pick(self.user, upper.user),
            password: pick(self.password, upper.password),
            project: pick(self.project, upper.project),
            issue_type: pick(self.issue_type, upper.issue_type),
            summary: pick(self.summary, upper.summary),
            description: pick(self.description, upper.description),
            timeout: upper.timeout.or(self.timeout),
        }
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        for key in Key::REQUIRED {
            if self.get(key).is_none_or(str::is_empty) {
                return Err(ConfigError::MissingOption {
                    flag: key.flag(),
                    env: key.env(),
                }
                .into());
            }
        }

        let http_request_timeout = self.timeout.unwrap_or_else(default_request_timeout);
        if http_request_timeout.is_zero() {
            return Err(ConfigError::InvalidField {
                field: Key::Timeout.flag(),
                message: "timeout must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(Config {
            url: self.url.unwrap_or_default(),
            user: self.user.unwrap_or_default(),
            password: self.password.unwrap_or_default().into(),
            project: self.project.unwrap_or_default(),
            issue_type: self.issue_type.unwrap_or_default(),
            summary: self.summary.unwrap_or_else(default_summary),
            description: self.description.unwrap_or_else(default_description),
            http_request_timeout,
            http_connect_timeout: default_connect_timeout().min(http_request_timeout),
        })
    }
}

fn collect_annotations(annotations: &BTreeMap<String, String>, pairs: &mut Vec<(Key, String)>) {
    for key in Key::ALL.into_iter().filter(|key| key.annotatable()) {
        if let Some(value) = annotations.get(&key.annotation()) {
            pairs.push((key, value.clone()));
        }
    }
}
