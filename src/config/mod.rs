use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;

use crate::Result;
use crate::error::Error as HandlerError;
use crate::event::Event;

mod defaults;
mod env;
mod file;
mod options;
mod raw;

pub use options::{ANNOTATION_PREFIX, Key};
pub use raw::ConfigLayer;

/// Fully resolved handler configuration. Built once per run.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub user: String,
    pub password: SecretString,
    pub project: String,
    pub issue_type: String,
    pub summary: String,
    pub description: String,
    pub http_request_timeout: Duration,
    pub http_connect_timeout: Duration,
}

impl Config {
    /// Merge `layers` (lowest priority first) over the built-in defaults and
    /// validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConfigError::MissingOption`] for the first
    /// required option left empty, checked in [`Key::REQUIRED`] order.
    pub fn resolve<I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = ConfigLayer>,
    {
        layers
            .into_iter()
            .fold(ConfigLayer::defaults(), ConfigLayer::overlay)
            .validate_and_build()
    }

    /// Resolve from every source: optional file, command-line arguments,
    /// event annotations, then the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be loaded, a source carries an
    /// invalid value, or validation fails.
    pub fn load(file_path: Option<&Path>, args: ConfigLayer, event: &Event) -> Result<Self> {
        let file = file_path
            .map(file::load)
            .transpose()
            .map_err(HandlerError::from)?
            .unwrap_or_default();
        let annotations = ConfigLayer::from_annotations(event).map_err(HandlerError::from)?;
        let env = ConfigLayer::from_process_env().map_err(HandlerError::from)?;
        Self::resolve([file, args, annotations, env])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use secrecy::ExposeSecret;

    use super::{Config, ConfigLayer, Key};
    use crate::error::{ConfigError, Error};
    use crate::event::Event;

    fn layer(pairs: &[(Key, &str)]) -> ConfigLayer {
        ConfigLayer::from_pairs(pairs.iter().map(|(k, v)| (*k, (*v).to_string()))).unwrap()
    }

    fn complete_args() -> ConfigLayer {
        layer(&[
            (Key::Url, "https://jira.example.com"),
            (Key::User, "sensu"),
            (Key::Password, "hunter2"),
            (Key::Project, "OPS"),
            (Key::IssueType, "Bug"),
        ])
    }

    pub(crate) fn sample_config() -> Config {
        match Config::resolve([complete_args()]) {
            Ok(config) => config,
            Err(err) => panic!("sample config must resolve: {err}"),
        }
    }

    fn env_layer(vars: &[(&'static str, &str)]) -> ConfigLayer {
        let vars: HashMap<&str, String> = vars.iter().map(|(k, v)| (*k, (*v).to_string())).collect();
        ConfigLayer::from_env_with(|key| vars.get(key).cloned().filter(|v| !v.is_empty())).unwrap()
    }

    fn missing(err: Error) -> (&'static str, &'static str) {
        match err {
            Error::Config(ConfigError::MissingOption { flag, env }) => (flag, env),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn defaults_fill_templates_and_timeouts() {
        let config = sample_config();
        assert_eq!(
            config.summary,
            "Check {{ Name }} fired with status {{ Status }}"
        );
        assert_eq!(config.description, "{{ Output }}");
        assert_eq!(config.http_request_timeout, Duration::from_secs(30));
        assert_eq!(config.http_connect_timeout, Duration::from_secs(10));
        assert_eq!(config.password.expose_secret(), "hunter2");
    }

    #[test]
    fn environment_beats_arguments() {
        let env = env_layer(&[("JIRA_PROJECT", "INFRA"), ("JIRA_SUMMARY", "{{ Name }}")]);
        let config = Config::resolve([complete_args(), env]).unwrap();
        assert_eq!(config.project, "INFRA");
        assert_eq!(config.summary, "{{ Name }}");
        assert_eq!(config.issue_type, "Bug");
    }

    #[test]
    fn empty_environment_value_does_not_override() {
        let env = env_layer(&[("JIRA_PROJECT", ""), ("JIRA_USER", "")]);
        let config = Config::resolve([complete_args(), env]).unwrap();
        assert_eq!(config.project, "OPS");
        assert_eq!(config.user, "sensu");
    }

    #[test]
    fn environment_alone_is_enough() {
        let env = env_layer(&[
            ("JIRA_URL", "https://jira.example.com"),
            ("JIRA_USER", "sensu"),
            ("JIRA_PASSWORD", "secret"),
            ("JIRA_PROJECT", "OPS"),
            ("JIRA_ISSUE_TYPE", "Task"),
            ("JIRA_TIMEOUT", "5s"),
        ]);
        let config = Config::resolve([ConfigLayer::default(), env]).unwrap();
        assert_eq!(config.issue_type, "Task");
        assert_eq!(config.http_request_timeout, Duration::from_secs(5));
        assert_eq!(config.http_connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_options_fail_in_fixed_order() {
        let err = Config::resolve([ConfigLayer::default()]).unwrap_err();
        assert_eq!(missing(err), ("jira-url", "JIRA_URL"));

        let expectations = [
            (Key::Url, ("jira-user", "JIRA_USER")),
            (Key::User, ("jira-password", "JIRA_PASSWORD")),
            (Key::Password, ("jira-project", "JIRA_PROJECT")),
            (Key::Project, ("jira-issue-type", "JIRA_ISSUE_TYPE")),
        ];
        let mut pairs = Vec::new();
        for (set, expected) in expectations {
            pairs.push((set, "x"));
            let err = Config::resolve([layer(&pairs)]).unwrap_err();
            assert_eq!(missing(err), expected);
        }
    }

    #[test]
    fn missing_message_names_both_spellings() {
        let args = ConfigLayer {
            issue_type: None,
            ..complete_args()
        };
        let err = Config::resolve([args]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--jira-issue-type or JIRA_ISSUE_TYPE environment variable is required"
        );
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = ConfigLayer::from_env_with(|key| {
            (key == "JIRA_TIMEOUT").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "jira-timeout",
                ..
            }
        ));

        let zero = layer(&[(Key::Timeout, "0s")]);
        let err = Config::resolve([complete_args(), zero]).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidField { .. })));
    }

    #[test]
    fn annotations_sit_between_arguments_and_environment() {
        let event = Event::from_slice(
            br#"{
                "entity": {"metadata": {"name": "web-01", "annotations": {
                    "sensu.io/plugins/sensu-jira-handler/config/jira-project": "ENTITY",
                    "sensu.io/plugins/sensu-jira-handler/config/jira-issue-type": "Incident"
                }}},
                "check": {"metadata": {"name": "disk", "annotations": {
                    "sensu.io/plugins/sensu-jira-handler/config/jira-project": "CHECK",
                    "sensu.io/plugins/sensu-jira-handler/config/jira-password": "leaked"
                }}}
            }"#,
        )
        .unwrap();
        let annotations = ConfigLayer::from_annotations(&event).unwrap();
        assert_eq!(annotations.project.as_deref(), Some("CHECK"));
        assert_eq!(annotations.password, None);

        let config = Config::resolve([complete_args(), annotations.clone()]).unwrap();
        assert_eq!(config.project, "CHECK");
        assert_eq!(config.issue_type, "Incident");
        assert_eq!(config.password.expose_secret(), "hunter2");

        let env = env_layer(&[("JIRA_ISSUE_TYPE", "Bug")]);
        let config = Config::resolve([complete_args(), annotations, env]).unwrap();
        assert_eq!(config.issue_type, "Bug");
    }

    #[test]
    fn load_stacks_file_below_arguments_and_annotations() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[jira]\nurl = \"https://file.example.com\"\nuser = \"file-user\"\n\
             password = \"file-secret\"\nproject = \"FILE\"\nissue_type = \"Task\"\n\
             summary = \"{{{{ Name }}}} from file\"\ntimeout = \"7s\""
        )
        .unwrap();
        let args = layer(&[(Key::Project, "ARGS"), (Key::IssueType, "Bug")]);
        let event = Event::from_slice(
            br#"{"check": {"metadata": {"name": "disk", "annotations": {
                "sensu.io/plugins/sensu-jira-handler/config/jira-issue-type": "Incident"
            }}}}"#,
        )
        .unwrap();

        let config = Config::load(Some(file.path()), args, &event).unwrap();
        assert_eq!(config.url, "https://file.example.com");
        assert_eq!(config.user, "file-user");
        assert_eq!(config.password.expose_secret(), "file-secret");
        assert_eq!(config.project, "ARGS");
        assert_eq!(config.issue_type, "Incident");
        assert_eq!(config.summary, "{{ Name }} from file");
        assert_eq!(config.http_request_timeout, Duration::from_secs(7));
    }
}
