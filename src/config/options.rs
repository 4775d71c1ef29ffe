/// Every configurable option, with the spellings it is known by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Url,
    User,
    Password,
    Project,
    IssueType,
    Summary,
    Description,
    Timeout,
}

/// Annotation prefix under which an event may override options.
pub const ANNOTATION_PREFIX: &str = "sensu.io/plugins/sensu-jira-handler/config/";

impl Key {
    pub const ALL: [Self; 8] = [
        Self::Url,
        Self::User,
        Self::Password,
        Self::Project,
        Self::IssueType,
        Self::Summary,
        Self::Description,
        Self::Timeout,
    ];

    /// Required options, in the order they are checked.
    pub const REQUIRED: [Self; 5] = [
        Self::Url,
        Self::User,
        Self::Password,
        Self::Project,
        Self::IssueType,
    ];

    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Url => "jira-url",
            Self::User => "jira-user",
            Self::Password => "jira-password",
            Self::Project => "jira-project",
            Self::IssueType => "jira-issue-type",
            Self::Summary => "jira-summary",
            Self::Description => "jira-description",
            Self::Timeout => "jira-timeout",
        }
    }

    #[must_use]
    pub const fn env(self) -> &'static str {
        match self {
            Self::Url => "JIRA_URL",
            Self::User => "JIRA_USER",
            Self::Password => "JIRA_PASSWORD",
            Self::Project => "JIRA_PROJECT",
            Self::IssueType => "JIRA_ISSUE_TYPE",
            Self::Summary => "JIRA_SUMMARY",
            Self::Description => "JIRA_DESCRIPTION",
            Self::Timeout => "JIRA_TIMEOUT",
        }
    }

    /// Secrets and transport settings cannot be changed from event annotations.
    #[must_use]
    pub const fn annotatable(self) -> bool {
        !matches!(self, Self::Password | Self::Timeout)
    }

    #[must_use]
    pub fn annotation(self) -> String {
        format!("{ANNOTATION_PREFIX}{}", self.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::Key;

    #[test]
    fn annotation_keys_follow_flag_names() {
        assert_eq!(
            Key::Project.annotation(),
            "sensu.io/plugins/sensu-jira-handler/config/jira-project"
        );
        assert!(!Key::Password.annotatable());
    }

    #[test]
    fn required_options_exclude_templates() {
        assert!(!Key::REQUIRED.contains(&Key::Summary));
        assert!(!Key::REQUIRED.contains(&Key::Description));
        assert_eq!(Key::REQUIRED[0], Key::Url);
    }
}
