use std::time::Duration;

pub(super) const DEFAULT_SUMMARY: &str = "Check {{ Name }} fired with status {{ Status }}";
pub(super) const DEFAULT_DESCRIPTION: &str = "{{ Output }}";

pub(super) fn default_summary() -> String {
    DEFAULT_SUMMARY.to_string()
}

pub(super) fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

pub(super) const fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

pub(super) const fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}
