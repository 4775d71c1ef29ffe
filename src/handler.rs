use tracing::debug;

use crate::Result;
use crate::config::Config;
use crate::event::Event;
use crate::jira::{CreatedIssue, IssueFields, JiraClient};
use crate::template::TicketTemplates;

/// Render the ticket for `event` without contacting Jira.
///
/// # Errors
///
/// Fails when the event has no check or any of the four templates fails.
pub fn render_ticket(config: &Config, event: &Event) -> Result<IssueFields> {
    let check = event.check()?;
    let fields = TicketTemplates::compile(config)?.render(check)?;
    debug!(
        check = %check.metadata.name,
        project = %fields.project,
        issue_type = %fields.issue_type,
        "rendered ticket fields"
    );
    Ok(fields)
}

/// Open one Jira issue for `event`.
///
/// Every template is rendered before the client is built, so a template
/// failure never reaches the network. Nothing is retried.
///
/// # Errors
///
/// Returns the first template, client construction, or submission error.
pub async fn handle(config: &Config, event: &Event) -> Result<CreatedIssue> {
    let fields = render_ticket(config, event)?;
    let client = JiraClient::from_config(config)?;
    client.create_issue(&fields).await
}
