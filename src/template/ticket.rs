use crate::config::Config;
use crate::error::TemplateError;
use crate::event::Check;
use crate::jira::IssueFields;

use super::Template;

/// The four compiled templates that make up a ticket.
#[derive(Clone, Debug)]
pub struct TicketTemplates {
    project: Template,
    issue_type: Template,
    summary: Template,
    description: Template,
}

impl TicketTemplates {
    /// Compile every ticket template from the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns the first template that fails to compile, in the order
    /// project, issue type, summary, description.
    pub fn compile(config: &Config) -> std::result::Result<Self, TemplateError> {
        Ok(Self {
            project: Template::parse("project", &config.project)?,
            issue_type: Template::parse("issueType", &config.issue_type)?,
            summary: Template::parse("summary", &config.summary)?,
            description: Template::parse("description", &config.description)?,
        })
    }

    /// # Errors
    ///
    /// Returns the first render failure; nothing is partially returned.
    pub fn render(&self, check: &Check) -> std::result::Result<IssueFields, TemplateError> {
        Ok(IssueFields {
            project: self.project.render(check)?,
            issue_type: self.issue_type.render(check)?,
            summary: self.summary.render(check)?,
            description: self.description.render(check)?,
        })
    }
}
