use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const BODY_PREVIEW_LIMIT: usize = 256;

/// Rendered values for a new issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueFields {
    pub project: String,
    pub issue_type: String,
    pub summary: String,
    pub description: String,
}

/// Identity of an issue Jira accepted.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

#[derive(Serialize)]
pub(super) struct CreateIssueRequest<'a> {
    pub(super) fields: CreateIssueFields<'a>,
}

#[derive(Serialize)]
pub(super) struct CreateIssueFields<'a> {
    pub(super) project: ProjectRef<'a>,
    #[serde(rename = "issuetype")]
    pub(super) issue_type: IssueTypeRef<'a>,
    pub(super) summary: &'a str,
    pub(super) description: &'a str,
}

#[derive(Serialize)]
pub(super) struct ProjectRef<'a> {
    pub(super) key: &'a str,
}

#[derive(Serialize)]
pub(super) struct IssueTypeRef<'a> {
    pub(super) name: &'a str,
}

impl<'a> From<&'a IssueFields> for CreateIssueRequest<'a> {
    fn from(fields: &'a IssueFields) -> Self {
        Self {
            fields: CreateIssueFields {
                project: ProjectRef {
                    key: &fields.project,
                },
                issue_type: IssueTypeRef {
                    name: &fields.issue_type,
                },
                summary: &fields.summary,
                description: &fields.description,
            },
        }
    }
}

/// Error document Jira returns alongside 4xx responses.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorCollection {
    #[serde(default, rename = "errorMessages")]
    pub(super) error_messages: Vec<String>,
    #[serde(default)]
    pub(super) errors: BTreeMap<String, String>,
}

impl ErrorCollection {
    /// Flatten into one line, e.g. `project: valid project is required`.
    pub(super) fn summary(&self) -> Option<String> {
        let parts: Vec<String> = self
            .error_messages
            .iter()
            .cloned()
            .chain(
                self.errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}")),
            )
            .collect();
        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

pub(super) fn body_preview(body: &[u8]) -> String {
    if body.is_empty() {
        return "<empty>".to_string();
    }
    let end = body.len().min(BODY_PREVIEW_LIMIT);
    let mut preview = String::from_utf8_lossy(&body[..end]).to_string();
    if body.len() > BODY_PREVIEW_LIMIT {
        preview.push_str("...");
    }
    preview.replace('\n', "\\n")
}

/// Best description of a rejected request's body.
pub(super) fn rejection_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorCollection>(body)
        .ok()
        .and_then(|errors| errors.summary())
        .unwrap_or_else(|| body_preview(body))
}
