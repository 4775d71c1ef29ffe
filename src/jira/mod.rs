pub(crate) mod client;
pub(crate) mod models;

pub use client::JiraClient;
pub use models::{CreatedIssue, IssueFields};
