#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod jira;
pub mod telemetry;
pub mod template;

pub type Result<T> = std::result::Result<T, error::Error>;
