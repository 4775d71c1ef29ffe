use std::io;

use jira_handler::Result;
use jira_handler::config::Config;
use jira_handler::event::Event;
use jira_handler::handler::handle;
use jira_handler::telemetry::init_tracing;
use tracing::debug;

use super::cli::Cli;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let event = Event::from_reader(io::stdin().lock())?;
    let args = cli.config_layer()?;
    let config = Config::load(cli.config.as_deref(), args, &event)?;
    debug!(
        url = %config.url,
        user = %config.user,
        project = %config.project,
        issue_type = %config.issue_type,
        "configuration resolved"
    );

    handle(&config, &event).await?;
    Ok(())
}
