#[path = "jira-handler/app.rs"]
mod app;
#[path = "jira-handler/cli.rs"]
mod cli;

use std::error::Error as StdError;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse_args();
    match app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

/// Failures go to stdout, where Sensu captures handler output.
fn report_error(err: &jira_handler::error::Error) {
    println!("Error: {err}");
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        println!("  caused by: {cause}");
        source = cause.source();
    }
}
