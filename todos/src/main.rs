//! Terminal front end for the todo list.
//!
//! Reads commands from stdin, one per line, and prints the list after each.
//! Logs go to stderr.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use todos::cli::{self, Input};
use todos::render::render;
use todos::{TodoApp, TodoEnvironment, TodosConfig};
use todos_runtime::metrics::register_metrics;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = TodosConfig::from_env();
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    register_metrics();

    let messages = config.messages().context("loading message catalog")?;
    let app = TodoApp::from_config(TodoEnvironment::production(), &config);

    tracing::info!(filter = %config.default_filter, "Starting todos");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut view = app.view().await;
    print!("{}", render(&view, &messages));

    while let Some(line) = lines.next_line().await? {
        let events = match cli::parse_line(&line, &view.items) {
            Ok(Input::Events(events)) => events,
            Ok(Input::Help) => {
                println!("{}", cli::HELP);
                continue;
            },
            Ok(Input::Quit) => break,
            Err(e) => {
                println!("{e}");
                continue;
            },
        };

        for event in events {
            if let Err(e) = app.handle(event).await {
                tracing::warn!(error = %e, "Event rejected");
                println!("{e}");
            }
        }

        view = app.view().await;
        print!("{}", render(&view, &messages));
    }

    app.shutdown();
    tracing::info!("Shut down");
    Ok(())
}
