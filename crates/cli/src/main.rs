//! `maquila` -- product batch catalog administration and verification.
//!
//! Talks to the external catalog service over HTTP. Every create/update is
//! validated locally before anything is sent.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 | Description                  |
//! |------------------------|----------|-------------------------|------------------------------|
//! | `API_URL`              | no       | `http://localhost:8081` | Backend origin               |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                    | HTTP request timeout         |
//! | `RUST_LOG`             | no       | `maquila_cli=info,maquila_client=info` | Log filter    |

use std::process::ExitCode;

use clap::Parser;
use maquila_client::ClientError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maquila_cli=info,maquila_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            let message = match err.downcast_ref::<ClientError>() {
                Some(client_err) => client_err.user_message(),
                None => format!("{err:#}"),
            };
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
