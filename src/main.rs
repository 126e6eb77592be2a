//! az-ssh - Entry point
//!
//! Translates an OpenSSH command line and replaces this process with
//! `az ssh`. stdout belongs to the ssh session, so logs go to stderr.

use std::process::ExitCode;

use anyhow::{anyhow, Context};
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use az_ssh::config::{Config, DEFAULT_LOG_FILTER, LOG_ENV_VAR};
use az_ssh::{exec, translate};

fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("az-ssh: {e:#}");
    }

    let config = Config::default();

    let plan = match translate(std::env::args_os().skip(1), &config) {
        Ok(plan) => plan,
        Err(e) => {
            println!("{}", e.usage_report());
            return ExitCode::from(e.exit_code());
        }
    };

    match exec(&plan) {
        Ok(never) => match never {},
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initialize tracing to stderr, filtered by `AZ_SSH_LOG`
fn init_logging() -> anyhow::Result<()> {
    let filter = match std::env::var(LOG_ENV_VAR) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {LOG_ENV_VAR} filter {directives:?}"))
            .unwrap_or_else(|e| {
                eprintln!("az-ssh: {e:#}");
                EnvFilter::new(DEFAULT_LOG_FILTER)
            }),
        Err(_) => EnvFilter::new(DEFAULT_LOG_FILTER),
    };

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
