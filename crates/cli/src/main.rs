//! Voucherify CLI - campaigns and vouchers from the terminal

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::{Commands, Context};
use config::StateDir;
use std::path::PathBuf;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "voucherify")]
#[command(about = "Manage voucher campaigns and redeem vouchers")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Configuration file (defaults to config.toml in the config directory)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Directory for configuration and session state
    #[arg(short = 'd', long, global = true, env = "VOUCHERIFY_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Backend URL, overriding the configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn context(&self) -> Result<Context> {
        let state = match &self.state_dir {
            Some(dir) => StateDir::with_override(dir),
            None => StateDir::new(),
        };

        let mut config = config::load_client_config(self.config.as_deref(), &state)?;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
            config.validate()?;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = (timeout > 0).then_some(timeout);
        }

        Ok(Context { state, config })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.clone().into())?;

    let ctx = match cli.context() {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    };
    debug!(base_url = %ctx.config.base_url, "Using backend");

    match cli.command.execute(&ctx).await {
        Ok(()) => debug!("Command completed successfully"),
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
