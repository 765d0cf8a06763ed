use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the CLI
///
/// Logs go to stderr so command output on stdout stays pipeable.
pub fn init_logging(log_level: Level) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(log_level).into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}

fn default_filter(level: Level) -> String {
    let level_str = level.as_str().to_lowercase();
    format!("voucherify={level_str},voucherify_core={level_str},voucherify_http={level_str}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        let filter = default_filter(Level::DEBUG);
        assert_eq!(
            filter,
            "voucherify=debug,voucherify_core=debug,voucherify_http=debug"
        );
        assert!(EnvFilter::try_new(filter).is_ok());
    }
}
