use anyhow::Result;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging based on verbosity level
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ava_init=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ava_init=warn"))
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if verbose {
        tracing::debug!("Verbose logging enabled");
    }

    Ok(())
}

/// Log system information for debugging
pub fn log_system_info() {
    tracing::debug!(
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        version = env!("CARGO_PKG_VERSION"),
        "System information"
    );
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Log how long a step took
pub fn log_performance(operation: &str, duration: Duration) {
    tracing::debug!(
        operation = operation,
        duration_ms = duration_millis(duration),
        "Operation performance"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_verbose() {
        // It might fail if already initialized, which is ok
        let _ = init_logging(true);
    }

    #[test]
    fn test_init_logging_normal() {
        let _ = init_logging(false);
    }

    #[test]
    fn test_logging_functions() {
        log_system_info();
        log_performance("init", Duration::from_millis(150));
    }

    #[test]
    fn test_duration_millis_saturates() {
        assert_eq!(duration_millis(Duration::from_millis(150)), 150);
        assert_eq!(duration_millis(Duration::from_micros(999)), 0);
        assert_eq!(duration_millis(Duration::MAX), u64::MAX);
        log_performance("init", Duration::MAX);
    }
}
