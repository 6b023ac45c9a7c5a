use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "talent_score=debug,warn"
    } else {
        "warn"
    }
}

/// Install the global stderr subscriber. RUST_LOG takes precedence over
/// the `--verbose` default.
pub fn init(verbose: bool) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = default_filter(verbose);
            EnvFilter::try_new(directive)
                .with_context(|| format!("invalid log filter '{}'", directive))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_filter(verbose)).is_ok());
        }
    }
}
