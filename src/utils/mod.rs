pub mod build_info;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset, empty or unparseable.
pub const DEFAULT_LOG_DIRECTIVE: &str = "trackr_core=info";

/// Installs the global subscriber once. Output goes to stderr so logs never
/// mix with command output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());

        // Another subscriber may already be installed by an embedding application.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_replaces_the_default_directive() {
        let filter = log_filter(Some("trackr_core=debug".into())).to_string();
        assert!(filter.contains("trackr_core=debug"), "{filter}");
        assert!(!filter.contains("trackr_core=info"), "{filter}");
    }

    #[test]
    fn default_applies_without_rust_log() {
        for unset in [None, Some(String::new()), Some("  ".into())] {
            assert_eq!(log_filter(unset).to_string(), DEFAULT_LOG_DIRECTIVE);
        }
    }
}
