//! Tracing subscriber setup.
//!
//! `RUST_LOG` always wins. Otherwise a bare level such as `debug` applies
//! to the Cutframe crates only and everything else stays at `warn`; a
//! full directive string is passed through untouched.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Crate targets that a bare level applies to.
const CUTFRAME_TARGETS: &[&str] = &[
    "cutframe",
    "cutframe_common",
    "cutframe_timeline_model",
    "cutframe_processing_core",
    "cutframe_render_engine",
];

/// Filter directives for a configured level.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return filter_directives("info");
    }
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    let mut directives = vec!["warn".to_string()];
    directives.extend(CUTFRAME_TARGETS.iter().map(|t| format!("{t}={level}")));
    directives.join(",")
}

/// Install the global subscriber. Returns `false` if one was already set.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish()).is_ok()
    } else {
        tracing::subscriber::set_global_default(builder.with_target(true).finish()).is_ok()
    };

    if installed {
        tracing::debug!(level = %config.level, json = config.json, "Logging initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_scopes_to_cutframe_crates() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("cutframe_processing_core=debug"));
        assert!(!directives.contains("=info"));
    }

    #[test]
    fn test_full_directive_passes_through() {
        assert_eq!(
            filter_directives("cutframe_render_engine=trace,info"),
            "cutframe_render_engine=trace,info"
        );
    }

    #[test]
    fn test_empty_level_defaults_to_info() {
        assert!(filter_directives("  ").contains("cutframe_common=info"));
    }
}
