use crate::core::config::LoggingConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Connection-level chatter from the HTTP stack is capped at `warn`
/// unless `RUST_LOG` asks for it explicitly.
const QUIET_DEPENDENCIES: &[&str] = &["hyper=warn", "hyper_util=warn"];

fn build_filter(level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    QUIET_DEPENDENCIES
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(EnvFilter::new(level), EnvFilter::add_directive)
}

/// Install the global subscriber: JSON lines for log shippers, or a
/// human-readable console layout when `console` is set.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = build_filter(&config.level);

    if config.console || config.format == "console" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_line_number(true),
            )
            .init();
        return;
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_keeps_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let rendered = build_filter("debug").to_string();
        assert!(rendered.contains("debug"));
        assert!(rendered.contains("hyper=warn"));
    }
}
