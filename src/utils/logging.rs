use std::env;
use std::str::FromStr;
use tracing::Level;
use crate::core::domain::ENV_LOG_LEVEL;

pub fn setup_tracing() {
    let level = parse_level(env::var(ENV_LOG_LEVEL).ok().as_deref());
    tracing_subscriber::fmt()
        .with_max_level(level)
        // module names only add noise to every log line
        .with_target(false)
        // CloudWatch renders ANSI color codes verbatim
        .with_ansi(false)
        // CloudWatch stamps the ingestion time itself
        .without_time()
        .json()
        .init();
}

// Unknown or missing levels fall back to INFO.
pub fn parse_level(level: Option<&str>) -> Level {
    level.and_then(|l| Level::from_str(l.trim()).ok()).unwrap_or(Level::INFO)
}

#[cfg(test)]
mod tests {
    use tracing::Level;
    use crate::utils::logging::parse_level;

    #[tokio::test]
    async fn test_should_parse_level() {
        assert_eq!(Level::DEBUG, parse_level(Some("debug")));
        assert_eq!(Level::WARN, parse_level(Some(" WARN ")));
        assert_eq!(Level::INFO, parse_level(Some("chatty")));
        assert_eq!(Level::INFO, parse_level(None));
    }
}
