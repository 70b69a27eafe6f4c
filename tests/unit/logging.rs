use super::*;

#[test]
fn flag_wins_over_env() {
    assert_eq!(
        max_level(Some(LogLevel::Trace), Some("error")),
        tracing::Level::TRACE
    );
}

#[test]
fn env_is_used_without_flag() {
    assert_eq!(max_level(None, Some(" WARN ")), tracing::Level::WARN);
    assert_eq!(max_level(None, Some("debug")), tracing::Level::DEBUG);
}

#[test]
fn unknown_or_missing_env_defaults_to_info() {
    assert_eq!(max_level(None, Some("loud")), tracing::Level::INFO);
    assert_eq!(max_level(None, None), tracing::Level::INFO);
}
