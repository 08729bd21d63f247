use super::*;

#[test]
fn test_default_filter_scopes_our_crates() {
    let filter = default_filter(LogLevel::Debug);
    assert!(filter.contains("distwalk=debug"));
    assert!(filter.contains("distwalk_lib=debug"));
    assert!(EnvFilter::try_new(&filter).is_ok());
}

#[test]
fn test_default_filter_for_every_level_is_valid() {
    for verbosity in 0..=4 {
        let filter = default_filter(LogLevel::from_verbosity(verbosity));
        assert!(
            EnvFilter::try_new(&filter).is_ok(),
            "filter '{}' should parse",
            filter
        );
    }
}

#[test]
fn test_logger_not_initialized_initially() {
    // Other tests in this binary never install the global logger
    assert!(!Logger::is_initialized() || Logger::global().is_some());
}
