use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u64 = env_parse("__SLIDECAST_TEST_MISSING__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__SLIDECAST_TEST_VALID__", "99") };
    let val: u64 = env_parse("__SLIDECAST_TEST_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__SLIDECAST_TEST_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__SLIDECAST_TEST_INVALID__", "soon") };
    let val: u64 = env_parse("__SLIDECAST_TEST_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__SLIDECAST_TEST_INVALID__") };
}

// =============================================================================
// SyncConfig
// =============================================================================

#[test]
fn defaults_match_constants() {
    let config = SyncConfig::default();
    assert_eq!(config.author_poll, Duration::from_millis(2000));
    assert_eq!(config.viewer_poll, Duration::from_millis(1000));
    assert_eq!(config.debounce, Duration::from_millis(300));
    assert_eq!(config.write_attempts, 2);
    assert_eq!(config.write_retry_base, Duration::from_millis(100));
    assert_eq!(config.max_poll_backoff, Duration::from_secs(30));
    assert_eq!(config.http_timeout, Duration::from_secs(5));
}

#[test]
fn from_env_reads_overrides() {
    unsafe {
        std::env::set_var("SLIDECAST_DEBOUNCE_MS", "150");
        std::env::set_var("SLIDECAST_WRITE_ATTEMPTS", "0");
    }
    let config = SyncConfig::from_env();
    assert_eq!(config.debounce, Duration::from_millis(150));
    assert_eq!(config.write_attempts, 1);
    unsafe {
        std::env::remove_var("SLIDECAST_DEBOUNCE_MS");
        std::env::remove_var("SLIDECAST_WRITE_ATTEMPTS");
    }
}

#[test]
fn from_env_floors_zero_poll_intervals() {
    unsafe {
        std::env::set_var("SLIDECAST_AUTHOR_POLL_MS", "0");
        std::env::set_var("SLIDECAST_VIEWER_POLL_MS", "0");
    }
    let config = SyncConfig::from_env();
    assert_eq!(config.author_poll, MIN_POLL_INTERVAL);
    assert_eq!(config.viewer_poll, MIN_POLL_INTERVAL);
    unsafe {
        std::env::remove_var("SLIDECAST_AUTHOR_POLL_MS");
        std::env::remove_var("SLIDECAST_VIEWER_POLL_MS");
    }
}

#[test]
fn zero_interval_in_literal_config_still_backs_off_from_floor() {
    let config = SyncConfig { viewer_poll: Duration::ZERO, author_poll: Duration::ZERO, ..SyncConfig::default() };
    assert_eq!(config.viewer_backoff().delay(), MIN_POLL_INTERVAL);
    assert_eq!(config.author_backoff().delay(), MIN_POLL_INTERVAL);
}

#[test]
fn derived_policies_use_config_values() {
    let config = SyncConfig::default();
    assert_eq!(config.write_retry(), RetryPolicy { attempts: 2, base: Duration::from_millis(100) });
    assert_eq!(config.viewer_backoff().delay(), Duration::from_millis(1000));
    assert_eq!(config.author_backoff().delay(), Duration::from_millis(2000));
}
