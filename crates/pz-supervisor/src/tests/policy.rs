use crate::{RetryPolicy, ServiceEndpoint, SupervisionError};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};

#[test]
fn given_zero_attempts_when_new_policy_then_invalid() {
    let result = RetryPolicy::new(0, 1000);

    assert!(matches!(
        result,
        Err(SupervisionError::InvalidPolicy { .. })
    ));
}

#[test]
fn given_zero_interval_when_new_policy_then_invalid() {
    assert_that!(RetryPolicy::new(3, 0), err(anything()));
}

#[test]
fn given_valid_values_when_new_policy_then_total_wait_is_bounded() {
    assert_that!(RetryPolicy::new(100, 1000), ok(anything()));

    let policy = RetryPolicy::new(100, 1000).unwrap();
    assert_eq!(policy.max_attempts(), 100);
    assert_eq!(policy.interval(), Duration::from_secs(1));
    assert_eq!(policy.max_wait(), Duration::from_secs(100));
}

#[test]
fn given_huge_values_when_max_wait_then_saturates() {
    let policy = RetryPolicy::new(u32::MAX, u64::MAX).unwrap();

    assert_eq!(policy.max_wait(), Duration::from_millis(u64::MAX));
}

#[test]
fn given_port_when_localhost_endpoint_then_url_targets_root() {
    let endpoint = ServiceEndpoint::localhost(7860);

    assert_eq!(endpoint.url(), "http://localhost:7860/");
    assert_eq!(endpoint.to_string(), endpoint.url());
    assert_eq!(endpoint.port(), 7860);
}

#[test]
fn given_each_error_when_recovery_hint_then_distinct_for_startup_failures() {
    let timeout = SupervisionError::timeout(3);
    let status = SupervisionError::unexpected_status(500);
    let cancelled = SupervisionError::cancelled_by_user();

    assert_ne!(timeout.recovery_hint(), status.recovery_hint());
    assert_ne!(timeout.recovery_hint(), cancelled.recovery_hint());
    assert_ne!(status.recovery_hint(), cancelled.recovery_hint());
    assert!(cancelled.is_cancellation());
    assert!(!timeout.is_cancellation());
}
