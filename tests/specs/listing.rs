//! Library specs: listing against real worker processes.

use std::path::Path;
use std::time::{Duration, Instant};

use suitelist::{ListTestError, Lister, TestDescriptor, list_tests_of_file};

use crate::prelude::*;

fn lister() -> Lister {
    Lister::new(Some("sh".into()))
}

/// > Exit 0 with a JSON array yields that array unmodified
#[test]
fn lists_real_worker_output() {
    let tests = lister()
        .list(
            Duration::from_secs(10),
            &worker("list"),
            "",
            Path::new("suite.js"),
        )
        .unwrap();

    assert_eq!(
        tests,
        vec![TestDescriptor::new("suite.js", vec!["should succeed".into()])]
    );
}

/// > A hung worker is SIGKILLed and reported as a timeout
#[test]
fn kills_hung_worker() {
    let start = Instant::now();
    let err = lister()
        .list(
            Duration::from_millis(10),
            &worker("hang"),
            "",
            Path::new("stuck.js"),
        )
        .unwrap_err();

    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(err.is_timeout());
    assert!(matches!(err, ListTestError::Timeout { .. }));
    assert_eq!(err.message(), "Timed out while listing tests of stuck.js");
}

/// > The kill cannot be caught: a worker ignoring SIGTERM still dies
#[test]
fn kills_worker_that_ignores_sigterm() {
    let start = Instant::now();
    let err = lister()
        .list(
            Duration::from_millis(100),
            &worker("stubborn"),
            "",
            Path::new("stubborn.js"),
        )
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(start.elapsed() < Duration::from_secs(5));
}

/// > Once the worker exits the timer has no further effect, even while a
/// > background child keeps its stdout open
#[test]
fn exited_worker_is_not_timed_out_by_lingering_child() {
    let start = Instant::now();
    let tests = lister()
        .list(
            Duration::from_secs(1),
            &worker("orphan"),
            "",
            Path::new("o.js"),
        )
        .unwrap();

    assert_eq!(tests, vec![TestDescriptor::new("o.js", vec!["ok".into()])]);
    assert!(start.elapsed() < Duration::from_secs(2));
}

/// > With no timeout, a lingering child does not keep the listing waiting
#[test]
fn zero_timeout_does_not_wait_for_lingering_child() {
    let start = Instant::now();
    let tests = lister()
        .list(Duration::ZERO, &worker("orphan"), "", Path::new("o.js"))
        .unwrap();

    assert_eq!(tests.len(), 1);
    assert!(start.elapsed() < Duration::from_secs(2));
}

/// > Nonzero exit carries the worker's stderr in the stack
#[test]
fn nonzero_exit_carries_stderr() {
    let err = lister()
        .list(
            Duration::from_secs(10),
            &worker("syntax_error"),
            "",
            Path::new("broken.js"),
        )
        .unwrap_err();

    assert!(err.message().contains("Failed to process broken.js"));
    assert!(err.stack().contains("broken.js:3\nSyntaxError: Unexpected identifier"));
}

/// > Concurrent requests share nothing
#[test]
fn concurrent_requests_do_not_interfere() {
    let lister = lister();
    let (hung, ok) = std::thread::scope(|s| {
        let hung = s.spawn(|| {
            lister.list(
                Duration::from_millis(50),
                &worker("hang"),
                "",
                Path::new("stuck.js"),
            )
        });
        let ok = s.spawn(|| {
            lister.list(
                Duration::from_secs(10),
                &worker("echo_param"),
                "mine",
                Path::new("ok.js"),
            )
        });
        (hung.join().unwrap(), ok.join().unwrap())
    });

    assert!(hung.unwrap_err().is_timeout());
    assert_eq!(ok.unwrap()[0].path.path, vec!["mine"]);
}

/// > The default launcher reports a missing interface as a load failure
#[test]
fn default_launcher_reports_load_failure() {
    let err = list_tests_of_file(
        Duration::from_secs(30),
        Path::new("/nonexistent/suitelist/iface.js"),
        "",
        Path::new("suite.js"),
    )
    .unwrap_err();

    assert!(!err.is_timeout());
    assert!(err.message().starts_with("Failed to process suite.js: "));
}
