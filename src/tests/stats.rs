use core::time::Duration;

use crate::{Stats, time};

#[test]
fn empty_summary() {
    let stats = Stats::new();
    assert_eq!(stats.count(), 0);
    assert_eq!(stats.mean(), 0.0);
    assert_eq!(stats.stddev(), 0.0);
    assert_eq!(stats.min(), None);
    assert_eq!(stats.max(), None);
}

#[test]
fn mean_stddev_min_max() {
    let mut stats = Stats::default();
    for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
        stats.add(value);
    }
    assert_eq!(stats.count(), 8);
    assert!((stats.mean() - 5.0).abs() < 1e-12);
    assert!((stats.stddev() - 2.0).abs() < 1e-12);
    assert_eq!(stats.min(), Some(2.0));
    assert_eq!(stats.max(), Some(9.0));
}

#[test]
fn single_sample_has_no_spread() {
    let mut stats = Stats::new();
    stats.add_duration(Duration::from_millis(3));
    assert_eq!(stats.stddev(), 0.0);
    assert!((stats.mean() - 0.003).abs() < 1e-12);
}

#[test]
fn durations_render_in_milliseconds() {
    let mut stats = Stats::new();
    stats.extend([Duration::from_millis(1), Duration::from_millis(3)]);
    let rendered = stats.display("run").to_string();
    assert_eq!(
        rendered,
        "run: mean=2.000 ms, stddev=1.000 ms, min=1.000 ms, max=3.000 ms (n=2)"
    );
}

#[test]
fn time_returns_result_and_elapsed() {
    let (value, elapsed) = time("sleep", || {
        std::thread::sleep(Duration::from_millis(2));
        42
    });
    assert_eq!(value, 42);
    assert!(elapsed >= Duration::from_millis(2));
}
