use std::thread;

use crate::StartSignal;

#[test]
fn fire_releases_waiters() {
    let signal = StartSignal::new();
    assert!(!signal.is_fired());

    thread::scope(|s| {
        let waiters: Vec<_> = (0..4).map(|_| s.spawn(|| signal.wait())).collect();
        signal.fire();
        for waiter in waiters {
            waiter.join().unwrap();
        }
    });

    assert!(signal.is_fired());
}

#[test]
fn reset_rearms() {
    let signal = StartSignal::default();
    signal.fire();
    signal.wait();
    signal.reset();
    assert!(!signal.is_fired());
}
