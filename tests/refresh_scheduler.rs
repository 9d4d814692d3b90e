// tests/refresh_scheduler.rs
use std::time::{Duration, Instant};

use nc_tracker::router::ProblemsView;
use nc_tracker::shell::RefreshScheduler;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn fires_when_rows_appear() {
    let t0 = Instant::now();
    let mut s = RefreshScheduler::new();
    s.schedule(ProblemsView::Contests, t0);

    assert!(!s.poll(t0, false));
    assert!(!s.poll(t0 + ms(50), true), "next check is 100ms out");
    assert!(s.poll(t0 + ms(100), true));
    assert_eq!(s.pending_view(), None);
    assert!(!s.poll(t0 + ms(500), true), "nothing pending any more");
}

#[test]
fn gives_up_waiting_after_max_tries() {
    let t0 = Instant::now();
    let mut s = RefreshScheduler::new();
    s.schedule(ProblemsView::Practice, t0);

    let mut fired_at = None;
    for i in 0..30u64 {
        if s.poll(t0 + ms(i * 100), false) {
            fired_at = Some(i);
            break;
        }
    }
    assert_eq!(fired_at, Some(24), "25th check fires without rows");
}

#[test]
fn reschedule_replaces_pending_view() {
    let t0 = Instant::now();
    let mut s = RefreshScheduler::new();
    s.schedule(ProblemsView::Practice, t0);
    s.schedule(ProblemsView::Interview, t0);
    assert_eq!(s.pending_view(), Some(ProblemsView::Interview));

    s.cancel();
    assert_eq!(s.pending_view(), None);
    assert!(!s.poll(t0, true));
}

#[test]
fn close_fires_are_debounced() {
    let t0 = Instant::now();
    let mut s = RefreshScheduler::new();
    assert!(s.try_fire(t0));
    assert!(!s.try_fire(t0 + ms(100)));
    assert!(s.try_fire(t0 + ms(150)));

    // a scheduled refresh shares the same gate
    s.schedule(ProblemsView::Contests, t0 + ms(160));
    assert!(!s.poll(t0 + ms(160), true));
    assert_eq!(s.pending_view(), None, "debounced refresh is dropped, not retried");
}
