// tests/achievements.rs
//
// Badge unlock bookkeeping against canned badge lists.
use std::time::{Duration, Instant};

use nc_tracker::achievements::{AchievementCheck, AchievementNotifier, ALL_BADGE_TYPES, CHECK_IN_BADGE_TYPES};
use nc_tracker::api::Badge;
use nc_tracker::events::{Event, EventBus};
use nc_tracker::router::Tab;

fn badge(id: &str, status: u64) -> Badge {
    Badge { id: id.into(), name: format!("badge{id}"), status, ..Default::default() }
}

fn ids(badges: &[Badge]) -> Vec<&str> {
    badges.iter().map(|b| b.id.as_str()).collect()
}

fn attached() -> (AchievementNotifier, EventBus) {
    let n = AchievementNotifier::new();
    let mut bus = EventBus::new();
    n.attach(&mut bus);
    (n, bus)
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn only_earned_unseen_badges_are_new() {
    let mut n = AchievementNotifier::new();
    let list = [badge("1", 1), badge("2", 0), badge("3", 1)];
    let first = n.take_new(&list);
    assert_eq!(ids(&first), vec!["1", "3"]);
    assert!(n.take_new(&list).is_empty(), "each badge is announced once");

    let later = [badge("1", 1), badge("2", 1), badge("3", 1)];
    assert_eq!(ids(&n.take_new(&later)), vec!["2"]);
}

#[test]
fn silent_marking_suppresses_later_notices() {
    let mut n = AchievementNotifier::new();
    assert_eq!(n.mark_seen(&[badge("1", 1), badge("2", 0)]), 1);
    assert_eq!(n.seen_count(), 1);

    let fresh = n.take_new(&[badge("1", 1), badge("2", 1)]);
    assert_eq!(ids(&fresh), vec!["2"]);
}

#[test]
fn acquired_flag_counts_and_blank_ids_are_skipped() {
    let mut n = AchievementNotifier::new();
    let acquired = Badge { id: "9".into(), acquired: true, ..Default::default() };
    let blank = Badge { status: 1, ..Default::default() };
    let fresh = n.take_new(&[acquired, blank, badge("9", 1)]);
    assert_eq!(ids(&fresh), vec!["9"]);
}

#[test]
fn badge_status_decodes_from_strings() {
    let b: Badge = serde_json::from_str(r#"{"id": 12, "name": "连续打卡7天", "status": "1"}"#).unwrap();
    assert!(b.is_earned());
    let b: Badge = serde_json::from_str(r#"{"id": 13, "status": 0}"#).unwrap();
    assert!(!b.is_earned());
}

#[test]
fn login_without_history_cold_starts_once() {
    let (mut n, mut bus) = attached();
    let now = Instant::now();

    bus.emit(&Event::UserLogin { uid: "1".into() });
    assert_eq!(n.poll(now), Some(AchievementCheck::ColdStart));
    n.mark_seen(&[badge("1", 1)]);

    bus.emit(&Event::UserLogin { uid: "1".into() });
    assert_eq!(n.poll(now), None, "a seen list exists now");
}

#[test]
fn check_in_waits_for_the_backend() {
    let (mut n, mut bus) = attached();
    let now = Instant::now();

    bus.emit(&Event::CheckInSuccess { question_id: "11".into() });
    assert_eq!(n.poll(now), None);
    assert!(n.is_pending());
    assert_eq!(n.poll(now + ms(1400)), None);
    assert_eq!(n.poll(now + ms(1500)), Some(AchievementCheck::Diff(&CHECK_IN_BADGE_TYPES)));
    assert!(!n.is_pending());
    assert_eq!(n.poll(now + ms(3000)), None);
}

#[test]
fn only_the_achievements_tab_triggers_a_check() {
    let (mut n, mut bus) = attached();
    let now = Instant::now();

    bus.emit(&Event::MainTabChanged(Tab::Daily));
    assert_eq!(n.poll(now), None);
    assert!(!n.is_pending());

    bus.emit(&Event::MainTabChanged(Tab::Achievements));
    assert_eq!(n.poll(now), None);
    assert_eq!(n.poll(now + ms(500)), Some(AchievementCheck::Diff(&ALL_BADGE_TYPES)));
}

#[test]
fn overlapping_checks_merge() {
    let (mut n, mut bus) = attached();
    let now = Instant::now();

    bus.emit(&Event::CheckInSuccess { question_id: "11".into() });
    bus.emit(&Event::MainTabChanged(Tab::Achievements));
    assert_eq!(n.poll(now), None);
    assert_eq!(n.poll(now + ms(600)), None, "check-in settle time still applies");
    assert_eq!(n.poll(now + ms(1500)), Some(AchievementCheck::Diff(&ALL_BADGE_TYPES)));
}

#[test]
fn refocus_checks_have_a_cooldown() {
    let mut n = AchievementNotifier::new();
    let now = Instant::now();

    n.refocused(now);
    assert_eq!(n.poll(now + ms(300)), Some(AchievementCheck::Diff(&ALL_BADGE_TYPES)));

    n.refocused(now + Duration::from_secs(10));
    assert!(!n.is_pending());

    n.refocused(now + Duration::from_secs(61));
    assert!(n.is_pending());
}
