// src/achievements.rs
//
// Badge unlock notices. Remembers which earned badges were already shown
// (`.store/achv_seen.json`) and turns shell events into delayed badge checks.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::api::Badge;
use crate::config::consts::{
    ACHIEVEMENTS_SEEN_FILE, ACHV_CHECK_IN_SETTLE_MS, ACHV_REFOCUS_COOLDOWN_SECS, ACHV_REFOCUS_DELAY_MS,
    ACHV_TAB_ENTER_DELAY_MS,
};
use crate::events::{Event, EventBus, EventKind};
use crate::router::Tab;
use crate::store::{load_json, save_json};

/// Every badge type the site hands out.
pub const ALL_BADGE_TYPES: [u32; 5] = [1, 2, 3, 4, 6];
/// Types a check-in can unlock: daily, solves, misc.
pub const CHECK_IN_BADGE_TYPES: [u32; 3] = [1, 2, 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trigger {
    Login,
    CheckIn,
    TabEnter,
}

/// Work the shell should do on this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AchievementCheck {
    /// First login without a seen list: mark everything earned so far, no notices.
    ColdStart,
    /// Fetch these types and announce what is new.
    Diff(&'static [u32]),
}

#[derive(Debug, Default)]
pub struct AchievementNotifier {
    seen: BTreeSet<String>,
    /// A seen list exists on disk or was built this run.
    primed: bool,
    persist: bool,
    pending: Option<(Instant, &'static [u32])>,
    last_refocus: Option<Instant>,
    inbox: Rc<RefCell<Vec<Trigger>>>,
}

impl AchievementNotifier {
    /// In-memory notifier; nothing is written until [`load_seen`](Self::load_seen).
    pub fn new() -> Self { Self::default() }

    /// Read the seen list from the store and write it back on every change.
    pub fn load_seen(&mut self) {
        match load_json::<BTreeSet<String>>(ACHIEVEMENTS_SEEN_FILE) {
            Ok(ids) => {
                logd!("Achievements: {} badge(s) already seen", ids.len());
                self.seen.extend(ids);
                self.primed = true;
            }
            Err(e) => logd!("Achievements: no seen list ({})", e),
        }
        self.persist = true;
    }

    /// Queue checks from login, check-in and achievements-tab events.
    pub fn attach(&self, bus: &mut EventBus) {
        for kind in [EventKind::UserLogin, EventKind::CheckInSuccess, EventKind::MainTabChanged] {
            let q = Rc::clone(&self.inbox);
            bus.on(kind, move |e| {
                let trigger = match e {
                    Event::UserLogin { .. } => Trigger::Login,
                    Event::CheckInSuccess { .. } => Trigger::CheckIn,
                    Event::MainTabChanged(Tab::Achievements) => Trigger::TabEnter,
                    _ => return Ok(()),
                };
                q.try_borrow_mut()?.push(trigger);
                Ok(())
            });
        }
    }

    /// Window regained focus. At most one check per cooldown.
    pub fn refocused(&mut self, now: Instant) {
        let cooldown = Duration::from_secs(ACHV_REFOCUS_COOLDOWN_SECS);
        if self.last_refocus.is_some_and(|t| now.saturating_duration_since(t) < cooldown) {
            return;
        }
        self.last_refocus = Some(now);
        self.schedule(now + Duration::from_millis(ACHV_REFOCUS_DELAY_MS), &ALL_BADGE_TYPES);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Drain queued events and say what, if anything, is due at `now`.
    /// A cold start goes first; a due diff waits for the next call.
    pub fn poll(&mut self, now: Instant) -> Option<AchievementCheck> {
        let triggers: Vec<Trigger> = match self.inbox.try_borrow_mut() {
            Ok(mut q) => q.drain(..).collect(),
            Err(_) => Vec::new(),
        };
        let mut cold = false;
        for t in triggers {
            match t {
                Trigger::Login => cold |= !self.primed,
                Trigger::CheckIn => {
                    self.schedule(now + Duration::from_millis(ACHV_CHECK_IN_SETTLE_MS), &CHECK_IN_BADGE_TYPES)
                }
                Trigger::TabEnter => self.schedule(now + Duration::from_millis(ACHV_TAB_ENTER_DELAY_MS), &ALL_BADGE_TYPES),
            }
        }
        if cold {
            return Some(AchievementCheck::ColdStart);
        }
        match self.pending {
            Some((at, types)) if now >= at => {
                self.pending = None;
                Some(AchievementCheck::Diff(types))
            }
            _ => None,
        }
    }

    /// Later request wins the time; the wider type list wins the types.
    fn schedule(&mut self, at: Instant, types: &'static [u32]) {
        let types = match self.pending {
            Some((_, prev)) if prev.len() > types.len() => prev,
            _ => types,
        };
        let at = self.pending.map_or(at, |(prev, _)| prev.max(at));
        self.pending = Some((at, types));
    }

    /// Record every earned badge in `badges` without announcing it.
    pub fn mark_seen(&mut self, badges: &[Badge]) -> usize {
        let before = self.seen.len();
        self.seen.extend(badges.iter().filter(|b| b.is_earned() && !b.id.is_empty()).map(|b| b.id.clone()));
        self.primed = true;
        let added = self.seen.len() - before;
        self.save();
        added
    }

    /// Earned badges not shown before, in list order. They count as seen afterwards.
    pub fn take_new(&mut self, badges: &[Badge]) -> Vec<Badge> {
        let mut fresh = Vec::new();
        for b in badges.iter().filter(|b| b.is_earned() && !b.id.is_empty()) {
            if self.seen.insert(b.id.clone()) {
                fresh.push(b.clone());
            }
        }
        self.primed = true;
        if !fresh.is_empty() {
            self.save();
        }
        fresh
    }

    fn save(&self) {
        if !self.persist {
            return;
        }
        if let Err(e) = save_json(ACHIEVEMENTS_SEEN_FILE, &self.seen) {
            loge!("Achievements: save failed: {}", e);
        }
    }
}
