// src/events.rs
//
// Minimal publish/subscribe used to decouple the shell from the pages.
// Single-threaded: callbacks are `FnMut` without `Send`.

use std::collections::HashMap;
use std::error::Error;

use crate::router::{ProblemsView, Tab};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    MainTabChanged,
    ViewChanged,
    ContestTabChanged,
    PracticeTabChanged,
    InterviewTabChanged,
    TeamTabChanged,
    DataLoading,
    DataLoaded,
    DataError,
    UserLogin,
    UserLogout,
    UserSearch,
    DailyProblemLoaded,
    CheckInSuccess,
    CardGenerated,
    PageLoaded,
    PageError,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    MainTabChanged(Tab),
    ViewChanged(ProblemsView),
    ContestTabChanged(String),
    PracticeTabChanged(String),
    InterviewTabChanged(String),
    TeamTabChanged(String),
    DataLoading { module: String },
    DataLoaded { module: String },
    DataError { module: String, error: String },
    UserLogin { uid: String },
    UserLogout,
    UserSearch { uid: String },
    DailyProblemLoaded { question_id: String },
    CheckInSuccess { question_id: String },
    CardGenerated { data_url_len: usize },
    PageLoaded,
    PageError(String),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::MainTabChanged(_)        => EventKind::MainTabChanged,
            Event::ViewChanged(_)           => EventKind::ViewChanged,
            Event::ContestTabChanged(_)     => EventKind::ContestTabChanged,
            Event::PracticeTabChanged(_)    => EventKind::PracticeTabChanged,
            Event::InterviewTabChanged(_)   => EventKind::InterviewTabChanged,
            Event::TeamTabChanged(_)        => EventKind::TeamTabChanged,
            Event::DataLoading { .. }       => EventKind::DataLoading,
            Event::DataLoaded { .. }        => EventKind::DataLoaded,
            Event::DataError { .. }         => EventKind::DataError,
            Event::UserLogin { .. }         => EventKind::UserLogin,
            Event::UserLogout               => EventKind::UserLogout,
            Event::UserSearch { .. }        => EventKind::UserSearch,
            Event::DailyProblemLoaded { .. } => EventKind::DailyProblemLoaded,
            Event::CheckInSuccess { .. }    => EventKind::CheckInSuccess,
            Event::CardGenerated { .. }     => EventKind::CardGenerated,
            Event::PageLoaded               => EventKind::PageLoaded,
            Event::PageError(_)             => EventKind::PageError,
        }
    }
}

pub type Callback = Box<dyn FnMut(&Event) -> Result<(), Box<dyn Error>>>;

/// Handle returned by [`EventBus::on`]; pass it to [`EventBus::off`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    kind: EventKind,
    id: u64,
}

struct Listener {
    id: u64,
    once: bool,
    cb: Callback,
}

#[derive(Default)]
pub struct EventBus {
    events: HashMap<EventKind, Vec<Listener>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self { Self::default() }

    pub fn on<F>(&mut self, kind: EventKind, cb: F) -> Subscription
    where
        F: FnMut(&Event) -> Result<(), Box<dyn Error>> + 'static,
    {
        self.add(kind, Box::new(cb), false)
    }

    /// Subscribe for a single delivery.
    pub fn once<F>(&mut self, kind: EventKind, cb: F) -> Subscription
    where
        F: FnMut(&Event) -> Result<(), Box<dyn Error>> + 'static,
    {
        self.add(kind, Box::new(cb), true)
    }

    fn add(&mut self, kind: EventKind, cb: Callback, once: bool) -> Subscription {
        self.next_id += 1;
        let id = self.next_id;
        self.events.entry(kind).or_default().push(Listener { id, once, cb });
        Subscription { kind, id }
    }

    /// Returns false when the subscription was already gone.
    pub fn off(&mut self, sub: Subscription) -> bool {
        let Some(list) = self.events.get_mut(&sub.kind) else { return false };
        let before = list.len();
        list.retain(|l| l.id != sub.id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.events.remove(&sub.kind);
        }
        removed
    }

    /// Deliver to every listener of the event's kind, in subscription order.
    /// A failing callback is logged; the rest still run.
    pub fn emit(&mut self, event: &Event) {
        let kind = event.kind();
        let Some(list) = self.events.get_mut(&kind) else { return };

        for l in list.iter_mut() {
            if let Err(e) = (l.cb)(event) {
                loge!("EventBus: callback for {:?} failed: {}", kind, e);
            }
        }

        list.retain(|l| !l.once);
        if list.is_empty() {
            self.events.remove(&kind);
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.events.get(&kind).map(|v| v.len()).unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
