// tests/event_bus.rs
use std::cell::RefCell;
use std::rc::Rc;

use nc_tracker::events::{Event, EventBus, EventKind};
use nc_tracker::router::Tab;

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Box<dyn FnMut(&Event) -> Result<(), Box<dyn std::error::Error>>>) {
    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    let l = Rc::clone(&log);
    let make = move |tag: &'static str| -> Box<dyn FnMut(&Event) -> Result<(), Box<dyn std::error::Error>>> {
        let l = Rc::clone(&l);
        Box::new(move |_e: &Event| {
            l.borrow_mut().push(tag.to_string());
            Ok(())
        })
    };
    (log, make)
}

#[test]
fn listeners_run_in_subscription_order() {
    let (log, make) = recorder();
    let mut bus = EventBus::new();
    bus.on(EventKind::PageLoaded, make("a"));
    bus.on(EventKind::PageLoaded, make("b"));
    bus.on(EventKind::PageLoaded, make("c"));

    bus.emit(&Event::PageLoaded);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn once_fires_a_single_time() {
    let (log, make) = recorder();
    let mut bus = EventBus::new();
    bus.once(EventKind::UserLogout, make("once"));
    bus.on(EventKind::UserLogout, make("always"));

    bus.emit(&Event::UserLogout);
    bus.emit(&Event::UserLogout);
    assert_eq!(*log.borrow(), vec!["once", "always", "always"]);
    assert_eq!(bus.listener_count(EventKind::UserLogout), 1);
}

#[test]
fn off_removes_only_that_listener() {
    let (log, make) = recorder();
    let mut bus = EventBus::new();
    let a = bus.on(EventKind::MainTabChanged, make("a"));
    bus.on(EventKind::MainTabChanged, make("b"));

    assert!(bus.off(a));
    assert!(!bus.off(a), "second off should report nothing removed");

    bus.emit(&Event::MainTabChanged(Tab::Rankings));
    assert_eq!(*log.borrow(), vec!["b"]);
}

#[test]
fn other_kinds_are_not_delivered() {
    let (log, make) = recorder();
    let mut bus = EventBus::new();
    bus.on(EventKind::DataLoaded, make("loaded"));

    bus.emit(&Event::DataLoading { module: "daily".into() });
    assert!(log.borrow().is_empty());
}

#[test]
fn failing_callback_does_not_stop_the_rest() {
    let (log, make) = recorder();
    let mut bus = EventBus::new();
    bus.on(EventKind::PageError, |_e| Err("boom".into()));
    bus.on(EventKind::PageError, make("after"));

    bus.emit(&Event::PageError("x".into()));
    assert_eq!(*log.borrow(), vec!["after"]);
}

#[test]
fn callbacks_see_the_payload() {
    let seen: Rc<RefCell<Option<String>>> = Rc::default();
    let s = Rc::clone(&seen);
    let mut bus = EventBus::new();
    bus.on(EventKind::UserSearch, move |e| {
        if let Event::UserSearch { uid } = e {
            *s.borrow_mut() = Some(uid.clone());
        }
        Ok(())
    });

    bus.emit(&Event::UserSearch { uid: "919247".into() });
    assert_eq!(seen.borrow().as_deref(), Some("919247"));
}
