//! Listener registry behaviour through the public API.

use herald::{
    Callback, Context, Emitter, ListenerFilter, ListenerMeta, Priority, Symbol,
    testing::{CallLog, RecordingListener, failing_listener},
};
use std::{cell::RefCell, rc::Rc};

mod common;
use common::{DocEvent, reentrant, shared_emitter};

#[test]
fn test_dispatch_in_ascending_priority() {
    let log = CallLog::new();
    let emitter = Emitter::<&str, ()>::new();
    emitter.on_with_priority("x", log.listener("A"), 10).unwrap();
    emitter.on_with_priority("x", log.listener("B"), -5).unwrap();
    emitter.on_with_priority("x", log.listener("C"), 0).unwrap();

    assert!(emitter.dispatch(&"x", &()).unwrap());
    assert_eq!(log.entries(), ["B", "C", "A"]);
}

#[test]
fn test_distinct_priorities_strictly_ascending() {
    let log = CallLog::new();
    let emitter = Emitter::<&str, ()>::new();
    let priorities = [
        Priority::LOWEST,
        Priority::NORMAL,
        Priority::HIGHEST,
        Priority::LOW,
        Priority::HIGHER,
        Priority::LOWER,
        Priority::HIGH,
    ];
    for p in priorities {
        emitter
            .on_with_priority("x", log.listener(&p.get().to_string()), p)
            .unwrap();
    }

    emitter.dispatch(&"x", &()).unwrap();
    let fired: Vec<i32> = log.entries().iter().map(|s| s.parse().unwrap()).collect();
    assert_eq!(fired, [-1000, -100, -10, 0, 10, 100, 1000]);
}

#[test]
fn test_equal_priorities_keep_registration_order() {
    let log = CallLog::new();
    let emitter = Emitter::<DocEvent, ()>::new();
    for name in ["first", "second", "third"] {
        emitter
            .on_with_priority(DocEvent::Saved, log.listener(name), Priority::LOW)
            .unwrap();
    }
    emitter
        .on_with_priority(DocEvent::Saved, log.listener("urgent"), Priority::HIGH)
        .unwrap();

    emitter.dispatch(&DocEvent::Saved, &()).unwrap();
    assert_eq!(log.entries(), ["urgent", "first", "second", "third"]);
}

#[test]
fn test_args_reach_every_listener() {
    let a = RecordingListener::<(u32, String)>::new();
    let b = RecordingListener::<(u32, String)>::new();
    let emitter = Emitter::<DocEvent, (u32, String)>::new();
    emitter.on(DocEvent::Opened, a.callback()).unwrap();
    emitter.on(DocEvent::Opened, b.callback()).unwrap();

    emitter
        .emit(&DocEvent::Opened, &(7, "notes.md".to_string()))
        .unwrap();
    assert_eq!(a.calls(), [(7, "notes.md".to_string())]);
    assert_eq!(b.call_count(), 1);
}

#[test]
fn test_once_listener_fires_exactly_once() {
    let recorder = RecordingListener::<u32>::new();
    let emitter = Emitter::<DocEvent, u32>::new();
    emitter.once(DocEvent::Saved, recorder.callback()).unwrap();
    emitter.on(DocEvent::Saved, Callback::infallible(|_: &u32| {})).unwrap();

    emitter.dispatch(&DocEvent::Saved, &1).unwrap();
    assert!(!emitter.listeners(&DocEvent::Saved).contains(&recorder.callback()));

    for n in 2..5 {
        emitter.dispatch(&DocEvent::Saved, &n).unwrap();
    }
    assert_eq!(recorder.calls(), [1]);
}

#[test]
fn test_removing_all_listeners_drops_event_name() {
    let emitter = Emitter::<DocEvent, ()>::new();
    let save = Callback::infallible(|_: &()| {});
    let close = Callback::infallible(|_: &()| {});
    emitter.on(DocEvent::Saved, save.clone()).unwrap();
    emitter.on(DocEvent::Saved, save.clone()).unwrap();
    emitter.on(DocEvent::Closed, close.clone()).unwrap();

    emitter.off(&DocEvent::Saved, &save);
    assert_eq!(emitter.event_names(), [DocEvent::Closed]);
    assert_eq!(emitter.listener_count(&DocEvent::Saved), 0);

    emitter.remove_all_listeners(None);
    assert!(emitter.event_names().is_empty());
}

#[test]
fn test_dispatch_with_no_listeners_has_no_effect() {
    let emitter = Emitter::<DocEvent, ()>::new();
    assert!(!emitter.dispatch(&DocEvent::Opened, &()).unwrap());
    assert!(emitter.event_names().is_empty());
    assert_eq!(format!("{emitter:?}"), "{}");
}

#[test]
fn test_symbol_events_do_not_collide() {
    let log = CallLog::new();
    let ready = Symbol::described("ready");
    let also_ready = Symbol::described("ready");
    let emitter = Emitter::<Symbol, ()>::new();
    emitter.on(ready, log.listener("first")).unwrap();
    emitter.on(also_ready, log.listener("second")).unwrap();

    emitter.dispatch(&ready, &()).unwrap();
    assert_eq!(log.entries(), ["first"]);
    assert_eq!(emitter.event_names().len(), 2);
}

#[test]
fn test_off_by_context() {
    let emitter = Emitter::<DocEvent, ()>::new();
    let owner = Context::new();
    let cb = Callback::infallible(|_: &()| {});
    emitter
        .register(DocEvent::Saved, cb.clone(), ListenerMeta::new().with_context(owner))
        .unwrap();
    emitter.on(DocEvent::Saved, cb.clone()).unwrap();

    emitter.unregister(&DocEvent::Saved, &cb, ListenerFilter::new().context(owner));
    assert_eq!(emitter.listener_count(&DocEvent::Saved), 1);
}

// ============================================================================
// Mutation during dispatch
// ============================================================================

#[test]
fn test_listener_added_during_dispatch_waits_for_next_pass() {
    let log = CallLog::new();
    let emitter = shared_emitter::<()>();
    let late = log.listener("late");
    let adder = {
        let log = log.clone();
        reentrant(&emitter, move |emitter| {
            log.push("adder");
            emitter.on_with_priority(DocEvent::Saved, late.clone(), Priority::LOWEST)?;
            Ok(())
        })
    };
    emitter.once(DocEvent::Saved, adder).unwrap();

    emitter.dispatch(&DocEvent::Saved, &()).unwrap();
    assert_eq!(log.entries(), ["adder"]);

    emitter.dispatch(&DocEvent::Saved, &()).unwrap();
    assert_eq!(log.entries(), ["adder", "late"]);
}

#[test]
fn test_once_removal_does_not_skip_neighbour() {
    let log = CallLog::new();
    let emitter = Emitter::<DocEvent, ()>::new();
    emitter.once(DocEvent::Saved, log.listener("a")).unwrap();
    emitter.once(DocEvent::Saved, log.listener("b")).unwrap();
    emitter.on(DocEvent::Saved, log.listener("c")).unwrap();
    emitter.once(DocEvent::Saved, log.listener("d")).unwrap();

    emitter.dispatch(&DocEvent::Saved, &()).unwrap();
    assert_eq!(log.entries(), ["a", "b", "c", "d"]);
    assert_eq!(emitter.listener_count(&DocEvent::Saved), 1);

    log.clear();
    emitter.dispatch(&DocEvent::Saved, &()).unwrap();
    assert_eq!(log.entries(), ["c"]);
}

#[test]
fn test_listener_removed_during_dispatch_is_skipped() {
    let log = CallLog::new();
    let emitter = shared_emitter::<()>();
    let victim = log.listener("victim");
    let remover = {
        let victim = victim.clone();
        reentrant(&emitter, move |emitter| {
            emitter.off(&DocEvent::Saved, &victim);
            Ok(())
        })
    };
    emitter.on_with_priority(DocEvent::Saved, remover, Priority::HIGH).unwrap();
    emitter.on(DocEvent::Saved, victim).unwrap();

    assert!(emitter.dispatch(&DocEvent::Saved, &()).unwrap());
    assert!(log.is_empty());
    assert_eq!(emitter.listener_count(&DocEvent::Saved), 1);
}

#[test]
fn test_reentrant_dispatch_never_repeats_once_listener() {
    let hits = Rc::new(RefCell::new(0));
    let emitter = shared_emitter::<()>();
    let trigger = reentrant(&emitter, |emitter| {
        emitter.dispatch(&DocEvent::Opened, &())?;
        Ok(())
    });
    let counter = {
        let hits = hits.clone();
        Callback::infallible(move |_: &()| *hits.borrow_mut() += 1)
    };
    emitter.on(DocEvent::Saved, trigger).unwrap();
    emitter.once(DocEvent::Opened, counter).unwrap();

    emitter.dispatch(&DocEvent::Saved, &()).unwrap();
    emitter.dispatch(&DocEvent::Saved, &()).unwrap();
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn test_failing_listener_aborts_remaining_listeners() {
    let log = CallLog::new();
    let emitter = Emitter::<DocEvent, ()>::new();
    emitter.on_with_priority(DocEvent::Closed, log.listener("first"), -1).unwrap();
    emitter.on(DocEvent::Closed, failing_listener("disk full")).unwrap();
    emitter.on_with_priority(DocEvent::Closed, log.listener("never"), 1).unwrap();

    let err = emitter.dispatch(&DocEvent::Closed, &()).unwrap_err();
    assert!(err.to_string().contains("Closed"));
    assert_eq!(err.into_listener_error().unwrap().to_string(), "disk full");
    assert_eq!(log.entries(), ["first"]);
    assert_eq!(emitter.listener_count(&DocEvent::Closed), 3);
}

#[test]
fn test_failing_once_listener_is_still_consumed() {
    let emitter = Emitter::<DocEvent, ()>::new();
    emitter.once(DocEvent::Closed, failing_listener("boom")).unwrap();

    assert!(emitter.dispatch(&DocEvent::Closed, &()).is_err());
    assert!(!emitter.dispatch(&DocEvent::Closed, &()).unwrap());
}

#[test]
fn test_dropped_receiver_cannot_register() {
    let emitter = Emitter::<DocEvent, ()>::new();
    let receiver = Rc::new(RefCell::new(Vec::<u32>::new()));
    let cb = Callback::bound(&receiver, |r: &RefCell<Vec<u32>>, _: &()| {
        r.borrow_mut().push(1);
        Ok(())
    });
    emitter.on(DocEvent::Opened, cb.clone()).unwrap();
    emitter.dispatch(&DocEvent::Opened, &()).unwrap();
    assert_eq!(*receiver.borrow(), [1]);

    drop(receiver);
    assert!(emitter.on(DocEvent::Saved, cb).unwrap_err().is_invalid_argument());
    assert!(!emitter.event_names().contains(&DocEvent::Saved));

    // The registration made while the receiver was alive goes on the next pass.
    assert_eq!(emitter.listener_count(&DocEvent::Opened), 1);
    assert!(!emitter.dispatch(&DocEvent::Opened, &()).unwrap());
    assert!(emitter.event_names().is_empty());
}
