//! Dispatcher ordering, isolation and re-entrancy.

use std::sync::{Arc, Mutex};

use rookery::{Bot, Event, HandlerError, HandlerId, Origin, Predicate, ReplyTarget};

type Log = Arc<Mutex<Vec<String>>>;

fn recorder(log: Log, tag: &'static str) -> impl Fn(&mut Bot, &Event) -> rookery::HandlerResult {
    move |_bot, _event| {
        log.lock().unwrap().push(tag.to_owned());
        Ok(())
    }
}

#[test]
fn test_handlers_run_in_registration_order() {
    let mut bot = Bot::new("d");
    let log: Log = Arc::default();
    bot.register("ping_test", Predicate::Always, recorder(log.clone(), "first"));
    bot.register("PING_TEST", Predicate::Always, recorder(log.clone(), "second"));
    bot.register("Ping_Test", Predicate::Always, recorder(log.clone(), "third"));

    let ran = bot.dispatch_internal("ping_test", ["x"]);
    assert_eq!(ran, 3);
    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn test_failing_handler_does_not_stop_the_rest() {
    let mut bot = Bot::new("d");
    let log: Log = Arc::default();
    bot.register("work", Predicate::Always, |_bot, _event| {
        Err(HandlerError::Internal("boom".into()))
    });
    bot.register("work", Predicate::Always, |_bot, _event| {
        Err(HandlerError::config("bad input"))
    });
    bot.register("work", Predicate::Always, recorder(log.clone(), "survivor"));

    assert_eq!(bot.dispatch_internal("work", ["x"]), 3);
    assert_eq!(*log.lock().unwrap(), vec!["survivor"]);
    // Only the reportable error reaches the error target.
    assert_eq!(bot.take_diagnostics(), vec!["work: bad input"]);
}

#[test]
fn test_unregister_inside_handler_skips_later_subscription() {
    let mut bot = Bot::new("d");
    let log: Log = Arc::default();
    let victim: Arc<Mutex<Option<HandlerId>>> = Arc::default();

    let slot = Arc::clone(&victim);
    bot.register("tick", Predicate::Always, move |bot, _event| {
        if let Some(id) = slot.lock().unwrap().take() {
            bot.unregister(id);
        }
        Ok(())
    });
    let id = bot.register("tick", Predicate::Always, recorder(log.clone(), "victim"));
    *victim.lock().unwrap() = Some(id);
    bot.register("tick", Predicate::Always, recorder(log.clone(), "after"));

    assert_eq!(bot.dispatch_internal("tick", ["x"]), 2);
    assert_eq!(*log.lock().unwrap(), vec!["after"]);
    assert!(!bot.unregister(id));
}

#[test]
fn test_handler_unregistering_itself_keeps_next_subscription() {
    let mut bot = Bot::new("d");
    let log: Log = Arc::default();
    let own: Arc<Mutex<Option<HandlerId>>> = Arc::default();

    let slot = Arc::clone(&own);
    let id = bot.register("once", Predicate::Always, move |bot, _event| {
        if let Some(id) = slot.lock().unwrap().take() {
            bot.unregister(id);
        }
        Ok(())
    });
    *own.lock().unwrap() = Some(id);
    bot.register("once", Predicate::Always, recorder(log.clone(), "second"));

    assert_eq!(bot.dispatch_internal("once", ["x"]), 2);
    assert_eq!(bot.dispatch_internal("once", ["x"]), 1);
    assert_eq!(*log.lock().unwrap(), vec!["second", "second"]);
    assert!(!bot.unregister(id));
}

#[test]
fn test_handler_registered_during_dispatch_runs_next_time() {
    let mut bot = Bot::new("d");
    let log: Log = Arc::default();
    let inner = Arc::clone(&log);
    bot.register("grow", Predicate::Always, move |bot, _event| {
        let log = Arc::clone(&inner);
        bot.register("grow", Predicate::Always, move |_bot, _event| {
            log.lock().unwrap().push("late".to_owned());
            Ok(())
        });
        Ok(())
    });

    assert_eq!(bot.dispatch_internal("grow", ["x"]), 1);
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(bot.dispatch_internal("grow", ["x"]), 2);
    assert_eq!(*log.lock().unwrap(), vec!["late"]);
}

#[test]
fn test_origin_predicates_filter() {
    let mut bot = Bot::new("d");
    let log: Log = Arc::default();
    bot.register("who_cares", Predicate::network(), recorder(log.clone(), "net"));
    bot.register("who_cares", Predicate::internal(), recorder(log.clone(), "int"));
    bot.register(
        "who_cares",
        Predicate::from_bot("other"),
        recorder(log.clone(), "other bot"),
    );

    bot.dispatch_internal("who_cares", ["x"]);
    bot.handle_line(":srv WHO_CARES x").unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["int", "net"]);
}

#[test]
fn test_handler_ids_are_unique() {
    let mut bot = Bot::new("d");
    let a = bot.register("x", Predicate::Always, |_b, _e| Ok(()));
    assert!(bot.unregister(a));
    let b = bot.register("x", Predicate::Always, |_b, _e| Ok(()));
    assert_ne!(a, b);
}

#[test]
fn test_reply_routing_from_destination() {
    let channel = Event::parse("d", ":n!u@h PRIVMSG #chan :hi").unwrap();
    assert_eq!(channel.reply, ReplyTarget::Notice("#chan".into()));
    let private = Event::parse("d", ":n!u@h PRIVMSG d :hi").unwrap();
    assert_eq!(private.reply, ReplyTarget::Notice("n".into()));
    assert_eq!(private.origin, Origin::Network);
}
