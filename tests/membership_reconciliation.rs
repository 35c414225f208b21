//! Entity graph reconciliation from network lines.

mod common;
use common::TestBot;

#[test]
fn test_graph_stays_consistent_through_a_session() {
    let mut t = TestBot::registered("rook");
    t.feed(&[
        ":rook!r@bot.host JOIN #a",
        ":rook!r@bot.host JOIN #b",
        ":irc.test 352 rook #a al a.host irc.test alice H@ :0 Alice",
        ":irc.test 352 rook #a bo b.host irc.test bob H+ :0 Bob",
        ":irc.test 352 rook #b al a.host irc.test alice H :0 Alice",
        ":carol!c@c.host JOIN #b",
        ":bob!bo@b.host NICK :robert",
        ":alice!al@a.host PART #a",
        ":carol!c@c.host QUIT :bye",
        ":robert!bo@b.host KICK #a rook :out",
    ]);
    t.assert_consistent();

    let graph = t.bot.graph();
    assert!(graph.channel_id("#a").is_none());
    assert!(graph.client_by_nick("robert").is_none());
    assert!(t.is_on("alice", "#b"));
    assert_eq!(graph.channel_by_name("#b").unwrap().member_count(), 2);
}

#[test]
fn test_legacy_who_creates_exactly_one_client_and_membership() {
    let mut t = TestBot::registered("rook");
    t.feed(&[":rook!r@bot.host JOIN #chan"]);
    assert_eq!(t.sent(), vec!["WHO #chan"]);

    let clients = t.bot.graph().client_count();
    let memberships = t.bot.graph().membership_count();
    t.feed(&[":irc.test 352 rook #chan al a.host irc.test alice H@ :0 Alice"]);

    assert_eq!(t.bot.graph().client_count(), clients + 1);
    assert_eq!(t.bot.graph().membership_count(), memberships + 1);
    assert_eq!(t.account_of("alice").as_deref(), Some("*"));

    // A repeat reply changes nothing structurally.
    t.feed(&[":irc.test 352 rook #chan al a.host irc.test alice H@ :0 Alice"]);
    assert_eq!(t.bot.graph().client_count(), clients + 1);
    assert_eq!(t.bot.graph().membership_count(), memberships + 1);
    t.assert_consistent();
}

#[test]
fn test_whox_round_trip_with_identity_tracking() {
    let mut t = TestBot::tracking("rook");
    t.feed(&[":rook!r@bot.host JOIN #chan * :Rook"]);
    assert_eq!(t.sent(), vec!["WHO #chan %cnuhaft,524"]);

    t.feed(&[
        ":irc.test 354 rook 524 #chan al a.host alice H@ alice_acct",
        ":irc.test 354 rook 524 #chan bo b.host bob H 0",
        ":irc.test 315 rook #chan :End of WHO list",
        ":carol!c@c.host JOIN #chan carol_acct :Carol",
        ":dave!d@d.host JOIN #chan * :Dave",
    ]);

    assert_eq!(t.account_of("alice").as_deref(), Some("alice_acct"));
    assert_eq!(t.account_of("bob").as_deref(), Some(""));
    assert_eq!(t.account_of("carol").as_deref(), Some("carol_acct"));
    assert_eq!(t.account_of("dave").as_deref(), Some("*"));

    t.feed(&[
        ":bob!bo@b.host ACCOUNT bob_acct",
        ":alice!al@a.host ACCOUNT *",
    ]);
    assert_eq!(t.account_of("bob").as_deref(), Some("bob_acct"));
    assert_eq!(t.account_of("alice").as_deref(), Some("*"));
    t.assert_consistent();
}

#[test]
fn test_foreign_whox_token_changes_nothing() {
    let mut t = TestBot::tracking("rook");
    t.feed(&[":rook!r@bot.host JOIN #chan"]);
    let before = (
        t.bot.graph().client_count(),
        t.bot.graph().channel_count(),
        t.bot.graph().membership_count(),
    );
    t.feed(&[
        ":irc.test 354 rook 1 #chan al a.host alice H@ alice_acct",
        ":irc.test 354 rook 524 #chan al a.host",
    ]);
    let after = (
        t.bot.graph().client_count(),
        t.bot.graph().channel_count(),
        t.bot.graph().membership_count(),
    );
    assert_eq!(before, after);
}

#[test]
fn test_self_part_removes_channel_and_prunes() {
    let mut t = TestBot::registered("rook");
    t.feed(&[
        ":rook!r@bot.host JOIN #a",
        ":rook!r@bot.host JOIN #b",
        ":x!x@x.host JOIN #a",
        ":y!y@y.host JOIN #a",
        ":y!y@y.host JOIN #b",
        ":rook!r@bot.host PART #a :later",
    ]);
    let graph = t.bot.graph();
    assert!(graph.channel_id("#a").is_none());
    assert!(graph.client_by_nick("x").is_none());
    assert!(t.is_on("y", "#b"));
    assert!(t.is_on("rook", "#b"));
    t.assert_consistent();
}

#[test]
fn test_nick_change_preserves_identity_and_memberships() {
    let mut t = TestBot::registered("rook");
    t.feed(&[
        ":rook!r@bot.host JOIN #a",
        ":rook!r@bot.host JOIN #b",
        ":alice!al@a.host JOIN #a",
        ":alice!al@a.host JOIN #b",
    ]);
    let id = t.bot.graph().client_id("alice").unwrap();
    t.feed(&[":alice!al@a.host NICK Alicia"]);

    let graph = t.bot.graph();
    assert_eq!(graph.client_id("alicia"), Some(id));
    assert!(graph.client_id("alice").is_none());
    assert_eq!(graph.client(id).unwrap().nick(), "Alicia");
    assert!(t.is_on("Alicia", "#a") && t.is_on("Alicia", "#b"));
    t.assert_consistent();
}

#[test]
fn test_casemapping_folds_lookups() {
    let mut t = TestBot::registered("rook");
    t.feed(&[
        ":irc.test 005 rook CASEMAPPING=rfc1459 :are supported by this server",
        ":rook!r@bot.host JOIN #Chan[1]",
        ":Nick{x}!n@n.host JOIN #chan{1}",
        ":nick[X]!n@n.host PART #CHAN[1]",
    ]);
    assert!(t.bot.graph().client_by_nick("nick{x}").is_none());
    assert_eq!(t.bot.graph().channel_count(), 1);
    t.assert_consistent();
}

#[test]
fn test_lifecycle_notifications() {
    use std::sync::{Arc, Mutex};

    use rookery::Predicate;

    let mut t = TestBot::registered("rook");
    let seen = Arc::new(Mutex::new(Vec::new()));
    for command in ["new_client", "client_remove"] {
        let seen = Arc::clone(&seen);
        t.bot.register(command, Predicate::internal(), move |bot, event| {
            let known = event
                .source
                .client
                .and_then(|id| bot.graph().client(id))
                .is_some();
            seen.lock()
                .unwrap()
                .push(format!("{} {} {}", event.command, event.nick(), known));
            Ok(())
        });
    }

    t.feed(&[
        ":rook!r@bot.host JOIN #a",
        ":alice!al@a.host JOIN #a",
        ":alice!al@a.host PART #a",
    ]);
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["new_client alice true", "client_remove alice true"]
    );
}
