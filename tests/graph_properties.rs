//! Randomized membership traffic against the entity graph.

mod common;
use common::TestBot;

use proptest::prelude::*;

const NICKS: &[&str] = &["rook", "alice", "Alice", "bob", "carol"];
const CHANNELS: &[&str] = &["#a", "#b", "#C", "#c"];

fn nick() -> impl Strategy<Value = &'static str> {
    prop::sample::select(NICKS)
}

fn channel() -> impl Strategy<Value = &'static str> {
    prop::sample::select(CHANNELS)
}

fn membership_line() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (nick(), channel()).prop_map(|(n, c)| format!(":{n}!u@h.test JOIN {c}")),
        2 => (nick(), channel()).prop_map(|(n, c)| format!(":{n}!u@h.test PART {c} :later")),
        2 => (nick(), channel(), nick())
            .prop_map(|(op, c, victim)| format!(":{op}!u@h.test KICK {c} {victim} :out")),
        1 => nick().prop_map(|n| format!(":{n}!u@h.test QUIT :gone")),
        2 => (nick(), nick()).prop_map(|(old, new)| format!(":{old}!u@h.test NICK :{new}")),
    ]
}

proptest! {
    #[test]
    fn graph_invariants_hold_after_every_line(
        lines in prop::collection::vec(membership_line(), 1..80)
    ) {
        let mut t = TestBot::registered("rook");
        for line in &lines {
            t.bot.handle_line(line).unwrap();

            let graph = t.bot.graph();
            let verified = graph.verify();
            prop_assert!(verified.is_ok(), "{:?} after {}", verified, line);

            let me = graph.me();
            for client in graph.clients() {
                prop_assert!(
                    Some(client.id()) == me || client.channel_count() > 0,
                    "{} left without channels after {}",
                    client.nick(),
                    line
                );
            }
        }
    }
}
