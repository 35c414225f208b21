//! Parser behaviour on the line shapes the bot core depends on.

use proptest::prelude::*;
use rookery_proto::{Line, LineRef, ParseError};

#[test]
fn full_prefix_join() {
    let line = Line::parse(":nick!user@host JOIN #chan").unwrap();
    let prefix = line.prefix.as_ref().unwrap();
    assert_eq!(prefix.nick, "nick");
    assert_eq!(prefix.user.as_deref(), Some("user"));
    assert_eq!(prefix.host.as_deref(), Some("host"));
    assert_eq!(line.command, "JOIN");
    assert_eq!(line.destination(), "#chan");
}

#[test]
fn unprefixed_trailing() {
    let line = Line::parse("CMD a b :trailing with spaces").unwrap();
    assert!(line.prefix.is_none());
    assert_eq!(line.args, vec!["a", "b", "trailing with spaces"]);
}

#[test]
fn extended_join_account_and_realname() {
    let line = Line::parse(":n!u@h JOIN #chan acct :Real Name\r\n").unwrap();
    assert_eq!(line.args, vec!["#chan", "acct", "Real Name"]);
}

#[test]
fn whox_reply_shape() {
    let line = Line::parse(":srv 354 me 524 #chan user host nick H@ account").unwrap();
    assert_eq!(line.args.len(), 8);
    assert_eq!(line.arg(1), Some("524"));
    assert_eq!(line.arg(7), Some("account"));
}

#[test]
fn empty_lines_fail() {
    assert_eq!(Line::parse(""), Err(ParseError::EmptyMessage));
    assert_eq!(Line::parse("\n"), Err(ParseError::EmptyMessage));
}

fn token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9#&@!._-]{1,12}"
}

proptest! {
    #[test]
    fn parse_never_panics(raw in "[^\r\n]{0,200}") {
        let _ = LineRef::parse(&raw);
    }

    #[test]
    fn middle_args_survive(cmd in "[A-Z]{1,8}", args in prop::collection::vec(token(), 0..10)) {
        let raw = format!("{} {}", cmd, args.join(" "));
        let line = Line::parse(raw.trim_end()).unwrap();
        prop_assert_eq!(&line.command, &cmd);
        prop_assert_eq!(line.args, args);
    }

    #[test]
    fn trailing_is_verbatim(text in "[^\r\n]{0,100}") {
        let raw = format!(":n!u@h PRIVMSG #c :{text}");
        let line = Line::parse(&raw).unwrap();
        prop_assert_eq!(line.arg(1), Some(text.as_str()));
    }
}
