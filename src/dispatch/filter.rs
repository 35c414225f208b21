//! Composable handler predicates.
//!
//! A [`Predicate`] is a plain value checked before a handler runs. Checks
//! have no side effects and short-circuit left to right, so a cheap clause
//! placed first keeps the authorizer from being consulted needlessly.

use crate::bot::Bot;
use crate::event::{Event, Origin};

/// Filter deciding whether a subscription sees an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Predicate {
    /// Every event.
    #[default]
    Always,
    /// Events owned by the named bot instance.
    FromBot(String),
    /// Events of one origin kind.
    Origin(Origin),
    /// Events whose sender holds a privilege, per the bot's authorizer.
    Privilege(String),
    /// Every inner predicate holds.
    All(Vec<Predicate>),
    /// At least one inner predicate holds.
    Any(Vec<Predicate>),
}

impl Predicate {
    /// Live network lines only.
    pub fn network() -> Self {
        Self::Origin(Origin::Network)
    }

    /// Internally synthesized events only.
    pub fn internal() -> Self {
        Self::Origin(Origin::Internal)
    }

    /// Configuration directives only.
    pub fn config() -> Self {
        Self::Origin(Origin::ConfigFile)
    }

    /// Chat commands only.
    pub fn command() -> Self {
        Self::Origin(Origin::Command)
    }

    /// Require a privilege.
    pub fn privilege(name: impl Into<String>) -> Self {
        Self::Privilege(name.into())
    }

    /// Restrict to one bot instance.
    pub fn from_bot(name: impl Into<String>) -> Self {
        Self::FromBot(name.into())
    }

    /// Both `self` and `other` must hold.
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Self::Always => other,
            Self::All(mut inner) => {
                inner.push(other);
                Self::All(inner)
            }
            this => Self::All(vec![this, other]),
        }
    }

    /// Either `self` or `other` must hold.
    pub fn or(self, other: Predicate) -> Self {
        match self {
            Self::Any(mut inner) => {
                inner.push(other);
                Self::Any(inner)
            }
            this => Self::Any(vec![this, other]),
        }
    }

    /// `self`, or the event came from a configuration file.
    pub fn or_config(self) -> Self {
        self.or(Self::config())
    }

    /// Evaluate against an event.
    pub fn matches(&self, bot: &Bot, event: &Event) -> bool {
        match self {
            Self::Always => true,
            Self::FromBot(name) => event.bot == *name,
            Self::Origin(origin) => event.origin == *origin,
            Self::Privilege(name) => bot.authorizer().has_privilege(bot, event, name),
            Self::All(inner) => inner.iter().all(|p| p.matches(bot, event)),
            Self::Any(inner) => inner.iter().any(|p| p.matches(bot, event)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::auth::Authorizer;

    struct Counting(Arc<AtomicUsize>, bool);

    impl Authorizer for Counting {
        fn has_privilege(&self, _bot: &Bot, _event: &Event, _privilege: &str) -> bool {
            self.0.fetch_add(1, Ordering::SeqCst);
            self.1
        }
    }

    fn bot_with(grant: bool) -> (Bot, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let bot = Bot::new("b").with_authorizer(Counting(calls.clone(), grant));
        (bot, calls)
    }

    #[test]
    fn test_origin_and_bot() {
        let (bot, _) = bot_with(false);
        let event = Event::parse("b", ":n!u@h JOIN #c").unwrap();
        assert!(Predicate::network().matches(&bot, &event));
        assert!(!Predicate::config().matches(&bot, &event));
        assert!(Predicate::from_bot("b").matches(&bot, &event));
        assert!(!Predicate::from_bot("other").matches(&bot, &event));
    }

    #[test]
    fn test_and_short_circuits() {
        let (bot, calls) = bot_with(true);
        let event = Event::parse("b", ":n!u@h JOIN #c").unwrap();
        let pred = Predicate::config().and(Predicate::privilege("admin"));
        assert!(!pred.matches(&bot, &event));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_or_config_skips_authorizer_for_directives() {
        let (bot, calls) = bot_with(false);
        let pred = Predicate::config().or(Predicate::privilege("admin"));
        let directive = Event::directive("b", vec!["set".into()], "x:1".into(), "set");
        assert!(pred.matches(&bot, &directive));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let pred = Predicate::privilege("admin").or_config();
        assert!(pred.matches(&bot, &directive));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let chat = Event::parse("b", ":n!u@h PRIVMSG b :set").unwrap();
        assert!(!pred.matches(&bot, &chat));
    }

    #[test]
    fn test_and_flattens() {
        let pred = Predicate::Always
            .and(Predicate::network())
            .and(Predicate::from_bot("b"));
        assert_eq!(
            pred,
            Predicate::All(vec![Predicate::network(), Predicate::from_bot("b")])
        );
    }
}
