//! Integration test common infrastructure.
//!
//! A [`TestBot`] is a bot wired to an in-memory transport, with helpers for
//! feeding server lines and checking what the bot sent back.

#![allow(dead_code)]

use rookery::{Bot, Recorder};

pub struct TestBot {
    pub bot: Bot,
    pub out: Recorder,
}

impl TestBot {
    /// A connected bot that has not been welcomed yet.
    pub fn connected(nick: &str) -> Self {
        let out = Recorder::new();
        let mut bot = Bot::new(nick);
        bot.connect(out.clone());
        Self { bot, out }
    }

    /// A connected, registered bot with its own client in the graph.
    pub fn registered(nick: &str) -> Self {
        let mut t = Self::connected(nick);
        t.feed(&[&format!(":irc.test 001 {nick} :Welcome to the test network")]);
        t.out.take();
        t
    }

    /// Registered, with account-notify, extended-join and WHOX all on.
    pub fn tracking(nick: &str) -> Self {
        let mut t = Self::connected(nick);
        t.feed(&[
            ":irc.test CAP * LS :account-notify extended-join multi-prefix",
            &format!(":irc.test CAP {nick} ACK :account-notify extended-join"),
            &format!(":irc.test 001 {nick} :Welcome to the test network"),
            &format!(":irc.test 005 {nick} WHOX CHANTYPES=# :are supported by this server"),
        ]);
        assert!(t.bot.flags().identity_tracking());
        t.out.take();
        t
    }

    pub fn feed(&mut self, lines: &[&str]) {
        for line in lines {
            self.bot.handle_line(line).expect("test line parses");
        }
    }

    /// Lines sent since the last call.
    pub fn sent(&self) -> Vec<String> {
        self.out.take()
    }

    pub fn assert_consistent(&self) {
        if let Err(e) = self.bot.graph().verify() {
            panic!("graph invariant broken: {e}");
        }
    }

    pub fn account_of(&self, nick: &str) -> Option<String> {
        self.bot
            .graph()
            .client_by_nick(nick)
            .map(|c| c.account.clone())
    }

    pub fn is_on(&self, nick: &str, channel: &str) -> bool {
        let graph = self.bot.graph();
        match (graph.client_by_nick(nick), graph.channel_id(channel)) {
            (Some(client), Some(channel)) => client.is_on(channel),
            _ => false,
        }
    }
}
