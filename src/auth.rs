//! Privilege checks used by [`Predicate::Privilege`](crate::dispatch::Predicate).

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::bot::Bot;
use crate::event::{Event, Origin};

/// Decides whether an event's sender holds a named privilege.
pub trait Authorizer: Send + Sync {
    fn has_privilege(&self, bot: &Bot, event: &Event, privilege: &str) -> bool;
}

/// Grants nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenyAll;

impl Authorizer for DenyAll {
    fn has_privilege(&self, _bot: &Bot, _event: &Event, _privilege: &str) -> bool {
        false
    }
}

/// Privileges granted per account name.
///
/// The sender must be a known client with an identified account; nick alone
/// never grants anything. Directive lines hold every privilege.
#[derive(Clone, Debug, Default)]
pub struct StaticPrivileges {
    by_account: HashMap<String, BTreeSet<String>>,
}

impl StaticPrivileges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, account: &str, privilege: &str) {
        self.by_account
            .entry(account.to_owned())
            .or_default()
            .insert(privilege.to_owned());
    }

    pub fn privileges_of(&self, account: &str) -> impl Iterator<Item = &str> {
        self.by_account
            .get(account)
            .into_iter()
            .flat_map(|p| p.iter().map(String::as_str))
    }
}

impl FromIterator<(String, Vec<String>)> for StaticPrivileges {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut privs = Self::new();
        for (account, list) in iter {
            for privilege in list {
                privs.grant(&account, &privilege);
            }
        }
        privs
    }
}

impl Authorizer for StaticPrivileges {
    fn has_privilege(&self, bot: &Bot, event: &Event, privilege: &str) -> bool {
        if event.origin == Origin::ConfigFile {
            return true;
        }
        let client = event
            .source
            .client
            .and_then(|id| bot.graph().client(id))
            .or_else(|| bot.graph().client_by_nick(event.nick()));
        let Some(client) = client.filter(|c| c.is_identified()) else {
            debug!(nick = %event.nick(), privilege, "Privilege check: sender not identified");
            return false;
        };
        self.by_account
            .get(&client.account)
            .is_some_and(|p| p.contains(privilege))
    }
}
