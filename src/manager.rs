//! Directory of running bot instances.
//!
//! Built explicitly in `main` and torn down before exit. Each bot sits
//! behind its own mutex; dispatch for one bot never waits on another.
//! Lookups clone the `Arc` out so no map shard lock is held while a bot
//! is locked.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use tracing::info;

use crate::bot::Bot;
use crate::error::BotError;

/// Shared handle to one bot.
pub type BotHandle = Arc<Mutex<Bot>>;

/// Name-keyed set of bots.
#[derive(Default)]
pub struct BotManager {
    bots: DashMap<String, BotHandle>,
}

impl BotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bot under its own name.
    pub fn add(&self, bot: Bot) -> Result<BotHandle, BotError> {
        let name = bot.name().to_owned();
        match self.bots.entry(name.clone()) {
            Entry::Occupied(_) => Err(BotError::DuplicateName(name)),
            Entry::Vacant(slot) => {
                let handle = Arc::new(Mutex::new(bot));
                slot.insert(Arc::clone(&handle));
                info!(bot = %name, "Bot added");
                Ok(handle)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<BotHandle> {
        self.bots.get(name).map(|r| Arc::clone(r.value()))
    }

    /// Remove a bot, shutting it down first.
    pub fn remove(&self, name: &str) -> Result<(), BotError> {
        let (_, handle) = self
            .bots
            .remove(name)
            .ok_or_else(|| BotError::NotFound(name.to_owned()))?;
        handle.lock().shutdown();
        info!(bot = %name, "Bot removed");
        Ok(())
    }

    /// Names of all bots, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bots.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    /// Shut every bot down and empty the directory.
    pub fn shutdown_all(&self) {
        let handles: Vec<(String, BotHandle)> = self
            .bots
            .iter()
            .map(|e| (e.key().clone(), Arc::clone(e.value())))
            .collect();
        self.bots.clear();
        for (name, handle) in handles {
            handle.lock().shutdown();
            info!(bot = %name, "Bot shut down");
        }
    }
}
