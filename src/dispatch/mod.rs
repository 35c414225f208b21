//! Event dispatch: named-command publish/subscribe with predicate filters.
//!
//! The registry only stores subscriptions. The dispatch loop itself lives on
//! [`Bot::dispatch`](crate::Bot::dispatch) because handlers borrow the whole
//! bot mutably while they run.

mod filter;
mod registry;

pub use filter::Predicate;
pub use registry::{Handler, HandlerId, Registry, Subscription, normalize};
