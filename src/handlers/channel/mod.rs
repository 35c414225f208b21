//! Channel membership handlers.
//!
//! Handles JOIN, PART and KICK as seen from the server. None of these ever
//! send anything except the identity query issued when the bot itself joins.

mod join;
mod kick;
mod part;

pub use join::handle_join;
pub use kick::handle_kick;
pub use part::handle_part;
