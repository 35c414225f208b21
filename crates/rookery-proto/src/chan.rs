//! Channel name helpers.

/// Channel type characters assumed until the server advertises `CHANTYPES`.
pub const DEFAULT_CHANTYPES: &str = "#&";

/// Extension trait for channel name checks.
pub trait ChannelExt {
    /// Check whether this string starts with one of the default channel types.
    fn is_channel_name(&self) -> bool;

    /// Check whether this string starts with one of the given channel types.
    fn is_channel_name_with(&self, chantypes: &str) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        self.is_channel_name_with(DEFAULT_CHANTYPES)
    }

    fn is_channel_name_with(&self, chantypes: &str) -> bool {
        self.chars().next().is_some_and(|c| chantypes.contains(c))
    }
}

/// Whether a destination names a channel anywhere in it.
///
/// Reply routing uses this looser test: a destination such as `@#chan`
/// (status-message target) still answers to the channel.
#[inline]
pub fn mentions_channel(destination: &str) -> bool {
    destination.contains(['#', '&'])
}
