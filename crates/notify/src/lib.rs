//! `frostwatch-notify` -- outbound alert delivery.
//!
//! An alert goes out over two independent channels: a direct email
//! ([`delivery::email`]) and a topic publish ([`delivery::topic`]). The
//! [`Notifier`] attempts every channel and reports each outcome; one
//! channel failing never stops the next from being tried.

pub mod channel;
pub mod delivery;
pub mod notifier;

pub use channel::{AlertChannel, NotificationError};
pub use notifier::{ChannelOutcome, NotificationOutcome, Notifier};
