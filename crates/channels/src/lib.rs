//! Messaging channel seam.
//!
//! The gateway never talks to a chat network directly. A channel crate
//! (WhatsApp today) implements [`MessagingClient`] and drives a shared
//! [`SessionState`] from its own connection events.

pub mod client;
pub mod session;

pub use {
    client::{GroupChat, MessagingClient},
    session::{ConnectionState, SessionSnapshot, SessionState},
};
