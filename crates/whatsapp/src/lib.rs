//! WhatsApp channel backed by `whatsapp-rust` (WhatsApp Web multi-device
//! protocol, no browser involved).
//!
//! Pairing is done by scanning a QR code rendered to the terminal. The
//! session is persisted to `{session_dir}/whatsapp.db` by the library's
//! SQLite store and reused across restarts.

pub mod client;
pub mod events;
pub mod jid;
pub mod message;
pub mod qr;

pub use client::WhatsAppClient;
