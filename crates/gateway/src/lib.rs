//! Gateway: HTTP front for a single messaging session.
//!
//! Lifecycle:
//! 1. Load config
//! 2. Start the channel client, which drives the shared `SessionState`
//! 3. Build the router with the session state and client injected
//! 4. Serve `/status`, `/groups` and `/send` until ctrl-c
//!
//! Channel logic lives in the channel crates and is reached only through
//! the `MessagingClient` trait.

pub mod api;
pub mod client;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use {
    client::{BridgeClient, BroadcastReport, with_link},
    error::GatewayError,
    server::{build_gateway_app, start_gateway},
    state::GatewayState,
};
