use std::sync::Arc;

use wabridge_channels::{MessagingClient, SessionState};

/// Shared gateway runtime state, wrapped in Arc for use across handlers.
pub struct GatewayState {
    /// Connection state, driven by the client's event subscription.
    pub session: Arc<SessionState>,
    /// The messaging session all operations are forwarded to.
    pub client: Arc<dyn MessagingClient>,
    /// Server version string.
    pub version: String,
}

impl GatewayState {
    pub fn new(session: Arc<SessionState>, client: Arc<dyn MessagingClient>) -> Arc<Self> {
        Arc::new(Self {
            session,
            client,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}
