//! Connection state of the messaging session.
//!
//! Two states, driven by the channel's event subscription:
//!
//! ```text
//!              mark_ready()
//! Disconnected ────────────▶ Ready
//!      ▲                       │
//!      └───────────────────────┘
//!        mark_disconnected()
//! ```
//!
//! Auth failures are recorded next to the state without changing it.

use {serde::Serialize, tokio::sync::RwLock, tracing::debug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Ready,
}

/// Point-in-time copy of the session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: ConnectionState,
    /// Last auth failure reported since the session was last ready.
    pub auth_failure: Option<String>,
    /// Reason given for the most recent disconnect.
    pub disconnect_reason: Option<String>,
}

impl SessionSnapshot {
    pub fn is_ready(&self) -> bool {
        self.state == ConnectionState::Ready
    }
}

/// Shared, explicitly injected session state cell.
#[derive(Debug, Default)]
pub struct SessionState {
    inner: RwLock<SessionSnapshot>,
}

impl SessionState {
    /// New cell in the `Disconnected` state.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_ready(&self) -> bool {
        self.inner.read().await.is_ready()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.read().await.clone()
    }

    /// Session authenticated and usable. Clears any earlier auth failure.
    pub async fn mark_ready(&self) {
        let mut inner = self.inner.write().await;
        inner.state = ConnectionState::Ready;
        inner.auth_failure = None;
        inner.disconnect_reason = None;
        debug!("session state -> ready");
    }

    pub async fn mark_disconnected(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let mut inner = self.inner.write().await;
        inner.state = ConnectionState::Disconnected;
        debug!(reason = %reason, "session state -> disconnected");
        inner.disconnect_reason = Some(reason);
    }

    /// Record an auth failure. Connectivity is left untouched.
    pub async fn record_auth_failure(&self, message: impl Into<String>) {
        self.inner.write().await.auth_failure = Some(message.into());
    }
}
