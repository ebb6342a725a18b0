//! Library events → session state transitions.

use std::fmt::Debug;

use {
    tokio::sync::RwLock,
    tracing::{error, info, warn},
    wabridge_channels::SessionState,
    wacore::types::events::Event,
};

use crate::qr;

/// The subset of library events the bridge reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A fresh pairing code; the user has to scan it.
    PairingQr(String),
    Paired,
    Connected,
    Disconnected,
    /// The phone unlinked this device; the stored session is no longer valid.
    LoggedOut(String),
    /// Pairing or session restore was rejected. Connectivity is left as is.
    AuthFailed(String),
}

impl SessionEvent {
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::PairingQrCode { code, .. } => Some(Self::PairingQr(code.clone())),
            Event::PairSuccess(_) => Some(Self::Paired),
            Event::PairError(err) => Some(Self::pair_error(&err.error)),
            Event::ConnectFailure(failure) => {
                Some(Self::connect_failure(&failure.reason, &failure.message))
            },
            Event::Connected(_) => Some(Self::Connected),
            Event::Disconnected(_) => Some(Self::Disconnected),
            Event::LoggedOut(out) => Some(Self::logged_out(&out.reason)),
            _ => None,
        }
    }

    fn pair_error(error: &str) -> Self {
        Self::AuthFailed(format!("pairing failed: {error}"))
    }

    fn connect_failure(reason: &impl Debug, message: &str) -> Self {
        if message.is_empty() {
            Self::AuthFailed(format!("connect failure: {reason:?}"))
        } else {
            Self::AuthFailed(format!("connect failure ({reason:?}): {message}"))
        }
    }

    fn logged_out(reason: &impl Debug) -> Self {
        Self::LoggedOut(format!("logged out ({reason:?}): re-pair required"))
    }
}

/// Apply an event to the session state and log it.
pub async fn apply(session: &SessionState, event: SessionEvent) {
    match event {
        SessionEvent::PairingQr(code) => {
            info!("scan the QR code below with WhatsApp (Linked devices)");
            match qr::render_terminal(&code) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => error!(error = %e, "failed to render pairing QR code"),
            }
        },
        SessionEvent::Paired => info!("whatsapp pairing successful"),
        SessionEvent::Connected => {
            session.mark_ready().await;
            info!("whatsapp client connected and ready");
        },
        SessionEvent::Disconnected => {
            session.mark_disconnected("connection closed").await;
            warn!("whatsapp disconnected");
        },
        SessionEvent::LoggedOut(reason) => {
            session.record_auth_failure(reason.as_str()).await;
            session.mark_disconnected(reason.as_str()).await;
            error!("whatsapp authentication failure: {reason}");
        },
        SessionEvent::AuthFailed(reason) => {
            session.record_auth_failure(reason.as_str()).await;
            error!("whatsapp authentication failure: {reason}");
        },
    }
}

/// Keep the client slot and the session state in step.
///
/// The session is marked disconnected before the client is dropped from
/// `slot`, so a request that sees a ready session always finds a client.
pub async fn route<C>(
    session: &SessionState,
    slot: &RwLock<Option<C>>,
    client: C,
    event: SessionEvent,
) {
    match event {
        SessionEvent::Connected => {
            *slot.write().await = Some(client);
            apply(session, event).await;
        },
        SessionEvent::Disconnected | SessionEvent::LoggedOut(_) => {
            apply(session, event).await;
            *slot.write().await = None;
        },
        SessionEvent::PairingQr(_) | SessionEvent::Paired | SessionEvent::AuthFailed(_) => {
            apply(session, event).await;
        },
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Reason {
        ClientOutdated,
        LoggedOut,
    }

    #[tokio::test]
    async fn connect_and_disconnect_drive_state() {
        let session = SessionState::new();
        apply(&session, SessionEvent::Paired).await;
        assert!(!session.is_ready().await);

        apply(&session, SessionEvent::Connected).await;
        assert!(session.is_ready().await);

        apply(&session, SessionEvent::Disconnected).await;
        assert!(!session.is_ready().await);

        apply(&session, SessionEvent::Connected).await;
        assert!(session.is_ready().await);
    }

    #[tokio::test]
    async fn logged_out_records_auth_failure() {
        let session = SessionState::new();
        apply(&session, SessionEvent::Connected).await;
        apply(&session, SessionEvent::logged_out(&Reason::LoggedOut)).await;

        let snap = session.snapshot().await;
        assert!(!snap.is_ready());
        let failure = snap.auth_failure.unwrap();
        assert!(failure.contains("LoggedOut"));
        assert!(failure.contains("re-pair"));
    }

    #[tokio::test]
    async fn pair_error_is_recorded_without_touching_connectivity() {
        let session = SessionState::new();
        apply(&session, SessionEvent::pair_error("key mismatch")).await;

        let snap = session.snapshot().await;
        assert!(!snap.is_ready());
        assert_eq!(
            snap.auth_failure.as_deref(),
            Some("pairing failed: key mismatch")
        );
    }

    #[tokio::test]
    async fn connect_failure_keeps_a_ready_session_ready() {
        let session = SessionState::new();
        apply(&session, SessionEvent::Connected).await;
        apply(
            &session,
            SessionEvent::connect_failure(&Reason::ClientOutdated, "update required"),
        )
        .await;

        let snap = session.snapshot().await;
        assert!(snap.is_ready());
        assert_eq!(
            snap.auth_failure.as_deref(),
            Some("connect failure (ClientOutdated): update required")
        );
    }

    #[test]
    fn connect_failure_without_message_names_the_reason() {
        assert_eq!(
            SessionEvent::connect_failure(&Reason::ClientOutdated, ""),
            SessionEvent::AuthFailed("connect failure: ClientOutdated".into())
        );
    }

    #[tokio::test]
    async fn pairing_qr_leaves_state_alone() {
        let session = SessionState::new();
        apply(&session, SessionEvent::PairingQr("2@ref,key,adv".into())).await;
        assert_eq!(
            session.snapshot().await,
            wabridge_channels::SessionSnapshot::default()
        );
    }

    #[tokio::test]
    async fn disconnect_marks_session_before_dropping_client() {
        let session = SessionState::new();
        let slot = RwLock::new(None);

        route(&session, &slot, "client-1", SessionEvent::Connected).await;
        assert!(session.is_ready().await);
        assert_eq!(*slot.read().await, Some("client-1"));

        route(&session, &slot, "client-1", SessionEvent::Disconnected).await;
        assert!(!session.is_ready().await);
        assert!(slot.read().await.is_none());
    }

    #[tokio::test]
    async fn auth_failure_keeps_the_client() {
        let session = SessionState::new();
        let slot = RwLock::new(None);

        route(&session, &slot, "client-1", SessionEvent::Connected).await;
        route(
            &session,
            &slot,
            "client-1",
            SessionEvent::pair_error("key mismatch"),
        )
        .await;
        assert!(session.is_ready().await);
        assert_eq!(*slot.read().await, Some("client-1"));

        route(
            &session,
            &slot,
            "client-1",
            SessionEvent::logged_out(&Reason::LoggedOut),
        )
        .await;
        assert!(!session.is_ready().await);
        assert!(slot.read().await.is_none());
        assert!(session.snapshot().await.auth_failure.is_some());
    }
}
