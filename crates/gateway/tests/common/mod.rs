#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use std::{
    collections::HashSet,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use {
    anyhow::{Result, bail},
    async_trait::async_trait,
    wabridge_channels::{GroupChat, MessagingClient, SessionState},
    wabridge_gateway::{GatewayState, build_gateway_app},
};

/// Which send variant the gateway invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListGroups,
    Text {
        chat_id: String,
        text: String,
    },
    Media {
        chat_id: String,
        media_url: String,
        caption: String,
    },
}

/// Substitute messaging client that records calls and fails on demand.
#[derive(Default)]
pub struct RecordingClient {
    pub calls: Mutex<Vec<Call>>,
    pub groups: Vec<GroupChat>,
    /// Every call fails with this message when set.
    pub fail_with: Option<String>,
    /// Sends to these chats fail.
    pub failing_chats: HashSet<String>,
}

impl RecordingClient {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome(&self, chat_id: Option<&str>) -> Result<()> {
        if let Some(msg) = &self.fail_with {
            bail!("{msg}");
        }
        if let Some(chat_id) = chat_id
            && self.failing_chats.contains(chat_id)
        {
            bail!("chat {chat_id} not found");
        }
        Ok(())
    }
}

#[async_trait]
impl MessagingClient for RecordingClient {
    fn id(&self) -> &str {
        "recording"
    }

    async fn list_group_chats(&self) -> Result<Vec<GroupChat>> {
        self.record(Call::ListGroups);
        self.outcome(None)?;
        Ok(self.groups.clone())
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()> {
        self.record(Call::Text {
            chat_id: chat_id.into(),
            text: text.into(),
        });
        self.outcome(Some(chat_id))
    }

    async fn send_media_with_caption(
        &self,
        chat_id: &str,
        media_url: &str,
        caption: &str,
    ) -> Result<()> {
        self.record(Call::Media {
            chat_id: chat_id.into(),
            media_url: media_url.into(),
            caption: caption.into(),
        });
        self.outcome(Some(chat_id))
    }
}

pub struct TestGateway {
    pub base_url: String,
    pub session: Arc<SessionState>,
    pub client: Arc<RecordingClient>,
    pub http: reqwest::Client,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Serve the real router on an ephemeral port.
pub async fn spawn_gateway(client: RecordingClient) -> TestGateway {
    let session = Arc::new(SessionState::new());
    let client = Arc::new(client);
    let state = GatewayState::new(Arc::clone(&session), client.clone());
    let app = build_gateway_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestGateway {
        base_url: format!("http://{addr}"),
        session,
        client,
        http: reqwest::Client::new(),
    }
}

pub async fn spawn_ready_gateway(client: RecordingClient) -> TestGateway {
    let gw = spawn_gateway(client).await;
    gw.session.mark_ready().await;
    gw
}
