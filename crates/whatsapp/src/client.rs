use std::sync::Arc;

use {
    anyhow::{Context, Result, anyhow},
    async_trait::async_trait,
    tokio::sync::RwLock,
    tracing::{debug, info},
    wabridge_channels::{GroupChat, MessagingClient, SessionState},
    wabridge_config::WhatsAppConfig,
    wabridge_media::{MediaKind, fetch_media},
    wacore_binary::jid::Jid,
    whatsapp_rust::{bot::Bot, client::Client, download::MediaType, store::SqliteStore},
    whatsapp_rust_tokio_transport::TokioWebSocketTransportFactory,
    whatsapp_rust_ureq_http_client::UreqHttpClient,
};

use crate::{
    events::{self, SessionEvent},
    jid::normalize_chat_id,
    message::{UploadedMedia, media_message, text_message},
};

/// Live WhatsApp session.
///
/// The library client handle is only present while connected; it is set on
/// `Connected` and dropped on `Disconnected` / `LoggedOut`.
pub struct WhatsAppClient {
    handle: Arc<RwLock<Option<Arc<Client>>>>,
    http: reqwest::Client,
}

impl WhatsAppClient {
    /// Open (or create) the persisted session and start the bot in the
    /// background. Connection events are reflected into `session`.
    pub async fn start(config: &WhatsAppConfig, session: Arc<SessionState>) -> Result<Self> {
        let session_dir = config.resolved_session_dir();
        std::fs::create_dir_all(&session_dir)
            .with_context(|| format!("failed to create {}", session_dir.display()))?;
        let db_path = session_dir.join("whatsapp.db");
        info!(session = %db_path.display(), "whatsapp bot building");

        let backend = Arc::new(
            SqliteStore::new(&db_path.to_string_lossy())
                .await
                .map_err(|e| anyhow!("whatsapp store init failed: {e}"))?,
        );

        let handle: Arc<RwLock<Option<Arc<Client>>>> = Arc::new(RwLock::new(None));
        let handle_for_events = Arc::clone(&handle);

        let mut bot = Bot::builder()
            .with_backend(backend)
            .with_transport_factory(TokioWebSocketTransportFactory::new())
            .with_http_client(UreqHttpClient::new())
            .with_device_props(
                Some(config.device_name.clone()),
                None,
                Some(waproto::whatsapp::device_props::PlatformType::Desktop),
            )
            .on_event(move |event, client| {
                let handle = Arc::clone(&handle_for_events);
                let session = Arc::clone(&session);
                async move {
                    let Some(event) = SessionEvent::from_event(&event) else {
                        return;
                    };
                    events::route(&session, &handle, client, event).await;
                }
            })
            .build()
            .await
            .map_err(|e| anyhow!("whatsapp bot build failed: {e}"))?;

        let _handle = bot
            .run()
            .await
            .map_err(|e| anyhow!("whatsapp bot run failed: {e}"))?;
        info!("whatsapp bot started");

        Ok(Self {
            handle,
            http: reqwest::Client::new(),
        })
    }

    async fn connected(&self) -> Result<Arc<Client>> {
        self.handle
            .read()
            .await
            .clone()
            .ok_or_else(|| anyhow!("whatsapp client not connected"))
    }
}

fn parse_jid(chat_id: &str) -> Result<Jid> {
    let normalized = normalize_chat_id(chat_id)?;
    normalized
        .parse()
        .map_err(|e| anyhow!("invalid whatsapp JID '{chat_id}': {e}"))
}

fn media_type(kind: MediaKind) -> MediaType {
    match kind {
        MediaKind::Image => MediaType::Image,
        MediaKind::Video => MediaType::Video,
        MediaKind::Document => MediaType::Document,
    }
}

#[async_trait]
impl MessagingClient for WhatsAppClient {
    fn id(&self) -> &str {
        "whatsapp"
    }

    async fn list_group_chats(&self) -> Result<Vec<GroupChat>> {
        let client = self.connected().await?;
        let groups = client
            .groups()
            .get_participating()
            .await
            .map_err(|e| anyhow!("failed to list groups: {e}"))?;

        let mut chats: Vec<GroupChat> = groups
            .into_values()
            .map(|meta| GroupChat {
                id: meta.id.to_string(),
                name: meta.subject.clone(),
            })
            .collect();
        chats.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(chats)
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()> {
        let client = self.connected().await?;
        let jid = parse_jid(chat_id)?;
        let msg_id = client
            .send_message(jid, text_message(text))
            .await
            .map_err(|e| anyhow!("failed to send message: {e}"))?;
        debug!(chat_id, msg_id = %msg_id, "text message sent");
        Ok(())
    }

    async fn send_media_with_caption(
        &self,
        chat_id: &str,
        media_url: &str,
        caption: &str,
    ) -> Result<()> {
        let client = self.connected().await?;
        let jid = parse_jid(chat_id)?;
        let media = fetch_media(&self.http, media_url).await?;
        let kind = media.kind();

        let upload = client
            .upload(media.bytes, media_type(kind))
            .await
            .map_err(|e| anyhow!("media upload failed: {e}"))?;
        let uploaded = UploadedMedia {
            url: upload.url,
            direct_path: upload.direct_path,
            media_key: upload.media_key,
            file_enc_sha256: upload.file_enc_sha256,
            file_sha256: upload.file_sha256,
            file_length: upload.file_length,
        };

        let msg = media_message(kind, uploaded, &media.mime, &media.file_name, caption);
        let msg_id = client
            .send_message(jid, msg)
            .await
            .map_err(|e| anyhow!("failed to send media message: {e}"))?;
        debug!(chat_id, msg_id = %msg_id, mime = %media.mime, "media message sent");
        Ok(())
    }
}
