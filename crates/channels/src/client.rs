use {
    anyhow::Result,
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
};

/// A group chat as seen by gateway callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupChat {
    /// Serialized chat identifier (e.g. `120363001234567890@g.us`).
    pub id: String,
    /// Display name (the group subject).
    pub name: String,
}

/// Operations the gateway performs against an authenticated messaging session.
///
/// Implementations own the session and its wire protocol. Errors are passed
/// through to HTTP callers as-is, so their `Display` output should be
/// meaningful on its own.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Chat network identifier (e.g. "whatsapp").
    fn id(&self) -> &str;

    /// All chats of group type, projected to id + name.
    async fn list_group_chats(&self) -> Result<Vec<GroupChat>>;

    /// Send a plain text message.
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()>;

    /// Fetch `media_url`, attach it, and send `caption` alongside it.
    async fn send_media_with_caption(
        &self,
        chat_id: &str,
        media_url: &str,
        caption: &str,
    ) -> Result<()>;
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_chat_serializes_as_id_and_name() {
        let group = GroupChat {
            id: "120363001234567890@g.us".into(),
            name: "Deals".into(),
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "120363001234567890@g.us", "name": "Deals" })
        );
    }
}
