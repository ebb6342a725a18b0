use std::sync::Arc;

use {
    axum::{
        Json,
        extract::{State, rejection::JsonRejection},
    },
    tracing::{error, info, warn},
};

use crate::{
    api::{GroupsResponse, SendRequest, SendResponse, StatusResponse},
    error::GatewayError,
    state::GatewayState,
};

/// `GET /status`: never fails.
pub async fn status(State(state): State<Arc<GatewayState>>) -> Json<StatusResponse> {
    let snap = state.session.snapshot().await;
    Json(StatusResponse {
        connected: snap.is_ready(),
        auth_failure: snap.auth_failure,
    })
}

/// `GET /groups`
pub async fn groups(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<GroupsResponse>, GatewayError> {
    ensure_ready(&state).await?;

    match state.client.list_group_chats().await {
        Ok(groups) => {
            info!(count = groups.len(), "groups listed");
            Ok(Json(GroupsResponse { groups }))
        },
        Err(e) => {
            error!(error = %format!("{e:#}"), "failed to list groups");
            Err(GatewayError::upstream(&e))
        },
    }
}

/// `POST /send`
///
/// Field validation runs before the connectivity check, so a request
/// without `chatId`/`message` is a 400 whatever the session state.
pub async fn send(
    State(state): State<Arc<GatewayState>>,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<SendResponse>, GatewayError> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected send body");
        GatewayError::BadRequest(format!("invalid request body: {}", rejection.body_text()))
    })?;

    let (Some(chat_id), Some(message)) = (non_empty(req.chat_id), non_empty(req.message)) else {
        warn!("send rejected: chatId or message missing");
        return Err(GatewayError::BadRequest(
            "chatId and message are required".into(),
        ));
    };
    ensure_ready(&state).await?;

    let result = match non_empty(req.image_url) {
        Some(image_url) => {
            state
                .client
                .send_media_with_caption(&chat_id, &image_url, &message)
                .await
        },
        None => state.client.send_text(&chat_id, &message).await,
    };

    match result {
        Ok(()) => {
            info!(chat_id = %chat_id, "message sent");
            Ok(Json(SendResponse { success: true }))
        },
        Err(e) => {
            error!(chat_id = %chat_id, error = %format!("{e:#}"), "failed to send message");
            Err(GatewayError::upstream(&e))
        },
    }
}

async fn ensure_ready(state: &GatewayState) -> Result<(), GatewayError> {
    if state.session.is_ready().await {
        Ok(())
    } else {
        warn!("request rejected: session not ready");
        Err(GatewayError::NotConnected)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
