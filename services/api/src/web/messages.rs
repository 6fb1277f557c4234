//! services/api/src/web/messages.rs
//!
//! Handlers for the message endpoints.

use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use bookmarket_core::domain::Message;

use crate::error::ApiError;
use crate::web::extract::ApiJson;
use crate::web::protocol::{
    CreateMessagePayload, Envelope, MarkMessageReadPayload, MessageDto, UserMessagesPayload,
};
use crate::web::state::AppState;

/// Create a message tied to a transaction. The transaction reference is
/// advisory and never checked.
#[utoipa::path(
    post,
    path = "/api/createMessage",
    request_body = CreateMessagePayload,
    responses(
        (status = 200, description = "The created message", body = Envelope<MessageDto>),
        (status = 400, description = "Missing field")
    )
)]
pub async fn create_message_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateMessagePayload>,
) -> Result<Json<Envelope<MessageDto>>, ApiError> {
    let message = Message::new(
        payload.transaction_id,
        payload.sender_id,
        payload.receiver_id,
        payload.content,
        payload.is_read.unwrap_or(false),
    );
    state.store.insert_message(&message).await?;

    Ok(Json(Envelope::ok(message.into(), "created")))
}

/// Messages addressed to one user, newest first.
#[utoipa::path(
    post,
    path = "/api/getUserMessages",
    request_body = UserMessagesPayload,
    responses((status = 200, description = "The user's inbox", body = Envelope<Vec<MessageDto>>))
)]
pub async fn get_user_messages_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<UserMessagesPayload>,
) -> Result<Json<Envelope<Vec<MessageDto>>>, ApiError> {
    let messages = state
        .store
        .list_messages_for_receiver(&payload.user_id)
        .await?;

    Ok(Json(Envelope::ok(
        messages.into_iter().map(MessageDto::from).collect(),
        "fetched",
    )))
}

/// Mark a message read. No existence check: an absent id still succeeds.
#[utoipa::path(
    post,
    path = "/api/markMessageAsRead",
    request_body = MarkMessageReadPayload,
    responses((status = 200, description = "Always null data"))
)]
pub async fn mark_message_read_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<MarkMessageReadPayload>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state.store.mark_message_read(&payload.message_id).await?;
    Ok(Json(Envelope::null("updated")))
}
