// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The inbound webhook route.
//!
//! Telegram delivers one `Update` per POST. The route always answers
//! `200 OK` with an empty body: Telegram retries non-2xx deliveries, and a
//! retried update would re-drive the state machine, so even a failed message
//! is acknowledged.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use teloxide::types::Update;
use tracing::debug;

use crate::handler::TelegramHandler;

#[derive(Clone)]
struct WebhookState {
    handler: Arc<TelegramHandler>,
}

/// Build the webhook router.
pub fn webhook_router(handler: Arc<TelegramHandler>) -> Router {
    Router::new()
        .route("/telegram/webhook", post(post_webhook))
        .with_state(WebhookState { handler })
}

/// POST /telegram/webhook
///
/// The body is read raw rather than through the JSON extractor so that a
/// malformed payload still gets the empty 200 acknowledgement.
async fn post_webhook(State(state): State<WebhookState>, body: Bytes) -> StatusCode {
    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => state.handler.process_update(update).await,
        Err(e) => debug!(error = %e, "ignoring malformed webhook payload"),
    }
    StatusCode::OK
}
