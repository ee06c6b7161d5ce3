use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, SetupRequest, SetupResponse},
    services::{
        chatbot::{ReplyKind, generate_reply},
        metrics_manager::{Analytics, Interaction},
    },
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.message.trim();

    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let (reply, kind) = generate_reply(&state.knowledge, &payload.company_id, trimmed).await;

    // Canned greetings and misses would skew the average confidence.
    if kind == ReplyKind::Retrieved {
        state
            .metrics
            .record(
                &payload.company_id,
                Interaction {
                    message: trimmed.to_string(),
                    response: reply.response.clone().unwrap_or_default(),
                    confidence: reply.confidence.unwrap_or_default(),
                },
            )
            .await;
    }

    tracing::info!(
        company_id = %payload.company_id,
        kind = ?kind,
        confidence = reply.confidence.unwrap_or_default(),
        "answered chat message"
    );

    Ok(Json(reply))
}

pub async fn setup_handler(
    State(state): State<SharedState>,
    Path(company_id): Path<String>,
    Json(payload): Json<SetupRequest>,
) -> Result<Json<SetupResponse>, AppError> {
    let stored = state
        .knowledge
        .set_documents(&company_id, &payload.documents)
        .await;

    if stored == 0 {
        return Err(AppError::BadRequest(
            "No document text to learn from".to_string(),
        ));
    }

    tracing::info!(%company_id, passages = stored, "company knowledge updated");

    Ok(Json(SetupResponse {
        status: "success".to_string(),
        message: format!("Setup complete for company {company_id}"),
    }))
}

pub async fn analytics_handler(
    State(state): State<SharedState>,
    Path(company_id): Path<String>,
) -> Json<Analytics> {
    Json(state.metrics.get_analytics(&company_id).await)
}
