// src/handlers/ai.rs

use axum::{extract::State, Json};
use serde_json::Value;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::ai::AssistenteRequest,
};

// POST /api/ai/assistente
// A resposta da edge function é repassada como veio.
#[utoipa::path(
    post,
    path = "/api/ai/assistente",
    tag = "IA",
    request_body = AssistenteRequest,
    responses(
        (status = 200, description = "Resposta do assistente", body = Value),
        (status = 402, description = "Créditos de IA esgotados"),
        (status = 429, description = "Limite de requisições da IA atingido")
    ),
    security(("api_jwt" = []))
)]
pub async fn post_assistente(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Json(payload): Json<AssistenteRequest>,
) -> Result<Json<Value>, AppError> {
    tracing::info!(usuario = %usuario.sub, tipo = payload.tipo.as_str(), "Consulta ao assistente de IA");
    let resposta = app_state.ai_service.assistente(&payload).await?;
    Ok(Json(resposta))
}
