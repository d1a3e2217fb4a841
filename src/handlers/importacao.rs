// src/handlers/importacao.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::hoje,
    middleware::auth::AuthenticatedUser,
    models::planilha::ResumoImportacao,
};

// POST /api/importacao/vendas
// Corpo: CSV da planilha. Corpo vazio importa a planilha publicada (SHEETS_CSV_URL).
#[utoipa::path(
    post,
    path = "/api/importacao/vendas",
    tag = "Importação",
    request_body(content = String, content_type = "text/csv", description = "CSV da planilha; vazio usa a planilha publicada"),
    responses(
        (status = 200, description = "Resumo da importação", body = ResumoImportacao),
        (status = 400, description = "CSV inválido ou planilha não configurada")
    ),
    security(("api_jwt" = []))
)]
pub async fn post_vendas(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    corpo: String,
) -> Result<Json<ResumoImportacao>, AppError> {
    let csv = Some(corpo).filter(|c| !c.trim().is_empty());
    tracing::info!(usuario = %usuario.sub, planilha_publicada = csv.is_none(), "Importação de vendas");

    let resumo = app_state
        .import_service
        .importar(&app_state.db_pool, csv, hoje())
        .await?;

    Ok(Json(resumo))
}
