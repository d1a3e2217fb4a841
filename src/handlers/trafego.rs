// src/handlers/trafego.rs

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{hoje, FiltroMes},
    models::{ai::AnaliseTrafegoResultado, dashboard::PainelTrafego},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnaliseQuery {
    pub mes: Option<String>,
    /// Ignora a análise em cache
    #[serde(default)]
    pub forcar: bool,
}

// GET /api/trafego
#[utoipa::path(
    get,
    path = "/api/trafego",
    tag = "Tráfego",
    responses(
        (status = 200, description = "Painel de tráfego pago", body = PainelTrafego),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(FiltroMes),
    security(("api_jwt" = []))
)]
pub async fn get_painel(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroMes>,
) -> Result<Json<PainelTrafego>, AppError> {
    let hoje = hoje();
    let mes = filtro.resolver(hoje)?;
    let painel = app_state
        .dashboard_service
        .trafego(&app_state.db_pool, mes, hoje)
        .await?;
    Ok(Json(painel))
}

// POST /api/trafego/analise?forcar=true
#[utoipa::path(
    post,
    path = "/api/trafego/analise",
    tag = "Tráfego",
    responses(
        (status = 200, description = "Análise gerada ou servida do cache", body = AnaliseTrafegoResultado),
        (status = 402, description = "Créditos de IA esgotados"),
        (status = 429, description = "Limite de requisições da IA atingido")
    ),
    params(AnaliseQuery),
    security(("api_jwt" = []))
)]
pub async fn post_analise(
    State(app_state): State<AppState>,
    Query(query): Query<AnaliseQuery>,
) -> Result<Json<AnaliseTrafegoResultado>, AppError> {
    let hoje = hoje();
    let mes = FiltroMes { mes: query.mes }.resolver(hoje)?;

    let requisicao = app_state
        .dashboard_service
        .requisicao_analise(&app_state.db_pool, mes, hoje)
        .await?;
    let resultado = app_state
        .ai_service
        .analisar_trafego(&requisicao, query.forcar)
        .await?;

    Ok(Json(resultado))
}
