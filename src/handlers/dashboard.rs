// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{hoje, FiltroMes},
    middleware::i18n::Locale,
    models::{
        dashboard::{ComparativoMensal, ComparativoSquads, EtapaFunil, ResumoExecutivo},
        desempenho::{PainelCloser, PainelSdr},
        financeiro::MetricasFinanceiras,
    },
};

// GET /api/dashboard/financeiro
#[utoipa::path(
    get,
    path = "/api/dashboard/financeiro",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Métricas financeiras do mês", body = MetricasFinanceiras),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(FiltroMes),
    security(("api_jwt" = []))
)]
pub async fn get_financeiro(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroMes>,
) -> Result<Json<MetricasFinanceiras>, AppError> {
    let mes = filtro.resolver(hoje())?;
    let metricas = app_state
        .dashboard_service
        .financeiro(&app_state.db_pool, mes)
        .await?;
    Ok(Json(metricas))
}

// GET /api/dashboard/sdrs
#[utoipa::path(
    get,
    path = "/api/dashboard/sdrs",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Desempenho dos SDRs", body = PainelSdr),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(FiltroMes),
    security(("api_jwt" = []))
)]
pub async fn get_sdrs(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroMes>,
) -> Result<Json<PainelSdr>, AppError> {
    let mes = filtro.resolver(hoje())?;
    let painel = app_state.dashboard_service.sdrs(&app_state.db_pool, mes).await?;
    Ok(Json(painel))
}

// GET /api/dashboard/closers
#[utoipa::path(
    get,
    path = "/api/dashboard/closers",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Desempenho dos closers", body = PainelCloser),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(FiltroMes),
    security(("api_jwt" = []))
)]
pub async fn get_closers(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroMes>,
) -> Result<Json<PainelCloser>, AppError> {
    let mes = filtro.resolver(hoje())?;
    let painel = app_state.dashboard_service.closers(&app_state.db_pool, mes).await?;
    Ok(Json(painel))
}

// GET /api/dashboard/squads
#[utoipa::path(
    get,
    path = "/api/dashboard/squads",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Placar dos squads", body = ComparativoSquads),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(FiltroMes),
    security(("api_jwt" = []))
)]
pub async fn get_squads(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroMes>,
) -> Result<Json<ComparativoSquads>, AppError> {
    let mes = filtro.resolver(hoje())?;
    let comparativo = app_state.dashboard_service.squads(&app_state.db_pool, mes).await?;
    Ok(Json(comparativo))
}

// GET /api/dashboard/funil
#[utoipa::path(
    get,
    path = "/api/dashboard/funil",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Funil comercial", body = Vec<EtapaFunil>),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(FiltroMes),
    security(("api_jwt" = []))
)]
pub async fn get_funil(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroMes>,
) -> Result<Json<Vec<EtapaFunil>>, AppError> {
    let mes = filtro.resolver(hoje())?;
    let funil = app_state.dashboard_service.funil(&app_state.db_pool, mes).await?;
    Ok(Json(funil))
}

// GET /api/dashboard/executivo
#[utoipa::path(
    get,
    path = "/api/dashboard/executivo",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo executivo com projeção", body = ResumoExecutivo),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(FiltroMes),
    security(("api_jwt" = []))
)]
pub async fn get_executivo(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filtro): Query<FiltroMes>,
) -> Result<Json<ResumoExecutivo>, AppError> {
    let hoje = hoje();
    let mes = filtro.resolver(hoje)?;
    let resumo = app_state
        .dashboard_service
        .executivo(&app_state.db_pool, mes, hoje, locale.formato())
        .await?;
    Ok(Json(resumo))
}

// GET /api/dashboard/comparativo
#[utoipa::path(
    get,
    path = "/api/dashboard/comparativo",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Mês atual contra o anterior", body = ComparativoMensal),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(FiltroMes),
    security(("api_jwt" = []))
)]
pub async fn get_comparativo(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filtro): Query<FiltroMes>,
) -> Result<Json<ComparativoMensal>, AppError> {
    let hoje = hoje();
    let mes = filtro.resolver(hoje)?;
    let comparativo = app_state
        .dashboard_service
        .comparativo(&app_state.db_pool, mes, hoje, locale.formato())
        .await?;
    Ok(Json(comparativo))
}
