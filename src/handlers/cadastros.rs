// src/handlers/cadastros.rs
//
// CRUD dos formulários administrativos.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, month::MesReferencia},
    config::AppState,
    handlers::{hoje, FiltroMes},
    middleware::auth::AuthenticatedUser,
    models::{
        agendamento::{Agendamento, NovoAgendamento},
        colaborador::{Colaborador, NovoColaborador},
        meta::{MetaMensal, SalvarMetaPayload},
        venda::{NovaVenda, Venda},
    },
};

// =============================================================================
//  VENDAS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/vendas",
    tag = "Cadastros",
    responses(
        (status = 200, description = "Vendas do mês", body = Vec<Venda>),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(FiltroMes),
    security(("api_jwt" = []))
)]
pub async fn list_vendas(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroMes>,
) -> Result<Json<Vec<Venda>>, AppError> {
    let mes = filtro.resolver(hoje())?;
    let vendas = app_state
        .cadastro_service
        .listar_vendas(&app_state.db_pool, mes)
        .await?;
    Ok(Json(vendas))
}

#[utoipa::path(
    post,
    path = "/api/vendas",
    tag = "Cadastros",
    request_body = NovaVenda,
    responses(
        (status = 201, description = "Venda registrada", body = Venda),
        (status = 400, description = "Mês ou payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_venda(
    State(app_state): State<AppState>,
    Json(payload): Json<NovaVenda>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let venda = app_state
        .cadastro_service
        .criar_venda(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(venda)))
}

#[utoipa::path(
    put,
    path = "/api/vendas/{id}",
    tag = "Cadastros",
    request_body = NovaVenda,
    responses(
        (status = 200, description = "Venda atualizada", body = Venda),
        (status = 404, description = "Registro não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do registro")),
    security(("api_jwt" = []))
)]
pub async fn update_venda(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NovaVenda>,
) -> Result<Json<Venda>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let venda = app_state
        .cadastro_service
        .atualizar_venda(&app_state.db_pool, id, &payload)
        .await?;
    Ok(Json(venda))
}

#[utoipa::path(
    delete,
    path = "/api/vendas/{id}",
    tag = "Cadastros",
    responses(
        (status = 204, description = "Venda removida"),
        (status = 404, description = "Registro não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do registro")),
    security(("api_jwt" = []))
)]
pub async fn delete_venda(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state
        .cadastro_service
        .remover_venda(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  AGENDAMENTOS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/agendamentos",
    tag = "Cadastros",
    responses(
        (status = 200, description = "Agendamentos do mês", body = Vec<Agendamento>),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(FiltroMes),
    security(("api_jwt" = []))
)]
pub async fn list_agendamentos(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroMes>,
) -> Result<Json<Vec<Agendamento>>, AppError> {
    let mes = filtro.resolver(hoje())?;
    let agendamentos = app_state
        .cadastro_service
        .listar_agendamentos(&app_state.db_pool, mes)
        .await?;
    Ok(Json(agendamentos))
}

#[utoipa::path(
    post,
    path = "/api/agendamentos",
    tag = "Cadastros",
    request_body = NovoAgendamento,
    responses(
        (status = 201, description = "Agendamento registrado", body = Agendamento),
        (status = 400, description = "Mês ou payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_agendamento(
    State(app_state): State<AppState>,
    Json(payload): Json<NovoAgendamento>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let agendamento = app_state
        .cadastro_service
        .criar_agendamento(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(agendamento)))
}

#[utoipa::path(
    put,
    path = "/api/agendamentos/{id}",
    tag = "Cadastros",
    request_body = NovoAgendamento,
    responses(
        (status = 200, description = "Agendamento atualizado", body = Agendamento),
        (status = 404, description = "Registro não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do registro")),
    security(("api_jwt" = []))
)]
pub async fn update_agendamento(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NovoAgendamento>,
) -> Result<Json<Agendamento>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let agendamento = app_state
        .cadastro_service
        .atualizar_agendamento(&app_state.db_pool, id, &payload)
        .await?;
    Ok(Json(agendamento))
}

#[utoipa::path(
    delete,
    path = "/api/agendamentos/{id}",
    tag = "Cadastros",
    responses(
        (status = 204, description = "Agendamento removido"),
        (status = 404, description = "Registro não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do registro")),
    security(("api_jwt" = []))
)]
pub async fn delete_agendamento(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state
        .cadastro_service
        .remover_agendamento(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  COLABORADORES
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/colaboradores",
    tag = "Cadastros",
    responses(
        (status = 200, description = "Equipe comercial", body = Vec<Colaborador>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_colaboradores(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Colaborador>>, AppError> {
    let colaboradores = app_state
        .cadastro_service
        .listar_colaboradores(&app_state.db_pool)
        .await?;
    Ok(Json(colaboradores))
}

#[utoipa::path(
    post,
    path = "/api/colaboradores",
    tag = "Cadastros",
    request_body = NovoColaborador,
    responses(
        (status = 201, description = "Colaborador criado", body = Colaborador),
        (status = 400, description = "Mês ou payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_colaborador(
    State(app_state): State<AppState>,
    Json(payload): Json<NovoColaborador>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let colaborador = app_state
        .cadastro_service
        .criar_colaborador(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(colaborador)))
}

#[utoipa::path(
    put,
    path = "/api/colaboradores/{id}",
    tag = "Cadastros",
    request_body = NovoColaborador,
    responses(
        (status = 200, description = "Colaborador atualizado", body = Colaborador),
        (status = 404, description = "Registro não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do registro")),
    security(("api_jwt" = []))
)]
pub async fn update_colaborador(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NovoColaborador>,
) -> Result<Json<Colaborador>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let colaborador = app_state
        .cadastro_service
        .atualizar_colaborador(&app_state.db_pool, id, &payload)
        .await?;
    Ok(Json(colaborador))
}

#[utoipa::path(
    delete,
    path = "/api/colaboradores/{id}",
    tag = "Cadastros",
    responses(
        (status = 204, description = "Colaborador removido"),
        (status = 404, description = "Registro não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do registro")),
    security(("api_jwt" = []))
)]
pub async fn delete_colaborador(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state
        .cadastro_service
        .remover_colaborador(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  METAS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/metas/{mes}",
    tag = "Cadastros",
    responses(
        (status = 200, description = "Metas do mês", body = MetaMensal),
        (status = 404, description = "Registro não encontrado")
    ),
    params(("mes" = String, Path, description = "Mês no formato YYYY-MM ou MM-YYYY")),
    security(("api_jwt" = []))
)]
pub async fn get_meta(
    State(app_state): State<AppState>,
    Path(mes): Path<String>,
) -> Result<Json<MetaMensal>, AppError> {
    let mes: MesReferencia = mes.parse()?;
    let meta = app_state
        .cadastro_service
        .buscar_meta(&app_state.db_pool, mes)
        .await?;
    Ok(Json(meta))
}

#[utoipa::path(
    put,
    path = "/api/metas/{mes}",
    tag = "Cadastros",
    request_body = SalvarMetaPayload,
    responses(
        (status = 200, description = "Metas salvas", body = MetaMensal),
        (status = 400, description = "Mês ou payload inválido")
    ),
    params(("mes" = String, Path, description = "Mês no formato YYYY-MM ou MM-YYYY")),
    security(("api_jwt" = []))
)]
pub async fn put_meta(
    State(app_state): State<AppState>,
    AuthenticatedUser(usuario): AuthenticatedUser,
    Path(mes): Path<String>,
    Json(payload): Json<SalvarMetaPayload>,
) -> Result<Json<MetaMensal>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let mes: MesReferencia = mes.parse()?;

    tracing::info!(usuario = %usuario.sub, mes = %mes, "Atualizando metas do mês");
    let meta = app_state
        .cadastro_service
        .salvar_meta(&app_state.db_pool, mes, &payload)
        .await?;
    Ok(Json(meta))
}
