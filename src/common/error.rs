use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::month::MesInvalido;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Os calculadores nunca retornam erro (fail-open); só os caminhos com I/O chegam aqui.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Mês de referência inválido: {0}")]
    InvalidMonth(#[from] MesInvalido),

    #[error("Registro não encontrado")]
    NotFound,

    #[error("Planilha publicada não configurada")]
    PlanilhaNaoConfigurada,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro ao ler CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Erro de comunicação externa: {0}")]
    UpstreamError(#[from] reqwest::Error),

    // --- Edge functions de IA (status HTTP repassados ao cliente) ---
    #[error("Limite de requisições da IA atingido")]
    AiRateLimited,

    #[error("Créditos da IA esgotados")]
    AiCreditsRequired,

    #[error("Falha no serviço de IA: {0}")]
    AiGateway(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidMonth(_)
            | AppError::CsvError(_)
            | AppError::PlanilhaNaoConfigurada => StatusCode::BAD_REQUEST,
            AppError::InvalidToken | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AiRateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::AiCreditsRequired => StatusCode::PAYMENT_REQUIRED,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) | AppError::AiGateway(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::InvalidToken | AppError::JwtError(_) => {
                "Token de autenticação inválido ou ausente.".to_string()
            }
            AppError::InvalidMonth(ref e) => e.to_string(),
            AppError::NotFound => "Registro não encontrado.".to_string(),
            AppError::CsvError(ref e) => format!("Planilha inválida: {}", e),
            AppError::PlanilhaNaoConfigurada => {
                "Envie o CSV no corpo ou configure SHEETS_CSV_URL.".to_string()
            }
            AppError::AiRateLimited => {
                "Limite de requisições excedido. Tente novamente em instantes.".to_string()
            }
            AppError::AiCreditsRequired => {
                "Créditos de IA insuficientes. Adicione créditos para continuar.".to_string()
            }

            // Todo o resto vira uma mensagem genérica; o detalhe fica no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
