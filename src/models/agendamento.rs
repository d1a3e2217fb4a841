// src/models/agendamento.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusAgendamento {
    #[default]
    Agendado,
    Realizado,
    NoShow,
    Cancelado,
}

impl StatusAgendamento {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusAgendamento::Agendado => "agendado",
            StatusAgendamento::Realizado => "realizado",
            StatusAgendamento::NoShow => "no_show",
            StatusAgendamento::Cancelado => "cancelado",
        }
    }
}

impl From<String> for StatusAgendamento {
    fn from(valor: String) -> Self {
        match valor.trim().to_lowercase().as_str() {
            "realizado" => StatusAgendamento::Realizado,
            "no_show" | "no-show" | "noshow" => StatusAgendamento::NoShow,
            "cancelado" => StatusAgendamento::Cancelado,
            "agendado" => StatusAgendamento::Agendado,
            outro => {
                tracing::warn!(status = %outro, "Status de agendamento desconhecido, usando agendado");
                StatusAgendamento::Agendado
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agendamento {
    pub id: Uuid,

    pub sdr_id: Option<Uuid>,
    pub sdr_nome: String,

    pub closer_id: Option<Uuid>,
    pub closer_nome: Option<String>,

    pub nome_lead: String,
    pub data_agendamento: NaiveDate,

    #[sqlx(try_from = "String")]
    pub status: StatusAgendamento,

    pub qualificado: bool,
    pub origem: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoAgendamento {
    pub sdr_id: Uuid,
    pub closer_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Informe o nome do lead"))]
    pub nome_lead: String,
    pub data_agendamento: NaiveDate,
    pub status: StatusAgendamento,
    pub qualificado: bool,
    pub origem: Option<String>,
}
