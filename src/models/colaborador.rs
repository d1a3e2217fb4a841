// src/models/colaborador.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TipoColaborador {
    Sdr,
    Closer,
}

impl TipoColaborador {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoColaborador::Sdr => "sdr",
            TipoColaborador::Closer => "closer",
        }
    }
}

impl From<String> for TipoColaborador {
    fn from(valor: String) -> Self {
        match valor.trim().to_lowercase().as_str() {
            "sdr" => TipoColaborador::Sdr,
            _ => TipoColaborador::Closer,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Colaborador {
    pub id: Uuid,
    pub nome: String,

    #[sqlx(try_from = "String")]
    pub tipo: TipoColaborador,

    // Quando vazio, o squad é inferido pela tabela de classificação.
    pub squad: Option<String>,
    pub ativo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoColaborador {
    #[validate(length(min = 1, message = "Informe o nome do colaborador"))]
    pub nome: String,
    pub tipo: TipoColaborador,
    pub squad: Option<String>,
    pub ativo: bool,
}
