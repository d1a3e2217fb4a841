// src/models/venda.rs

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// No banco a origem é TEXT; valores desconhecidos caem em Inbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrigemVenda {
    Indicacao,
    Outbound,
    #[default]
    Inbound,
}

impl OrigemVenda {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrigemVenda::Indicacao => "indicacao",
            OrigemVenda::Outbound => "outbound",
            OrigemVenda::Inbound => "inbound",
        }
    }
}

impl From<String> for OrigemVenda {
    fn from(valor: String) -> Self {
        match valor.trim().to_lowercase().as_str() {
            "indicacao" | "indicação" => OrigemVenda::Indicacao,
            "outbound" => OrigemVenda::Outbound,
            "inbound" => OrigemVenda::Inbound,
            outro => {
                if !outro.is_empty() {
                    tracing::warn!(origem = %outro, "Origem de venda desconhecida, usando inbound");
                }
                OrigemVenda::Inbound
            }
        }
    }
}

// --- VENDA ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Venda {
    pub id: Uuid,

    // Closer que fechou. O nome vem do JOIN com `colaboradores`.
    pub colaborador_id: Option<Uuid>,
    pub colaborador_nome: String,

    pub valor: Decimal,

    #[sqlx(try_from = "String")]
    pub origem: OrigemVenda,

    pub nome_lead: String,
    pub data_fechamento: NaiveDate,
}

impl Venda {
    /// Valor em `f64` para os calculadores.
    pub fn valor_f64(&self) -> f64 {
        self.valor.to_f64().unwrap_or(0.0)
    }
}

/// Dados para criação/edição de uma venda (formulário ou importação).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovaVenda {
    pub colaborador_id: Option<Uuid>,
    /// Nome do closer quando não há colaborador cadastrado.
    #[serde(default)]
    pub closer_nome: Option<String>,
    #[validate(custom(function = "crate::models::meta::nao_negativo", message = "O valor da venda não pode ser negativo"))]
    pub valor: Decimal,
    pub origem: OrigemVenda,
    #[validate(length(min = 1, message = "Informe o nome do lead"))]
    pub nome_lead: String,
    pub data_fechamento: NaiveDate,
}
