// src/models/meta.rs

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Metas do mês, uma linha por `mes_ano` (ex: "2025-03").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetaMensal {
    pub id: Uuid,
    pub mes_ano: String,

    pub meta_receita: Decimal,
    pub meta_por_closer: Decimal,
    pub ticket_medio: Decimal,

    // Percentuais (0-100)
    pub taxa_conversao: Decimal,
    pub taxa_qualificacao: Decimal,
    pub taxa_comparecimento: Decimal,
}

/// Metas já convertidas para os calculadores.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Alvos {
    pub receita: f64,
    pub por_closer: f64,
    pub ticket_medio: f64,
    pub taxa_conversao: f64,
    pub taxa_qualificacao: f64,
    pub taxa_comparecimento: f64,
}

impl MetaMensal {
    pub fn alvos(&self) -> Alvos {
        let f = |d: Decimal| d.to_f64().unwrap_or(0.0);
        Alvos {
            receita: f(self.meta_receita),
            por_closer: f(self.meta_por_closer),
            ticket_medio: f(self.ticket_medio),
            taxa_conversao: f(self.taxa_conversao),
            taxa_qualificacao: f(self.taxa_qualificacao),
            taxa_comparecimento: f(self.taxa_comparecimento),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalvarMetaPayload {
    #[validate(custom(function = "nao_negativo", message = "A meta de receita não pode ser negativa"))]
    pub meta_receita: Decimal,
    #[validate(custom(function = "nao_negativo", message = "A meta por closer não pode ser negativa"))]
    pub meta_por_closer: Decimal,
    #[validate(custom(function = "nao_negativo", message = "O ticket médio não pode ser negativo"))]
    pub ticket_medio: Decimal,
    #[validate(custom(function = "percentual", message = "Use um percentual entre 0 e 100"))]
    pub taxa_conversao: Decimal,
    #[validate(custom(function = "percentual", message = "Use um percentual entre 0 e 100"))]
    pub taxa_qualificacao: Decimal,
    #[validate(custom(function = "percentual", message = "Use um percentual entre 0 e 100"))]
    pub taxa_comparecimento: Decimal,
}

pub(crate) fn nao_negativo(valor: &Decimal) -> Result<(), validator::ValidationError> {
    if valor.is_sign_negative() && !valor.is_zero() {
        return Err(validator::ValidationError::new("negative"));
    }
    Ok(())
}

fn percentual(valor: &Decimal) -> Result<(), validator::ValidationError> {
    nao_negativo(valor)?;
    if *valor > Decimal::ONE_HUNDRED {
        return Err(validator::ValidationError::new("out_of_range"));
    }
    Ok(())
}
