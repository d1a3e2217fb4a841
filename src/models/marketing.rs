// src/models/marketing.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Campanha como chega da edge function `fetch-meta-campaigns`
// (ou convertida a partir de `marketing_metrics`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CampanhaData {
    pub nome: String,
    pub canal: String,
    pub investimento: f64,
    pub leads: u64,
    pub cpl: f64,
    pub fechamentos: u64,
    pub receita: f64,
    pub roas: f64,
}

// Linha da tabela `marketing_metrics` (lançamento manual por canal/mês)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MetricaMarketing {
    pub id: Uuid,
    pub mes_ano: String,
    pub canal: String,
    pub investimento: Decimal,
    pub leads: i64,
    pub fechamentos: i64,
    pub receita: Decimal,
}

// Etapas do CRM, em ordem de avanço no funil
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EtapaLead {
    #[default]
    Lead,
    Mql,
    Sql,
    Cliente,
}

impl From<String> for EtapaLead {
    fn from(valor: String) -> Self {
        match valor.trim().to_lowercase().as_str() {
            "mql" => EtapaLead::Mql,
            "sql" => EtapaLead::Sql,
            "cliente" | "ganho" => EtapaLead::Cliente,
            _ => EtapaLead::Lead,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeadCrm {
    pub id: Uuid,
    pub nome: String,
    pub origem: Option<String>,

    #[sqlx(try_from = "String")]
    pub etapa: EtapaLead,

    pub created_at: DateTime<Utc>,
}
