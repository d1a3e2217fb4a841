// src/models/ai.rs
//
// Contratos das edge functions (`ai-assistant`, `ai-trafego-analyst`,
// `fetch-meta-campaigns`). Os nomes de campo seguem o JSON das funções.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::dashboard::{MetricasCanal, TotaisTrafego};
use crate::models::marketing::CampanhaData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TipoAssistente {
    Analysis,
    Chat,
    Simulation,
    Report,
}

impl TipoAssistente {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoAssistente::Analysis => "analysis",
            TipoAssistente::Chat => "chat",
            TipoAssistente::Simulation => "simulation",
            TipoAssistente::Report => "report",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct MensagemChat {
    pub role: String,
    pub content: String,
}

// POST ai-assistant
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssistenteRequest {
    #[serde(rename = "type")]
    pub tipo: TipoAssistente,
    #[schema(value_type = Object)]
    pub metrics: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<MensagemChat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub changes: Option<Value>,
}

// POST ai-trafego-analyst
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnaliseTrafegoRequest {
    pub campanhas: Vec<CampanhaData>,
    pub totais: TotaisTrafego,
    pub canais: Vec<MetricasCanal>,
    pub dias_no_mes: u32,
    pub dias_decorridos: u32,
    pub data_atual: NaiveDate,
    // etapa do funil -> % de conversão a partir da etapa anterior
    pub taxas_conversao: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnaliseTrafegoResponse {
    pub success: bool,
    #[serde(default)]
    pub analysis: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampanhasMetaResponse {
    pub success: bool,
    #[serde(default)]
    pub campanhas: Vec<CampanhaData>,
    #[serde(default)]
    pub meta: Value,
}

// Corpo de erro devolvido pelas funções: { "error": "..." }
#[derive(Debug, Clone, Deserialize)]
pub struct ErroEdgeFunction {
    pub error: String,
}

// Resposta que o painel recebe de /api/trafego/analise
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnaliseTrafegoResultado {
    #[schema(value_type = Object)]
    pub analysis: Value,
    pub em_cache: bool,
    pub gerada_em: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assistant_body_uses_edge_function_field_names() {
        let req = AssistenteRequest {
            tipo: TipoAssistente::Chat,
            metrics: json!({ "receita": 1000 }),
            history: Some(vec![MensagemChat { role: "user".into(), content: "oi".into() }]),
            question: Some("Como está o mês?".into()),
            changes: None,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["type"], "chat");
        assert_eq!(body["question"], "Como está o mês?");
        assert!(body.get("changes").is_none());
    }

    #[test]
    fn meta_campaigns_payload_tolerates_missing_fields() {
        let resp: CampanhasMetaResponse = serde_json::from_value(json!({
            "success": true,
            "campanhas": [{ "nome": "Black Friday", "canal": "meta", "investimento": 1500.0 }]
        }))
        .unwrap();
        assert_eq!(resp.campanhas.len(), 1);
        assert_eq!(resp.campanhas[0].leads, 0);
        assert!(resp.meta.is_null());
    }
}
