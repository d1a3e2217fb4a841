// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::common::month::MesReferencia;

// =============================================================================
//  SQUADS
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesempenhoSquad {
    pub nome: String,
    pub membros: Vec<String>,
    pub receita: f64,
    pub contratos: u32,
    pub realizados: u32,
    pub taxa_conversao: f64,
    pub ticket_medio: f64,
    pub participacao_receita: f64,
    pub posicao: u32,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparativoSquads {
    pub squads: Vec<DesempenhoSquad>,
    pub lider: Option<String>,
    // Receita do líder menos a do segundo colocado
    pub vantagem_lider: f64,
}

// =============================================================================
//  TRÁFEGO
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotaisTrafego {
    pub investimento: f64,
    pub leads: u64,
    pub fechamentos: u64,
    pub receita: f64,
    pub cpl: f64,
    pub cac: f64,
    pub roas: f64,
    pub taxa_conversao_lead: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricasCanal {
    pub canal: String,
    pub campanhas: u32,
    pub investimento: f64,
    pub leads: u64,
    pub fechamentos: u64,
    pub receita: f64,
    pub cpl: f64,
    pub cac: f64,
    pub roas: f64,
    pub participacao_investimento: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjecaoTrafego {
    pub investimento_projetado: f64,
    pub leads_projetados: f64,
    pub fechamentos_projetados: f64,
    pub receita_projetada: f64,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PainelTrafego {
    pub totais: TotaisTrafego,
    pub canais: Vec<MetricasCanal>,
    pub melhor_canal: Option<String>,
    pub projecao: ProjecaoTrafego,
}

// =============================================================================
//  FUNIL
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EtapaFunil {
    pub etapa: String,
    pub quantidade: u64,
    pub percentual_topo: f64,
    pub percentual_etapa_anterior: f64,
}

// =============================================================================
//  EXECUTIVO / PROJEÇÕES
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CenarioProjecao {
    pub nome: String,
    pub multiplicador: f64,
    pub projecao_final: f64,
    pub percentual_meta: f64,
    // Probabilidade (0-100) de atingir este cenário, vinda da tabela fixa
    pub probabilidade: u8,
    pub atinge_meta: bool,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjecaoMensal {
    pub meta_mensal: f64,
    pub receita_atual: f64,
    pub percentual_meta_atual: f64,
    pub media_diaria: f64,
    pub dias_uteis_decorridos: u32,
    pub dias_uteis_restantes: u32,
    pub cenarios: Vec<CenarioProjecao>,
}

// Indicador contra a meta do mês
#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndicadorMeta {
    pub valor: f64,
    pub meta: f64,
    pub percentual_meta: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardKpi {
    pub titulo: String,
    pub valor: f64,
    pub valor_formatado: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoExecutivo {
    #[schema(value_type = String, example = "2025-03")]
    pub mes: MesReferencia,
    pub receita: IndicadorMeta,
    pub contratos: u32,
    pub ticket_medio: IndicadorMeta,
    pub taxa_conversao: IndicadorMeta,
    pub taxa_comparecimento: IndicadorMeta,
    pub taxa_qualificacao: IndicadorMeta,
    pub projecao: ProjecaoMensal,
    pub cards: Vec<CardKpi>,
}

// =============================================================================
//  COMPARATIVO MÊS A MÊS
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Variacao {
    pub atual: f64,
    pub anterior: f64,
    pub diferenca: f64,
    pub percentual: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparativoMensal {
    #[schema(value_type = String, example = "2025-03")]
    pub mes_atual: MesReferencia,
    #[schema(value_type = String, example = "2025-03")]
    pub mes_anterior: MesReferencia,
    pub receita: Variacao,
    pub contratos: Variacao,
    pub ticket_medio: Variacao,
    pub taxa_conversao: Variacao,
    pub taxa_comparecimento: Variacao,
}
