// src/models/desempenho.rs

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotaisAgendamentos {
    pub total_agendados: u32,
    pub total_realizados: u32,
    pub total_no_show: u32,
    pub total_cancelados: u32,
    pub total_qualificados: u32,

    // realizados / (realizados + no-show)
    pub taxa_comparecimento: f64,
    // qualificados / realizados
    pub taxa_qualificacao: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricasSdr {
    pub nome: String,
    pub squad: String,

    pub agendados: u32,
    pub realizados: u32,
    pub qualificados: u32,
    pub no_show: u32,
    pub taxa_no_show: f64,

    pub contratos: u32,
    pub receita: f64,
    pub participacao_receita: f64,
    pub ticket_medio: f64,
    pub taxa_conversao: f64,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PainelSdr {
    pub totais: TotaisAgendamentos,
    pub sdrs: Vec<MetricasSdr>,
    pub receita_total: f64,
    // Vendas sem agendamento correspondente: contam na receita, não no SDR
    pub receita_nao_atribuida: f64,
    pub vendas_nao_atribuidas: u32,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricasCloser {
    pub nome: String,
    pub squad: String,

    pub calls_recebidas: u32,
    pub realizadas: u32,
    pub qualificados: u32,
    pub no_show: u32,
    pub taxa_no_show: f64,

    pub contratos: u32,
    pub receita: f64,
    pub participacao_receita: f64,
    pub ticket_medio: f64,
    pub taxa_conversao: f64,

    // Só quando existe meta individual no mês
    pub percentual_meta: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PainelCloser {
    pub totais: TotaisAgendamentos,
    pub closers: Vec<MetricasCloser>,
    pub receita_total: f64,
    pub contratos_total: u32,
}
