// src/models/financeiro.rs

use serde::Serialize;
use utoipa::ToSchema;

// Saída do calculador financeiro (visão da planilha de contratos)

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
pub struct Receitas {
    pub total: f64,
    pub assinada: f64,
    pub paga: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
pub struct Contratos {
    pub total: u32,
    pub assinados: u32,
    pub pagos: u32,
}

// Diferenças entre etapas: o que foi fechado e ainda não foi assinado/pago
#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
pub struct Gaps {
    pub assinatura: f64,
    pub pagamento: f64,
}

// Percentuais (0-100) sobre receita
#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
pub struct TaxasFinanceiras {
    pub assinatura: f64,
    pub pagamento: f64,
    pub recebimento: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinanceiroSquad {
    pub squad: String,
    pub contratos: u32,
    pub receita_total: f64,
    pub receita_assinada: f64,
    pub receita_paga: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinanceiroColaborador {
    pub nome: String,
    pub contratos: u32,
    pub receita_total: f64,
    pub receita_assinada: f64,
    pub receita_paga: f64,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricasFinanceiras {
    pub receitas: Receitas,
    pub contratos: Contratos,
    pub gaps: Gaps,
    pub taxas: TaxasFinanceiras,

    pub por_squad: Vec<FinanceiroSquad>,
    #[serde(rename = "porSDR")]
    pub por_sdr: Vec<FinanceiroColaborador>,
    pub por_closer: Vec<FinanceiroColaborador>,

    // Linhas de rodapé (TOP/TOTAL) e sem nome de call
    pub linhas_descartadas: usize,
}
