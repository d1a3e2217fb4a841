// src/models/planilha.rs
//
// Linha genérica da planilha comercial (export CSV do Google Sheets).
// Os nomes das colunas são os cabeçalhos da planilha, em caixa alta.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::format::{formatar_moeda, FormatoNumerico};
use crate::models::venda::Venda;

pub mod colunas {
    pub const NOME_DA_CALL: &str = "NOME DA CALL";
    pub const FECHAMENTO: &str = "FECHAMENTO";
    pub const VALOR: &str = "VALOR";
    pub const CLOSER_FECHOU: &str = "CLOSER FECHOU";
    pub const SDR: &str = "SDR";
    pub const DATA: &str = "DATA";
    pub const ORIGEM: &str = "ORIGEM";
    pub const ASSINATURA: &str = "ASSINATURA";
    pub const PAGAMENTO: &str = "PAGAMENTO";
    // Só existe nas linhas geradas a partir da tabela `vendas`
    pub const ID_VENDA: &str = "ID VENDA";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinhaPlanilha(HashMap<String, String>);

impl LinhaPlanilha {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cabeçalhos são comparados sem espaços nas pontas e em caixa alta.
    pub fn get(&self, coluna: &str) -> Option<&str> {
        self.0
            .get(coluna)
            .or_else(|| self.0.get(&coluna.trim().to_uppercase()))
            .map(String::as_str)
    }

    /// Valor aparado, tratando célula vazia como ausente.
    pub fn texto(&self, coluna: &str) -> Option<&str> {
        self.get(coluna).map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn set(&mut self, coluna: &str, valor: impl Into<String>) {
        self.0.insert(coluna.trim().to_uppercase(), valor.into());
    }

    pub fn com(mut self, coluna: &str, valor: impl Into<String>) -> Self {
        self.set(coluna, valor);
        self
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for LinhaPlanilha {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut linha = LinhaPlanilha::new();
        for (coluna, valor) in iter {
            linha.set(coluna.as_ref(), valor);
        }
        linha
    }
}

/// Converte uma venda do banco para o formato de linha da planilha,
/// para que o calculador financeiro trate as duas fontes da mesma forma.
///
/// Assinatura e pagamento não existem na tabela `vendas`; ficam vazios.
/// A linha leva o id da venda, o que a isenta do filtro de rodapé.
pub fn venda_to_sheet_row(venda: &Venda, sdr: Option<&str>) -> LinhaPlanilha {
    LinhaPlanilha::new()
        .com(colunas::ID_VENDA, venda.id.to_string())
        .com(colunas::NOME_DA_CALL, venda.nome_lead.clone())
        .com(colunas::FECHAMENTO, "SIM")
        .com(colunas::VALOR, formatar_moeda(venda.valor_f64(), FormatoNumerico::PtBr))
        .com(colunas::CLOSER_FECHOU, venda.colaborador_nome.clone())
        .com(colunas::SDR, sdr.unwrap_or_default())
        .com(colunas::DATA, venda.data_fechamento.format("%d/%m/%Y").to_string())
        .com(colunas::ORIGEM, venda.origem.as_str())
        .com(colunas::ASSINATURA, "")
        .com(colunas::PAGAMENTO, "")
}

/// Resultado de uma importação da planilha para a tabela `vendas`.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoImportacao {
    pub importadas: usize,
    pub descartadas: usize,
    pub duplicadas: usize,
    pub sem_closer: usize,
    pub avisos: Vec<String>,
}
