// src/metrics/financeiro.rs
//
// Métricas financeiras da planilha de contratos: receita fechada, assinada e
// paga, os gaps entre as etapas e as quebras por squad, SDR e closer.

use std::collections::HashMap;

use crate::common::parse::{normalizar_nome, parse_sim, parse_valor_opt};
use crate::metrics::squads::ClassificadorSquads;
use crate::metrics::taxa;
use crate::models::financeiro::{
    Contratos, FinanceiroColaborador, FinanceiroSquad, Gaps, MetricasFinanceiras, Receitas,
    TaxasFinanceiras,
};
use crate::models::planilha::{colunas, LinhaPlanilha};

const TOKENS_RODAPE: [&str; 2] = ["TOP", "TOTAL"];

/// Linhas de rodapé/resumo da planilha: `NOME DA CALL` presente mas vazio, ou
/// contendo as palavras TOP/TOTAL. Linhas sem a coluna não são rodapé, nem as
/// que vieram de uma venda do banco (`ID VENDA` preenchido).
pub fn is_linha_rodape(linha: &LinhaPlanilha) -> bool {
    if linha.texto(colunas::ID_VENDA).is_some() {
        return false;
    }
    let Some(nome) = linha.get(colunas::NOME_DA_CALL) else {
        return false;
    };
    let nome = nome.trim();
    if nome.is_empty() {
        return true;
    }

    nome.to_uppercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| TOKENS_RODAPE.contains(&token))
}

pub fn is_fechada(linha: &LinhaPlanilha) -> bool {
    linha
        .get(colunas::FECHAMENTO)
        .is_some_and(|f| f.trim().eq_ignore_ascii_case("SIM"))
}

#[derive(Debug, Clone, Copy)]
struct Contrato {
    valor: f64,
    assinado: bool,
    pago: bool,
}

impl Contrato {
    fn de_linha(linha: &LinhaPlanilha) -> Self {
        let pago = linha.get(colunas::PAGAMENTO).is_some_and(parse_sim);
        // Contrato pago é tratado como assinado
        let assinado = pago || linha.get(colunas::ASSINATURA).is_some_and(parse_sim);

        Self {
            valor: parse_valor_opt(linha.get(colunas::VALOR)),
            assinado,
            pago,
        }
    }

    fn assinada(&self) -> f64 {
        if self.assinado { self.valor } else { 0.0 }
    }

    fn paga(&self) -> f64 {
        if self.pago { self.valor } else { 0.0 }
    }
}

// Acumulador por chave (nome normalizado), preservando o primeiro nome visto
#[derive(Default)]
struct Agrupador {
    ordem: Vec<String>,
    grupos: HashMap<String, FinanceiroColaborador>,
}

impl Agrupador {
    fn somar(&mut self, nome: &str, contrato: &Contrato) {
        let chave = normalizar_nome(nome);
        let grupo = self.grupos.entry(chave.clone()).or_insert_with(|| {
            self.ordem.push(chave);
            FinanceiroColaborador {
                nome: nome.trim().to_string(),
                ..Default::default()
            }
        });
        grupo.contratos += 1;
        grupo.receita_total += contrato.valor;
        grupo.receita_assinada += contrato.assinada();
        grupo.receita_paga += contrato.paga();
    }

    fn ranking(mut self) -> Vec<FinanceiroColaborador> {
        let mut lista: Vec<FinanceiroColaborador> = self
            .ordem
            .iter()
            .filter_map(|chave| self.grupos.remove(chave))
            .collect();

        lista.sort_by(|a, b| {
            b.receita_paga
                .total_cmp(&a.receita_paga)
                .then(b.receita_total.total_cmp(&a.receita_total))
                .then(a.nome.cmp(&b.nome))
        });
        lista
    }
}

pub fn calcular_metricas_financeiras(
    linhas: &[LinhaPlanilha],
    classificador: &ClassificadorSquads,
) -> MetricasFinanceiras {
    let mut receitas = Receitas::default();
    let mut contratos = Contratos::default();

    let mut por_squad: Vec<FinanceiroSquad> = classificador
        .squads()
        .into_iter()
        .map(|squad| FinanceiroSquad {
            squad: squad.to_string(),
            ..Default::default()
        })
        .collect();
    let mut por_sdr = Agrupador::default();
    let mut por_closer = Agrupador::default();

    let mut linhas_descartadas = 0usize;

    for linha in linhas {
        if is_linha_rodape(linha) {
            linhas_descartadas += 1;
            continue;
        }
        if !is_fechada(linha) {
            continue;
        }

        let contrato = Contrato::de_linha(linha);

        contratos.total += 1;
        receitas.total += contrato.valor;
        if contrato.assinado {
            contratos.assinados += 1;
            receitas.assinada += contrato.valor;
        }
        if contrato.pago {
            contratos.pagos += 1;
            receitas.paga += contrato.valor;
        }

        let closer = linha.texto(colunas::CLOSER_FECHOU);

        // Sem closer a linha cai no squad padrão, como qualquer nome não mapeado
        let squad = classificador.classificar(closer.unwrap_or_default());
        if let Some(s) = por_squad.iter_mut().find(|s| s.squad == squad) {
            s.contratos += 1;
            s.receita_total += contrato.valor;
            s.receita_assinada += contrato.assinada();
            s.receita_paga += contrato.paga();
        }

        if let Some(closer) = closer {
            por_closer.somar(closer, &contrato);
        }
        if let Some(sdr) = linha.texto(colunas::SDR) {
            por_sdr.somar(sdr, &contrato);
        }
    }

    let gaps = Gaps {
        assinatura: receitas.total - receitas.assinada,
        pagamento: receitas.assinada - receitas.paga,
    };
    let taxas = TaxasFinanceiras {
        assinatura: taxa(receitas.assinada, receitas.total),
        pagamento: taxa(receitas.paga, receitas.assinada),
        recebimento: taxa(receitas.paga, receitas.total),
    };

    tracing::debug!(
        linhas = linhas.len(),
        contratos = contratos.total,
        descartadas = linhas_descartadas,
        "Métricas financeiras calculadas"
    );

    MetricasFinanceiras {
        receitas,
        contratos,
        gaps,
        taxas,
        por_squad,
        por_sdr: por_sdr.ranking(),
        por_closer: por_closer.ranking(),
        linhas_descartadas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testes::{approx, venda};
    use crate::models::planilha::venda_to_sheet_row;

    fn linha(pares: &[(&str, &str)]) -> LinhaPlanilha {
        pares.iter().copied().collect()
    }

    #[test]
    fn single_closed_row_from_unmapped_closer() {
        let linhas = vec![linha(&[
            ("FECHAMENTO", "SIM"),
            ("VALOR", "R$ 10.000,00"),
            ("CLOSER FECHOU", "Bruno"),
        ])];

        let m = calcular_metricas_financeiras(&linhas, &ClassificadorSquads::default());

        assert_eq!(m.receitas.total, 10000.0);
        assert_eq!(m.contratos.total, 1);

        let hot = m.por_squad.iter().find(|s| s.squad == "Hot Dogs").unwrap();
        assert_eq!(hot.contratos, 1);
        assert_eq!(hot.receita_total, 10000.0);
        let corvo = m.por_squad.iter().find(|s| s.squad == "Corvo Azul").unwrap();
        assert_eq!(corvo.contratos, 0);
    }

    #[test]
    fn footer_and_blank_call_rows_are_excluded() {
        let linhas = vec![
            linha(&[("NOME DA CALL", "Clínica Alfa"), ("FECHAMENTO", "SIM"), ("VALOR", "1.000,00")]),
            linha(&[("NOME DA CALL", ""), ("FECHAMENTO", "SIM"), ("VALOR", "500,00")]),
            linha(&[("NOME DA CALL", "TOTAL"), ("FECHAMENTO", "SIM"), ("VALOR", "99.999,00")]),
            linha(&[("NOME DA CALL", "Top 10 closers"), ("FECHAMENTO", "SIM"), ("VALOR", "1,00")]),
            // "Topázio" não é o token TOP
            linha(&[("NOME DA CALL", "Topázio Ltda"), ("FECHAMENTO", "SIM"), ("VALOR", "200,00")]),
        ];

        let m = calcular_metricas_financeiras(&linhas, &ClassificadorSquads::default());

        assert_eq!(m.contratos.total, 2);
        assert_eq!(m.receitas.total, 1200.0);
        assert_eq!(m.linhas_descartadas, 3);
    }

    #[test]
    fn database_sales_with_footer_words_in_lead_are_kept() {
        let vendas = [
            venda("Bruno", "Top Fitness Academia", 8000.0),
            venda("Bruno", "Total Saúde", 2000.0),
        ];
        let linhas: Vec<LinhaPlanilha> = vendas.iter().map(|v| venda_to_sheet_row(v, None)).collect();

        let m = calcular_metricas_financeiras(&linhas, &ClassificadorSquads::default());

        assert_eq!(m.contratos.total, 2);
        assert!(approx(m.receitas.total, 10_000.0));
        assert_eq!(m.linhas_descartadas, 0);
    }

    #[test]
    fn open_rows_do_not_count() {
        let linhas = vec![
            linha(&[("FECHAMENTO", "NÃO"), ("VALOR", "1.000,00")]),
            linha(&[("FECHAMENTO", ""), ("VALOR", "1.000,00")]),
            linha(&[("FECHAMENTO", " sim "), ("VALOR", "300")]),
        ];
        let m = calcular_metricas_financeiras(&linhas, &ClassificadorSquads::default());
        assert_eq!(m.contratos.total, 1);
        assert_eq!(m.receitas.total, 300.0);
    }

    #[test]
    fn signature_and_payment_gaps() {
        let linhas = vec![
            linha(&[("FECHAMENTO", "SIM"), ("VALOR", "1.000"), ("ASSINATURA", "SIM"), ("PAGAMENTO", "SIM")]),
            linha(&[("FECHAMENTO", "SIM"), ("VALOR", "3.000"), ("ASSINATURA", "SIM")]),
            linha(&[("FECHAMENTO", "SIM"), ("VALOR", "6.000")]),
        ];

        let m = calcular_metricas_financeiras(&linhas, &ClassificadorSquads::default());

        assert_eq!(m.receitas.total, 10_000.0);
        assert_eq!(m.receitas.assinada, 4_000.0);
        assert_eq!(m.receitas.paga, 1_000.0);
        assert_eq!(m.gaps.assinatura, 6_000.0);
        assert_eq!(m.gaps.pagamento, 3_000.0);
        assert!(approx(m.taxas.assinatura, 40.0));
        assert!(approx(m.taxas.pagamento, 25.0));
        assert!(approx(m.taxas.recebimento, 10.0));
        assert_eq!(m.contratos.assinados, 2);
        assert_eq!(m.contratos.pagos, 1);
    }

    #[test]
    fn paid_without_signature_flag_counts_as_signed() {
        let linhas = vec![linha(&[("FECHAMENTO", "SIM"), ("VALOR", "500"), ("PAGAMENTO", "PAGO")])];
        let m = calcular_metricas_financeiras(&linhas, &ClassificadorSquads::default());
        assert_eq!(m.receitas.assinada, 500.0);
        assert_eq!(m.gaps.pagamento, 0.0);
    }

    #[test]
    fn empty_input_has_zero_rates() {
        let m = calcular_metricas_financeiras(&[], &ClassificadorSquads::default());
        assert_eq!(m.taxas.assinatura, 0.0);
        assert_eq!(m.taxas.pagamento, 0.0);
        assert_eq!(m.taxas.recebimento, 0.0);
        assert!(m.por_closer.is_empty());
        assert_eq!(m.por_squad.len(), 2);
    }

    #[test]
    fn collaborator_ranking_by_paid_revenue() {
        let linhas = vec![
            linha(&[("FECHAMENTO", "SIM"), ("VALOR", "5.000"), ("CLOSER FECHOU", "Ana"), ("SDR", "Caio")]),
            linha(&[("FECHAMENTO", "SIM"), ("VALOR", "2.000"), ("CLOSER FECHOU", "Bruno"), ("SDR", "Caio"), ("PAGAMENTO", "SIM")]),
            linha(&[("FECHAMENTO", "SIM"), ("VALOR", "1.000"), ("CLOSER FECHOU", " ana "), ("SDR", "Duda"), ("PAGAMENTO", "SIM")]),
            // sem closer nem SDR: entra no total, não nas quebras
            linha(&[("FECHAMENTO", "SIM"), ("VALOR", "700")]),
        ];

        let m = calcular_metricas_financeiras(&linhas, &ClassificadorSquads::default());

        let closers: Vec<&str> = m.por_closer.iter().map(|c| c.nome.as_str()).collect();
        assert_eq!(closers, vec!["Bruno", "Ana"]);
        assert_eq!(m.por_closer[1].contratos, 2);
        assert_eq!(m.por_closer[1].receita_total, 6_000.0);

        let soma_closers: f64 = m.por_closer.iter().map(|c| c.receita_total).sum();
        let soma_sdrs: f64 = m.por_sdr.iter().map(|c| c.receita_total).sum();
        assert!(soma_closers <= m.receitas.total);
        assert!(soma_sdrs <= m.receitas.total);
        assert_eq!(m.por_sdr[0].nome, "Caio");
    }
}
