// src/metrics/executivo.rs
//
// Visão executiva do mês: indicadores contra a meta e projeção de fechamento.
//
// A projeção é uma extrapolação linear do ritmo diário:
//   final = atual + media_diaria * dias_uteis_restantes * multiplicador
// As probabilidades de cada cenário vêm de uma tabela fixa indexada pelo
// percentual da meta já atingido; não há modelo estatístico por trás.

use chrono::NaiveDate;

use crate::common::format::{formatar_moeda, formatar_numero, formatar_percentual, FormatoNumerico};
use crate::common::month::MesReferencia;
use crate::metrics::desempenho::totalizar_agendamentos;
use crate::metrics::{razao, taxa};
use crate::models::agendamento::Agendamento;
use crate::models::dashboard::{CardKpi, CenarioProjecao, IndicadorMeta, ProjecaoMensal, ResumoExecutivo};
use crate::models::meta::Alvos;
use crate::models::venda::Venda;

pub const MULTIPLICADOR_REALISTA: f64 = 1.0;
pub const MULTIPLICADOR_OTIMISTA: f64 = 1.1;
pub const MULTIPLICADOR_PESSIMISTA: f64 = 0.8;

/// (percentual mínimo da meta atingido, prob. otimista, prob. realista, prob. pessimista)
const TABELA_PROBABILIDADES: [(f64, u8, u8, u8); 4] = [
    (70.0, 65, 80, 95),
    (50.0, 45, 65, 85),
    (30.0, 25, 45, 70),
    (0.0, 10, 25, 50),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjecaoEntrada {
    pub meta_mensal: f64,
    pub receita_atual: f64,
    pub dias_uteis_decorridos: u32,
    pub dias_uteis_totais: u32,
}

fn probabilidades(percentual_meta: f64) -> (u8, u8, u8) {
    TABELA_PROBABILIDADES
        .iter()
        .find(|(minimo, ..)| percentual_meta >= *minimo)
        .map(|(_, o, r, p)| (*o, *r, *p))
        // percentual negativo (estornos) cai na última faixa
        .unwrap_or((10, 25, 50))
}

fn arredondar_centavos(valor: f64) -> f64 {
    (valor * 100.0).round() / 100.0
}

pub fn projetar(entrada: ProjecaoEntrada) -> ProjecaoMensal {
    let decorridos = entrada.dias_uteis_decorridos.min(entrada.dias_uteis_totais);
    let restantes = entrada.dias_uteis_totais - decorridos;
    let media_diaria = razao(entrada.receita_atual, decorridos as f64);
    let percentual_meta_atual = taxa(entrada.receita_atual, entrada.meta_mensal);

    let (p_otimista, p_realista, p_pessimista) = probabilidades(percentual_meta_atual);

    let cenario = |nome: &str, multiplicador: f64, probabilidade: u8| {
        let projecao_final = arredondar_centavos(
            entrada.receita_atual + media_diaria * restantes as f64 * multiplicador,
        );
        CenarioProjecao {
            nome: nome.to_string(),
            multiplicador,
            projecao_final,
            percentual_meta: taxa(projecao_final, entrada.meta_mensal),
            probabilidade,
            atinge_meta: entrada.meta_mensal > 0.0 && projecao_final >= entrada.meta_mensal,
        }
    };

    ProjecaoMensal {
        meta_mensal: entrada.meta_mensal,
        receita_atual: entrada.receita_atual,
        percentual_meta_atual,
        media_diaria,
        dias_uteis_decorridos: decorridos,
        dias_uteis_restantes: restantes,
        cenarios: vec![
            cenario("pessimista", MULTIPLICADOR_PESSIMISTA, p_pessimista),
            cenario("realista", MULTIPLICADOR_REALISTA, p_realista),
            cenario("otimista", MULTIPLICADOR_OTIMISTA, p_otimista),
        ],
    }
}

fn indicador(valor: f64, meta: f64) -> IndicadorMeta {
    IndicadorMeta {
        valor,
        meta,
        percentual_meta: taxa(valor, meta),
    }
}

pub fn resumo_executivo(
    mes: MesReferencia,
    hoje: NaiveDate,
    vendas: &[Venda],
    agendamentos: &[Agendamento],
    alvos: Option<&Alvos>,
    formato: FormatoNumerico,
) -> ResumoExecutivo {
    let alvos = alvos.copied().unwrap_or_default();
    let totais = totalizar_agendamentos(agendamentos);

    let receita: f64 = vendas.iter().map(Venda::valor_f64).sum();
    let contratos = vendas.len() as u32;
    let ticket_medio = razao(receita, contratos as f64);
    let taxa_conversao = taxa(contratos as f64, totais.total_realizados as f64);

    let projecao = projetar(ProjecaoEntrada {
        meta_mensal: alvos.receita,
        receita_atual: receita,
        dias_uteis_decorridos: mes.dias_uteis_ate(hoje),
        dias_uteis_totais: mes.dias_uteis(),
    });

    let realista = projecao
        .cenarios
        .iter()
        .find(|c| c.multiplicador == MULTIPLICADOR_REALISTA)
        .map(|c| c.projecao_final)
        .unwrap_or(receita);

    let cards = vec![
        CardKpi {
            titulo: "Receita".into(),
            valor: receita,
            valor_formatado: formatar_moeda(receita, formato),
        },
        CardKpi {
            titulo: "Contratos".into(),
            valor: contratos as f64,
            valor_formatado: formatar_numero(contratos as f64, 0, formato),
        },
        CardKpi {
            titulo: "Ticket médio".into(),
            valor: ticket_medio,
            valor_formatado: formatar_moeda(ticket_medio, formato),
        },
        CardKpi {
            titulo: "Conversão".into(),
            valor: taxa_conversao,
            valor_formatado: formatar_percentual(taxa_conversao, formato),
        },
        CardKpi {
            titulo: "Projeção do mês".into(),
            valor: realista,
            valor_formatado: formatar_moeda(realista, formato),
        },
    ];

    ResumoExecutivo {
        mes,
        receita: indicador(receita, alvos.receita),
        contratos,
        ticket_medio: indicador(ticket_medio, alvos.ticket_medio),
        taxa_conversao: indicador(taxa_conversao, alvos.taxa_conversao),
        taxa_comparecimento: indicador(totais.taxa_comparecimento, alvos.taxa_comparecimento),
        taxa_qualificacao: indicador(totais.taxa_qualificacao, alvos.taxa_qualificacao),
        projecao,
        cards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testes::{agendamento, approx, venda};
    use crate::models::agendamento::StatusAgendamento;

    fn cenario<'a>(p: &'a ProjecaoMensal, nome: &str) -> &'a CenarioProjecao {
        p.cenarios.iter().find(|c| c.nome == nome).unwrap()
    }

    #[test]
    fn optimistic_projection_midway_through_month() {
        let p = projetar(ProjecaoEntrada {
            meta_mensal: 100_000.0,
            receita_atual: 25_000.0,
            dias_uteis_decorridos: 11,
            dias_uteis_totais: 22,
        });

        assert_eq!(cenario(&p, "otimista").projecao_final, 52_500.0);
        assert_eq!(cenario(&p, "realista").projecao_final, 50_000.0);
        assert_eq!(cenario(&p, "pessimista").projecao_final, 45_000.0);
        assert_eq!(p.dias_uteis_restantes, 11);
        assert!(approx(p.percentual_meta_atual, 25.0));
        assert!(!cenario(&p, "otimista").atinge_meta);
    }

    #[test]
    fn probability_bands_come_from_the_table() {
        let base = ProjecaoEntrada {
            meta_mensal: 100_000.0,
            receita_atual: 70_000.0,
            dias_uteis_decorridos: 15,
            dias_uteis_totais: 22,
        };
        let p = projetar(base);
        assert_eq!(cenario(&p, "otimista").probabilidade, 65);
        assert_eq!(cenario(&p, "realista").probabilidade, 80);
        assert!(cenario(&p, "realista").atinge_meta);

        let p = projetar(ProjecaoEntrada { receita_atual: 10_000.0, ..base });
        assert_eq!(cenario(&p, "otimista").probabilidade, 10);
        assert_eq!(cenario(&p, "pessimista").probabilidade, 50);
    }

    #[test]
    fn first_day_and_missing_target_are_safe() {
        let p = projetar(ProjecaoEntrada {
            meta_mensal: 0.0,
            receita_atual: 0.0,
            dias_uteis_decorridos: 0,
            dias_uteis_totais: 21,
        });
        assert_eq!(p.media_diaria, 0.0);
        assert_eq!(p.percentual_meta_atual, 0.0);
        assert!(p.cenarios.iter().all(|c| c.projecao_final == 0.0 && !c.atinge_meta));
    }

    #[test]
    fn closed_month_projects_to_actual() {
        let p = projetar(ProjecaoEntrada {
            meta_mensal: 50_000.0,
            receita_atual: 40_000.0,
            dias_uteis_decorridos: 30,
            dias_uteis_totais: 21,
        });
        assert_eq!(p.dias_uteis_restantes, 0);
        assert!(p.cenarios.iter().all(|c| c.projecao_final == 40_000.0));
    }

    #[test]
    fn executive_summary_against_targets() {
        let mes = MesReferencia::new(2025, 3).unwrap();
        let hoje = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let vendas = vec![venda("Bruno", "A", 6_000.0), venda("Ana", "B", 4_000.0)];
        let agendamentos = vec![
            agendamento("Sara", Some("Bruno"), "A", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Ana"), "B", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Ana"), "C", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Ana"), "D", StatusAgendamento::Realizado),
        ];
        let alvos = Alvos {
            receita: 100_000.0,
            ticket_medio: 4_000.0,
            taxa_conversao: 25.0,
            ..Default::default()
        };

        let r = resumo_executivo(mes, hoje, &vendas, &agendamentos, Some(&alvos), FormatoNumerico::PtBr);

        assert_eq!(r.receita.valor, 10_000.0);
        assert!(approx(r.receita.percentual_meta, 10.0));
        assert!(approx(r.ticket_medio.percentual_meta, 125.0));
        assert!(approx(r.taxa_conversao.valor, 50.0));
        // 5 dias úteis decorridos de 21 -> 2.000/dia, 16 restantes
        assert_eq!(r.projecao.dias_uteis_decorridos, 5);
        assert_eq!(cenario(&r.projecao, "realista").projecao_final, 42_000.0);
        assert_eq!(r.cards[0].valor_formatado, "R$ 10.000,00");
        assert_eq!(r.cards[4].valor_formatado, "R$ 42.000,00");
    }
}
