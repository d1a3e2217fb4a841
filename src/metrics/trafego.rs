// src/metrics/trafego.rs
//
// Consolidação das campanhas de mídia paga: totais, quebra por canal
// (ranking por ROAS) e projeção linear do mês.

use rust_decimal::prelude::ToPrimitive;

use crate::common::parse::normalizar_nome;
use crate::metrics::{participacao, razao, taxa};
use crate::models::dashboard::{MetricasCanal, PainelTrafego, ProjecaoTrafego, TotaisTrafego};
use crate::models::marketing::{CampanhaData, MetricaMarketing};

fn totalizar(campanhas: &[CampanhaData]) -> TotaisTrafego {
    let mut t = TotaisTrafego::default();
    for c in campanhas {
        t.investimento += c.investimento;
        t.leads += c.leads;
        t.fechamentos += c.fechamentos;
        t.receita += c.receita;
    }
    t.cpl = razao(t.investimento, t.leads as f64);
    t.cac = razao(t.investimento, t.fechamentos as f64);
    t.roas = razao(t.receita, t.investimento);
    t.taxa_conversao_lead = taxa(t.fechamentos as f64, t.leads as f64);
    t
}

pub fn consolidar_campanhas(campanhas: &[CampanhaData]) -> (TotaisTrafego, Vec<MetricasCanal>) {
    let totais = totalizar(campanhas);

    let mut canais: Vec<MetricasCanal> = Vec::new();
    for c in campanhas {
        let nome = if c.canal.trim().is_empty() { "outros" } else { c.canal.trim() };
        let chave = normalizar_nome(nome);

        let pos = match canais.iter().position(|m| normalizar_nome(&m.canal) == chave) {
            Some(pos) => pos,
            None => {
                canais.push(MetricasCanal {
                    canal: nome.to_string(),
                    ..Default::default()
                });
                canais.len() - 1
            }
        };

        let canal = &mut canais[pos];
        canal.campanhas += 1;
        canal.investimento += c.investimento;
        canal.leads += c.leads;
        canal.fechamentos += c.fechamentos;
        canal.receita += c.receita;
    }

    for canal in canais.iter_mut() {
        canal.cpl = razao(canal.investimento, canal.leads as f64);
        canal.cac = razao(canal.investimento, canal.fechamentos as f64);
        canal.roas = razao(canal.receita, canal.investimento);
        canal.participacao_investimento = participacao(canal.investimento, totais.investimento);
    }

    canais.sort_by(|a, b| {
        b.roas
            .total_cmp(&a.roas)
            .then(b.receita.total_cmp(&a.receita))
            .then(a.canal.cmp(&b.canal))
    });

    (totais, canais)
}

/// Projeção linear: ritmo diário até hoje × dias do mês.
pub fn projetar_trafego(totais: &TotaisTrafego, dias_no_mes: u32, dias_decorridos: u32) -> ProjecaoTrafego {
    let fator = razao(dias_no_mes as f64, dias_decorridos as f64);
    ProjecaoTrafego {
        investimento_projetado: totais.investimento * fator,
        leads_projetados: totais.leads as f64 * fator,
        fechamentos_projetados: totais.fechamentos as f64 * fator,
        receita_projetada: totais.receita * fator,
    }
}

pub fn montar_painel_trafego(
    campanhas: &[CampanhaData],
    dias_no_mes: u32,
    dias_decorridos: u32,
) -> PainelTrafego {
    let (totais, canais) = consolidar_campanhas(campanhas);
    let projecao = projetar_trafego(&totais, dias_no_mes, dias_decorridos);
    let melhor_canal = canais
        .first()
        .filter(|c| c.investimento > 0.0)
        .map(|c| c.canal.clone());

    PainelTrafego {
        totais,
        canais,
        melhor_canal,
        projecao,
    }
}

/// Linhas lançadas manualmente em `marketing_metrics` viram campanhas (uma por canal).
pub fn campanhas_de_marketing(metricas: &[MetricaMarketing]) -> Vec<CampanhaData> {
    metricas
        .iter()
        .map(|m| {
            let investimento = m.investimento.to_f64().unwrap_or(0.0);
            let receita = m.receita.to_f64().unwrap_or(0.0);
            let leads = m.leads.max(0) as u64;
            CampanhaData {
                nome: format!("{} ({})", m.canal, m.mes_ano),
                canal: m.canal.clone(),
                investimento,
                leads,
                cpl: razao(investimento, leads as f64),
                fechamentos: m.fechamentos.max(0) as u64,
                receita,
                roas: razao(receita, investimento),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testes::approx;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn campanha(canal: &str, investimento: f64, leads: u64, fechamentos: u64, receita: f64) -> CampanhaData {
        CampanhaData {
            nome: format!("Campanha {}", canal),
            canal: canal.to_string(),
            investimento,
            leads,
            fechamentos,
            receita,
            ..Default::default()
        }
    }

    #[test]
    fn totals_roas_and_cac() {
        let campanhas = vec![
            campanha("Meta", 1000.0, 50, 2, 8000.0),
            campanha("meta ", 1000.0, 50, 0, 0.0),
            campanha("Google", 500.0, 10, 1, 5000.0),
        ];

        let (t, canais) = consolidar_campanhas(&campanhas);

        assert_eq!(t.investimento, 2500.0);
        assert_eq!(t.leads, 110);
        assert!(approx(t.roas, 13000.0 / 2500.0));
        assert!(approx(t.cac, 2500.0 / 3.0));
        assert!(approx(t.cpl, 2500.0 / 110.0));

        assert_eq!(canais.len(), 2);
        assert_eq!(canais[0].canal, "Google");
        assert!(approx(canais[0].roas, 10.0));
        assert_eq!(canais[1].campanhas, 2);
        assert!(approx(canais[1].roas, 4.0));
        assert!(approx(canais[1].participacao_investimento, 80.0));
    }

    #[test]
    fn zero_spend_and_zero_closes_are_safe() {
        let (t, canais) = consolidar_campanhas(&[campanha("Orgânico", 0.0, 30, 0, 0.0)]);
        assert_eq!(t.roas, 0.0);
        assert_eq!(t.cac, 0.0);
        assert_eq!(canais[0].participacao_investimento, 0.0);

        let painel = montar_painel_trafego(&[], 30, 0);
        assert_eq!(painel.melhor_canal, None);
        assert_eq!(painel.projecao.investimento_projetado, 0.0);
    }

    #[test]
    fn linear_month_projection() {
        let (t, _) = consolidar_campanhas(&[campanha("Meta", 1000.0, 40, 2, 6000.0)]);
        let p = projetar_trafego(&t, 30, 10);
        assert!(approx(p.investimento_projetado, 3000.0));
        assert!(approx(p.leads_projetados, 120.0));
        assert!(approx(p.receita_projetada, 18000.0));
    }

    #[test]
    fn marketing_rows_become_campaigns() {
        let linhas = vec![MetricaMarketing {
            id: Uuid::new_v4(),
            mes_ano: "2025-03".into(),
            canal: "Google".into(),
            investimento: Decimal::new(200000, 2),
            leads: 40,
            fechamentos: -1,
            receita: Decimal::new(1000000, 2),
        }];
        let campanhas = campanhas_de_marketing(&linhas);
        assert_eq!(campanhas[0].fechamentos, 0);
        assert!(approx(campanhas[0].cpl, 50.0));
        assert!(approx(campanhas[0].roas, 5.0));
    }
}
