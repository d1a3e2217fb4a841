// src/metrics/funil.rs

use crate::metrics::taxa;
use crate::models::agendamento::{Agendamento, StatusAgendamento};
use crate::models::dashboard::EtapaFunil;
use crate::models::marketing::{EtapaLead, LeadCrm};
use crate::models::venda::Venda;

/// Percentuais de cada etapa em relação ao topo e à etapa anterior.
pub fn montar_funil(etapas: &[(&str, u64)]) -> Vec<EtapaFunil> {
    let topo = etapas.first().map(|(_, q)| *q).unwrap_or(0);

    let mut anterior = topo;
    etapas
        .iter()
        .enumerate()
        .map(|(i, (etapa, quantidade))| {
            let percentual_etapa_anterior = if i == 0 {
                taxa(*quantidade as f64, topo as f64)
            } else {
                taxa(*quantidade as f64, anterior as f64)
            };
            anterior = *quantidade;
            EtapaFunil {
                etapa: etapa.to_string(),
                quantidade: *quantidade,
                percentual_topo: taxa(*quantidade as f64, topo as f64),
                percentual_etapa_anterior,
            }
        })
        .collect()
}

/// Leads -> MQL -> SQL -> Agendados -> Realizados -> Vendas.
///
/// Um lead em etapa avançada conta em todas as anteriores (SQL também é MQL).
pub fn funil_comercial(leads: &[LeadCrm], agendamentos: &[Agendamento], vendas: &[Venda]) -> Vec<EtapaFunil> {
    let contar = |minima: EtapaLead| leads.iter().filter(|l| l.etapa >= minima).count() as u64;

    let agendados = agendamentos
        .iter()
        .filter(|a| a.status != StatusAgendamento::Cancelado)
        .count() as u64;
    let realizados = agendamentos
        .iter()
        .filter(|a| a.status == StatusAgendamento::Realizado)
        .count() as u64;

    montar_funil(&[
        ("Leads", leads.len() as u64),
        ("MQL", contar(EtapaLead::Mql)),
        ("SQL", contar(EtapaLead::Sql)),
        ("Agendados", agendados),
        ("Realizados", realizados),
        ("Vendas", vendas.len() as u64),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testes::{agendamento, approx, venda};
    use chrono::Utc;
    use uuid::Uuid;

    fn lead(etapa: EtapaLead) -> LeadCrm {
        LeadCrm {
            id: Uuid::new_v4(),
            nome: "Lead".into(),
            origem: None,
            etapa,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn percentages_from_top_and_previous() {
        let f = montar_funil(&[("A", 200), ("B", 100), ("C", 25)]);
        assert_eq!(f[0].percentual_topo, 100.0);
        assert_eq!(f[0].percentual_etapa_anterior, 100.0);
        assert_eq!(f[1].percentual_topo, 50.0);
        assert_eq!(f[2].percentual_etapa_anterior, 25.0);
        assert!(approx(f[2].percentual_topo, 12.5));
    }

    #[test]
    fn empty_stages_do_not_divide_by_zero() {
        let f = montar_funil(&[("A", 0), ("B", 0)]);
        assert!(f.iter().all(|e| e.percentual_topo == 0.0 && e.percentual_etapa_anterior == 0.0));
        assert!(montar_funil(&[]).is_empty());
    }

    #[test]
    fn commercial_funnel_is_cumulative() {
        let leads = vec![
            lead(EtapaLead::Lead),
            lead(EtapaLead::Mql),
            lead(EtapaLead::Sql),
            lead(EtapaLead::Cliente),
        ];
        let agendamentos = vec![
            agendamento("Sara", Some("Bruno"), "L1", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Bruno"), "L2", StatusAgendamento::Cancelado),
            agendamento("Sara", Some("Bruno"), "L3", StatusAgendamento::NoShow),
        ];
        let vendas = vec![venda("Bruno", "L1", 100.0)];

        let f = funil_comercial(&leads, &agendamentos, &vendas);
        let quantidades: Vec<u64> = f.iter().map(|e| e.quantidade).collect();
        assert_eq!(quantidades, vec![4, 3, 2, 2, 1, 1]);
    }
}
