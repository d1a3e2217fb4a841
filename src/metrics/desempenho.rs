// src/metrics/desempenho.rs
//
// Desempenho individual de SDRs e closers no mês.
//
// A ligação venda -> agendamento é heurística (mesmo lead e mesmo closer, por
// nome), pois a venda não guarda o id do agendamento. Venda sem agendamento
// correspondente continua contando na receita; só não entra nas estatísticas
// do SDR.

use std::collections::HashMap;

use crate::common::parse::normalizar_nome;
use crate::metrics::squads::{indexar_colaboradores, squad_por_nome, ClassificadorSquads};
use crate::metrics::{participacao, razao, taxa};
use crate::models::agendamento::{Agendamento, StatusAgendamento};
use crate::models::colaborador::{Colaborador, TipoColaborador};
use crate::models::desempenho::{
    MetricasCloser, MetricasSdr, PainelCloser, PainelSdr, TotaisAgendamentos,
};
use crate::models::meta::Alvos;
use crate::models::venda::Venda;

pub fn totalizar_agendamentos(agendamentos: &[Agendamento]) -> TotaisAgendamentos {
    let mut t = TotaisAgendamentos::default();

    for a in agendamentos {
        t.total_agendados += 1;
        match a.status {
            StatusAgendamento::Realizado => t.total_realizados += 1,
            StatusAgendamento::NoShow => t.total_no_show += 1,
            StatusAgendamento::Cancelado => t.total_cancelados += 1,
            StatusAgendamento::Agendado => {}
        }
        if a.qualificado {
            t.total_qualificados += 1;
        }
    }

    t.taxa_comparecimento = taxa(
        t.total_realizados as f64,
        (t.total_realizados + t.total_no_show) as f64,
    );
    t.taxa_qualificacao = taxa(t.total_qualificados as f64, t.total_realizados as f64);
    t
}

/// Encontra o agendamento que originou a venda: mesmo lead e mesmo closer.
/// Havendo mais de um, prefere o que foi realizado.
pub fn correlacionar_venda<'a>(venda: &Venda, agendamentos: &'a [Agendamento]) -> Option<&'a Agendamento> {
    let lead = normalizar_nome(&venda.nome_lead);
    let closer = normalizar_nome(&venda.colaborador_nome);
    if lead.is_empty() {
        return None;
    }

    let mut candidatos = agendamentos.iter().filter(|a| {
        normalizar_nome(&a.nome_lead) == lead
            && a.closer_nome.as_deref().map(normalizar_nome).as_deref() == Some(closer.as_str())
    });

    let primeiro = candidatos.next()?;
    if primeiro.status == StatusAgendamento::Realizado {
        return Some(primeiro);
    }
    candidatos
        .find(|a| a.status == StatusAgendamento::Realizado)
        .or(Some(primeiro))
}

// Lista de colaboradores de um tipo: ativos do cadastro + nomes que aparecem
// nos dados (nome literal quando não há cadastro).
struct Registro<T> {
    ordem: Vec<String>,
    itens: HashMap<String, T>,
}

impl<T> Registro<T> {
    fn new() -> Self {
        Self { ordem: Vec::new(), itens: HashMap::new() }
    }

    fn entrada(&mut self, nome: &str, criar: impl FnOnce(&str) -> T) -> Option<&mut T> {
        let chave = normalizar_nome(nome);
        if chave.is_empty() {
            return None;
        }
        if !self.itens.contains_key(&chave) {
            self.ordem.push(chave.clone());
            self.itens.insert(chave.clone(), criar(nome.trim()));
        }
        self.itens.get_mut(&chave)
    }

    fn into_vec(mut self) -> Vec<T> {
        self.ordem
            .iter()
            .filter_map(|chave| self.itens.remove(chave))
            .collect()
    }
}

// =============================================================================
//  SDR
// =============================================================================

pub fn calcular_metricas_sdr(
    vendas: &[Venda],
    agendamentos: &[Agendamento],
    colaboradores: &[Colaborador],
    classificador: &ClassificadorSquads,
) -> PainelSdr {
    let cadastro = indexar_colaboradores(colaboradores);
    let novo = |nome: &str| MetricasSdr {
        nome: nome.to_string(),
        squad: squad_por_nome(nome, &cadastro, classificador),
        ..Default::default()
    };

    let mut registro: Registro<MetricasSdr> = Registro::new();
    for c in colaboradores
        .iter()
        .filter(|c| c.ativo && c.tipo == TipoColaborador::Sdr)
    {
        registro.entrada(&c.nome, novo);
    }

    for a in agendamentos {
        let Some(sdr) = registro.entrada(&a.sdr_nome, novo) else {
            continue;
        };
        sdr.agendados += 1;
        match a.status {
            StatusAgendamento::Realizado => sdr.realizados += 1,
            StatusAgendamento::NoShow => sdr.no_show += 1,
            _ => {}
        }
        if a.qualificado {
            sdr.qualificados += 1;
        }
    }

    let mut receita_total = 0.0;
    let mut receita_nao_atribuida = 0.0;
    let mut vendas_nao_atribuidas = 0u32;

    for venda in vendas {
        let valor = venda.valor_f64();
        receita_total += valor;

        let origem = match correlacionar_venda(venda, agendamentos) {
            Some(a) => registro.entrada(&a.sdr_nome, novo),
            None => None,
        };
        match origem {
            Some(sdr) => {
                sdr.contratos += 1;
                sdr.receita += valor;
            }
            None => {
                receita_nao_atribuida += valor;
                vendas_nao_atribuidas += 1;
            }
        }
    }

    if vendas_nao_atribuidas > 0 {
        tracing::debug!(
            vendas_nao_atribuidas,
            receita_nao_atribuida,
            "Vendas sem agendamento correspondente"
        );
    }

    let mut sdrs = registro.into_vec();
    for s in sdrs.iter_mut() {
        s.taxa_no_show = taxa(s.no_show as f64, (s.realizados + s.no_show) as f64);
        s.participacao_receita = participacao(s.receita, receita_total);
        s.ticket_medio = razao(s.receita, s.contratos as f64);
        s.taxa_conversao = taxa(s.contratos as f64, s.realizados as f64);
    }
    sdrs.sort_by(|a, b| {
        b.receita
            .total_cmp(&a.receita)
            .then(b.contratos.cmp(&a.contratos))
            .then(b.realizados.cmp(&a.realizados))
            .then(a.nome.cmp(&b.nome))
    });

    PainelSdr {
        totais: totalizar_agendamentos(agendamentos),
        sdrs,
        receita_total,
        receita_nao_atribuida,
        vendas_nao_atribuidas,
    }
}

// =============================================================================
//  CLOSER
// =============================================================================

pub fn calcular_metricas_closer(
    vendas: &[Venda],
    agendamentos: &[Agendamento],
    colaboradores: &[Colaborador],
    classificador: &ClassificadorSquads,
    alvos: Option<&Alvos>,
) -> PainelCloser {
    let cadastro = indexar_colaboradores(colaboradores);
    let novo = |nome: &str| MetricasCloser {
        nome: nome.to_string(),
        squad: squad_por_nome(nome, &cadastro, classificador),
        ..Default::default()
    };

    let mut registro: Registro<MetricasCloser> = Registro::new();
    for c in colaboradores
        .iter()
        .filter(|c| c.ativo && c.tipo == TipoColaborador::Closer)
    {
        registro.entrada(&c.nome, novo);
    }

    for a in agendamentos {
        let Some(nome) = a.closer_nome.as_deref() else {
            continue;
        };
        let Some(closer) = registro.entrada(nome, novo) else {
            continue;
        };
        closer.calls_recebidas += 1;
        match a.status {
            StatusAgendamento::Realizado => closer.realizadas += 1,
            StatusAgendamento::NoShow => closer.no_show += 1,
            _ => {}
        }
        if a.qualificado {
            closer.qualificados += 1;
        }
    }

    let mut receita_total = 0.0;
    let mut contratos_total = 0u32;

    for venda in vendas {
        let valor = venda.valor_f64();
        receita_total += valor;
        contratos_total += 1;

        if let Some(closer) = registro.entrada(&venda.colaborador_nome, novo) {
            closer.contratos += 1;
            closer.receita += valor;
        }
    }

    let meta_individual = alvos.map(|a| a.por_closer).filter(|m| *m > 0.0);

    let mut closers = registro.into_vec();
    for c in closers.iter_mut() {
        c.taxa_no_show = taxa(c.no_show as f64, (c.realizadas + c.no_show) as f64);
        c.participacao_receita = participacao(c.receita, receita_total);
        c.ticket_medio = razao(c.receita, c.contratos as f64);
        c.taxa_conversao = taxa(c.contratos as f64, c.realizadas as f64);
        c.percentual_meta = meta_individual.map(|meta| taxa(c.receita, meta));
    }
    closers.sort_by(|a, b| {
        b.receita
            .total_cmp(&a.receita)
            .then(b.contratos.cmp(&a.contratos))
            .then(a.nome.cmp(&b.nome))
    });

    PainelCloser {
        totais: totalizar_agendamentos(agendamentos),
        closers,
        receita_total,
        contratos_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testes::{agendamento, approx, colaborador, venda};

    #[test]
    fn no_show_counts_only_as_no_show() {
        let agendamentos = vec![
            agendamento("Sara", Some("Bruno"), "Lead A", StatusAgendamento::NoShow),
            agendamento("Sara", Some("Bruno"), "Lead B", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Bruno"), "Lead C", StatusAgendamento::Cancelado),
            agendamento("Sara", Some("Bruno"), "Lead D", StatusAgendamento::Agendado),
        ];

        let t = totalizar_agendamentos(&agendamentos);

        assert_eq!(t.total_agendados, 4);
        assert_eq!(t.total_no_show, 1);
        assert_eq!(t.total_realizados, 1);
        assert_eq!(t.total_cancelados, 1);
        assert!(approx(t.taxa_comparecimento, 50.0));
    }

    #[test]
    fn empty_appointments_have_zero_rates() {
        let t = totalizar_agendamentos(&[]);
        assert_eq!(t.taxa_comparecimento, 0.0);
        assert_eq!(t.taxa_qualificacao, 0.0);
    }

    #[test]
    fn correlation_requires_lead_and_closer() {
        let agendamentos = vec![
            agendamento("Sara", Some("Ana"), "Clínica Alfa", StatusAgendamento::Realizado),
            agendamento("Caio", Some("Bruno"), "clínica  alfa", StatusAgendamento::NoShow),
            agendamento("Caio", Some("Bruno"), "Clínica Alfa", StatusAgendamento::Realizado),
        ];

        let v = venda("Bruno", "CLÍNICA ALFA", 1000.0);
        let origem = correlacionar_venda(&v, &agendamentos).unwrap();
        assert_eq!(origem.sdr_nome, "Caio");
        assert_eq!(origem.status, StatusAgendamento::Realizado);

        let outra = venda("Carlos", "Clínica Alfa", 1000.0);
        assert!(correlacionar_venda(&outra, &agendamentos).is_none());
    }

    #[test]
    fn unmatched_sale_keeps_revenue_but_not_sdr_stats() {
        let colaboradores = vec![
            colaborador("Sara", TipoColaborador::Sdr),
            colaborador("Caio", TipoColaborador::Sdr),
        ];
        let agendamentos = vec![
            agendamento("Sara", Some("Bruno"), "Lead A", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Bruno"), "Lead B", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Bruno"), "Lead C", StatusAgendamento::NoShow),
        ];
        let vendas = vec![
            venda("Bruno", "Lead A", 6000.0),
            venda("Bruno", "Lead sem agenda", 4000.0),
        ];

        let p = calcular_metricas_sdr(&vendas, &agendamentos, &colaboradores, &ClassificadorSquads::default());

        assert_eq!(p.receita_total, 10000.0);
        assert_eq!(p.receita_nao_atribuida, 4000.0);
        assert_eq!(p.vendas_nao_atribuidas, 1);

        let sara = &p.sdrs[0];
        assert_eq!(sara.nome, "Sara");
        assert_eq!(sara.agendados, 3);
        assert_eq!(sara.realizados, 2);
        assert_eq!(sara.no_show, 1);
        assert_eq!(sara.contratos, 1);
        assert!(approx(sara.taxa_conversao, 50.0));
        assert!(approx(sara.participacao_receita, 60.0));
        assert!(approx(sara.taxa_no_show, 100.0 / 3.0));

        // SDR ativo sem movimento aparece zerado
        let caio = &p.sdrs[1];
        assert_eq!(caio.nome, "Caio");
        assert_eq!(caio.taxa_conversao, 0.0);
        assert_eq!(caio.ticket_medio, 0.0);

        let soma: f64 = p.sdrs.iter().map(|s| s.receita).sum();
        assert!(soma <= p.receita_total);
    }

    #[test]
    fn closer_metrics_and_individual_target() {
        let colaboradores = vec![colaborador("Bruno", TipoColaborador::Closer)];
        let agendamentos = vec![
            agendamento("Sara", Some("Bruno"), "Lead A", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Bruno"), "Lead B", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Bruno"), "Lead C", StatusAgendamento::NoShow),
            agendamento("Sara", Some("Vinicius"), "Lead D", StatusAgendamento::Realizado),
        ];
        let vendas = vec![
            venda("Bruno", "Lead A", 8000.0),
            venda("Vinicius", "Lead D", 2000.0),
        ];
        let alvos = Alvos { por_closer: 16000.0, ..Default::default() };

        let p = calcular_metricas_closer(
            &vendas,
            &agendamentos,
            &colaboradores,
            &ClassificadorSquads::default(),
            Some(&alvos),
        );

        assert_eq!(p.contratos_total, 2);
        assert_eq!(p.closers.len(), 2);

        let bruno = &p.closers[0];
        assert_eq!(bruno.nome, "Bruno");
        assert_eq!(bruno.squad, "Hot Dogs");
        assert_eq!(bruno.calls_recebidas, 3);
        assert_eq!(bruno.realizadas, 2);
        assert_eq!(bruno.qualificados, 2);
        assert_eq!(bruno.no_show, 1);
        assert!(approx(bruno.taxa_no_show, 100.0 / 3.0));
        assert!(approx(bruno.taxa_conversao, 50.0));
        assert!(approx(bruno.participacao_receita, 80.0));
        assert_eq!(bruno.percentual_meta, Some(50.0));

        // Nome fora do cadastro entra pelo nome literal
        let vinicius = &p.closers[1];
        assert_eq!(vinicius.nome, "Vinicius");
        assert_eq!(vinicius.squad, "Corvo Azul");
        assert_eq!(vinicius.taxa_no_show, 0.0);
    }

    #[test]
    fn closer_without_target_has_no_percentage() {
        let vendas = vec![venda("Bruno", "Lead A", 100.0)];
        let p = calcular_metricas_closer(&vendas, &[], &[], &ClassificadorSquads::default(), None);
        assert_eq!(p.closers[0].percentual_meta, None);
        // Sem calls realizadas a conversão é 0, não infinito
        assert_eq!(p.closers[0].taxa_conversao, 0.0);
    }
}
