// src/metrics.rs
//
// Calculadores puros: recebem as linhas já carregadas e devolvem o objeto de
// métricas. Nenhum I/O aqui; nenhuma função retorna erro. Toda divisão passa
// por `razao`/`taxa`, que devolvem 0 quando o denominador é 0.

pub mod comparativo;
pub mod desempenho;
pub mod executivo;
pub mod financeiro;
pub mod funil;
pub mod squads;
pub mod trafego;

/// `a / b`, ou 0 quando `b` é 0 (ou o resultado não é finito).
pub fn razao(numerador: f64, denominador: f64) -> f64 {
    if denominador == 0.0 {
        return 0.0;
    }
    let r = numerador / denominador;
    if r.is_finite() { r } else { 0.0 }
}

/// Percentual (0-100) com a mesma proteção de `razao`.
pub fn taxa(numerador: f64, denominador: f64) -> f64 {
    razao(numerador, denominador) * 100.0
}

pub fn participacao(parte: f64, total: f64) -> f64 {
    taxa(parte, total)
}

#[cfg(test)]
pub(crate) mod testes {
    // Construtores de fixture compartilhados pelos testes dos calculadores

    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal::prelude::FromPrimitive;
    use uuid::Uuid;

    use crate::models::agendamento::{Agendamento, StatusAgendamento};
    use crate::models::colaborador::{Colaborador, TipoColaborador};
    use crate::models::venda::{OrigemVenda, Venda};

    pub fn dia(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    pub fn venda(closer: &str, lead: &str, valor: f64) -> Venda {
        Venda {
            id: Uuid::new_v4(),
            colaborador_id: None,
            colaborador_nome: closer.to_string(),
            valor: Decimal::from_f64(valor).unwrap(),
            origem: OrigemVenda::Inbound,
            nome_lead: lead.to_string(),
            data_fechamento: dia(10),
        }
    }

    pub fn agendamento(
        sdr: &str,
        closer: Option<&str>,
        lead: &str,
        status: StatusAgendamento,
    ) -> Agendamento {
        Agendamento {
            id: Uuid::new_v4(),
            sdr_id: None,
            sdr_nome: sdr.to_string(),
            closer_id: None,
            closer_nome: closer.map(str::to_string),
            nome_lead: lead.to_string(),
            data_agendamento: dia(5),
            status,
            qualificado: status == StatusAgendamento::Realizado,
            origem: None,
        }
    }

    pub fn colaborador(nome: &str, tipo: TipoColaborador) -> Colaborador {
        Colaborador {
            id: Uuid::new_v4(),
            nome: nome.to_string(),
            tipo,
            squad: None,
            ativo: true,
        }
    }

    pub fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator_yields_exact_zero() {
        assert_eq!(razao(10.0, 0.0), 0.0);
        assert_eq!(taxa(0.0, 0.0), 0.0);
        assert_eq!(participacao(5.0, 0.0), 0.0);
        assert_eq!(razao(f64::MAX, f64::MIN_POSITIVE), 0.0);
    }

    #[test]
    fn percentages() {
        assert_eq!(taxa(1.0, 4.0), 25.0);
        assert_eq!(razao(10.0, 4.0), 2.5);
    }
}
