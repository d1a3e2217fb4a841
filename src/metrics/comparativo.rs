// src/metrics/comparativo.rs

use crate::metrics::taxa;
use crate::models::dashboard::{ComparativoMensal, ResumoExecutivo, Variacao};

/// Variação percentual sobre o período anterior; 0% quando não há base.
pub fn variacao(atual: f64, anterior: f64) -> Variacao {
    Variacao {
        atual,
        anterior,
        diferenca: atual - anterior,
        percentual: taxa(atual - anterior, anterior.abs()),
    }
}

pub fn comparar_meses(atual: &ResumoExecutivo, anterior: &ResumoExecutivo) -> ComparativoMensal {
    ComparativoMensal {
        mes_atual: atual.mes,
        mes_anterior: anterior.mes,
        receita: variacao(atual.receita.valor, anterior.receita.valor),
        contratos: variacao(atual.contratos as f64, anterior.contratos as f64),
        ticket_medio: variacao(atual.ticket_medio.valor, anterior.ticket_medio.valor),
        taxa_conversao: variacao(atual.taxa_conversao.valor, anterior.taxa_conversao.valor),
        taxa_comparecimento: variacao(
            atual.taxa_comparecimento.valor,
            anterior.taxa_comparecimento.valor,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::format::FormatoNumerico;
    use crate::common::month::MesReferencia;
    use crate::metrics::executivo::resumo_executivo;
    use crate::metrics::testes::venda;
    use chrono::NaiveDate;

    #[test]
    fn growth_and_decline() {
        assert_eq!(variacao(150.0, 100.0).percentual, 50.0);
        assert_eq!(variacao(50.0, 100.0).percentual, -50.0);
        assert_eq!(variacao(10.0, -20.0).percentual, 150.0);
    }

    #[test]
    fn no_previous_base_is_zero_percent() {
        let v = variacao(1000.0, 0.0);
        assert_eq!(v.percentual, 0.0);
        assert_eq!(v.diferenca, 1000.0);
    }

    #[test]
    fn month_over_month() {
        let marco = MesReferencia::new(2025, 3).unwrap();
        let fim = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();

        let atual = resumo_executivo(
            marco,
            fim,
            &[venda("Bruno", "A", 3000.0), venda("Bruno", "B", 3000.0)],
            &[],
            None,
            FormatoNumerico::PtBr,
        );
        let anterior = resumo_executivo(
            marco.anterior(),
            fim,
            &[venda("Bruno", "C", 4000.0)],
            &[],
            None,
            FormatoNumerico::PtBr,
        );

        let c = comparar_meses(&atual, &anterior);
        assert_eq!(c.mes_anterior.to_string(), "2025-02");
        assert_eq!(c.receita.percentual, 50.0);
        assert_eq!(c.contratos.percentual, 100.0);
        assert_eq!(c.ticket_medio.percentual, -25.0);
    }
}
