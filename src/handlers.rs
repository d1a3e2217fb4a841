pub mod ai;
pub mod cadastros;
pub mod dashboard;
pub mod importacao;
pub mod trafego;

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::common::{error::AppError, month::MesReferencia};

// ?mes=YYYY-MM (ou MM-YYYY); sem o parâmetro, o mês corrente.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FiltroMes {
    /// Mês de referência (YYYY-MM ou MM-YYYY)
    pub mes: Option<String>,
}

impl FiltroMes {
    pub fn resolver(&self, hoje: NaiveDate) -> Result<MesReferencia, AppError> {
        match self.mes.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            Some(texto) => Ok(texto.parse::<MesReferencia>()?),
            None => Ok(MesReferencia::de_data(hoje)),
        }
    }
}

pub fn hoje() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_filter_defaults_to_current_month() {
        let hoje = NaiveDate::from_ymd_opt(2025, 3, 18).unwrap();
        let filtro = FiltroMes::default();
        assert_eq!(filtro.resolver(hoje).unwrap().to_string(), "2025-03");

        let filtro = FiltroMes { mes: Some("02-2025".into()) };
        assert_eq!(filtro.resolver(hoje).unwrap().to_string(), "2025-02");

        let filtro = FiltroMes { mes: Some("2025-13".into()) };
        assert!(matches!(filtro.resolver(hoje), Err(AppError::InvalidMonth(_))));
    }
}
