// src/common/month.rs

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("'{0}' não é um mês válido (use AAAA-MM)")]
pub struct MesInvalido(pub String);

/// Mês de referência das consultas e das metas (`metas_mensais.mes_ano`).
///
/// Aceita `2025-03` e `03-2025`; sempre é exibido como `2025-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MesReferencia {
    pub ano: i32,
    pub mes: u32,
}

impl MesReferencia {
    pub fn new(ano: i32, mes: u32) -> Result<Self, MesInvalido> {
        if !(1..=12).contains(&mes) || NaiveDate::from_ymd_opt(ano, mes, 1).is_none() {
            return Err(MesInvalido(format!("{:04}-{:02}", ano, mes)));
        }
        Ok(Self { ano, mes })
    }

    pub fn de_data(data: NaiveDate) -> Self {
        Self { ano: data.year(), mes: data.month() }
    }

    pub fn primeiro_dia(&self) -> NaiveDate {
        // Invariante garantida pelo construtor
        NaiveDate::from_ymd_opt(self.ano, self.mes, 1).unwrap_or_default()
    }

    pub fn ultimo_dia(&self) -> NaiveDate {
        self.proximo()
            .primeiro_dia()
            .pred_opt()
            .unwrap_or_else(|| self.primeiro_dia())
    }

    pub fn anterior(&self) -> Self {
        if self.mes == 1 {
            Self { ano: self.ano - 1, mes: 12 }
        } else {
            Self { ano: self.ano, mes: self.mes - 1 }
        }
    }

    pub fn proximo(&self) -> Self {
        if self.mes == 12 {
            Self { ano: self.ano + 1, mes: 1 }
        } else {
            Self { ano: self.ano, mes: self.mes + 1 }
        }
    }

    pub fn contem(&self, data: NaiveDate) -> bool {
        data.year() == self.ano && data.month() == self.mes
    }

    pub fn dias_no_mes(&self) -> u32 {
        self.ultimo_dia().day()
    }

    /// Dias úteis (segunda a sexta) do mês inteiro. Feriados não são considerados.
    pub fn dias_uteis(&self) -> u32 {
        self.dias_uteis_ate(self.ultimo_dia())
    }

    /// Dias úteis do início do mês até `data`, inclusive.
    pub fn dias_uteis_ate(&self, data: NaiveDate) -> u32 {
        if data < self.primeiro_dia() {
            return 0;
        }
        let limite = data.min(self.ultimo_dia());

        self.primeiro_dia()
            .iter_days()
            .take_while(|d| *d <= limite)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .count() as u32
    }
}

impl fmt::Display for MesReferencia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.ano, self.mes)
    }
}

impl FromStr for MesReferencia {
    type Err = MesInvalido;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let texto = s.trim();
        let invalido = || MesInvalido(texto.to_string());

        let partes: Vec<&str> = texto.split(['-', '/']).collect();
        if partes.len() != 2 {
            return Err(invalido());
        }

        // "2025-03" ou "03-2025"
        let (ano, mes) = if partes[0].len() == 4 {
            (partes[0], partes[1])
        } else if partes[1].len() == 4 {
            (partes[1], partes[0])
        } else {
            return Err(invalido());
        };

        let ano: i32 = ano.parse().map_err(|_| invalido())?;
        let mes: u32 = mes.parse().map_err(|_| invalido())?;
        Self::new(ano, mes).map_err(|_| invalido())
    }
}

impl Serialize for MesReferencia {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MesReferencia {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let texto = String::deserialize(deserializer)?;
        texto.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_key_layouts() {
        let a: MesReferencia = "2025-03".parse().unwrap();
        let b: MesReferencia = "03-2025".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "2025-03");
    }

    #[test]
    fn rejects_garbage() {
        assert!("2025-13".parse::<MesReferencia>().is_err());
        assert!("março".parse::<MesReferencia>().is_err());
        assert!("25-03".parse::<MesReferencia>().is_err());
    }

    #[test]
    fn month_boundaries() {
        let fev = MesReferencia::new(2024, 2).unwrap();
        assert_eq!(fev.ultimo_dia(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(fev.dias_no_mes(), 29);

        let jan = MesReferencia::new(2025, 1).unwrap();
        assert_eq!(jan.anterior(), MesReferencia::new(2024, 12).unwrap());
        assert_eq!(MesReferencia::new(2024, 12).unwrap().proximo(), jan);
    }

    #[test]
    fn counts_business_days() {
        // Março/2025 começa num sábado: 21 dias úteis
        let marco = MesReferencia::new(2025, 3).unwrap();
        assert_eq!(marco.dias_uteis(), 21);

        // 1 e 2 são fim de semana; segunda (3) a sexta (7) = 5
        let dia_7 = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(marco.dias_uteis_ate(dia_7), 5);

        let antes = NaiveDate::from_ymd_opt(2025, 2, 20).unwrap();
        assert_eq!(marco.dias_uteis_ate(antes), 0);
    }
}
