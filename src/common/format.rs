// src/common/format.rs

/// Convenção de separadores usada nos textos formatados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatoNumerico {
    #[default]
    PtBr,
    EnUs,
}

impl FormatoNumerico {
    /// "pt", "pt-BR" -> PtBr; "en", "en-US" -> EnUs; o resto cai no padrão (PtBr).
    pub fn from_idioma(idioma: &str) -> Self {
        match idioma.split('-').next().map(|s| s.to_lowercase()).as_deref() {
            Some("en") => FormatoNumerico::EnUs,
            _ => FormatoNumerico::PtBr,
        }
    }

    fn separadores(self) -> (char, char) {
        // (milhar, decimal)
        match self {
            FormatoNumerico::PtBr => ('.', ','),
            FormatoNumerico::EnUs => (',', '.'),
        }
    }
}

pub fn formatar_numero(valor: f64, casas: usize, formato: FormatoNumerico) -> String {
    let valor = if valor.is_finite() { valor } else { 0.0 };
    let (milhar, decimal) = formato.separadores();

    let texto = format!("{:.*}", casas, valor.abs());
    let (inteiro, fracao) = match texto.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (texto.as_str(), None),
    };

    let mut agrupado = String::with_capacity(inteiro.len() + inteiro.len() / 3);
    for (i, c) in inteiro.chars().enumerate() {
        if i > 0 && (inteiro.len() - i) % 3 == 0 {
            agrupado.push(milhar);
        }
        agrupado.push(c);
    }

    // Evita "-0,00"
    let negativo = valor < 0.0 && texto.chars().any(|c| c.is_ascii_digit() && c != '0');

    let mut resultado = String::new();
    if negativo {
        resultado.push('-');
    }
    resultado.push_str(&agrupado);
    if let Some(f) = fracao {
        resultado.push(decimal);
        resultado.push_str(f);
    }
    resultado
}

/// Sempre em reais; só os separadores mudam com o idioma.
pub fn formatar_moeda(valor: f64, formato: FormatoNumerico) -> String {
    let numero = formatar_numero(valor, 2, formato);
    match numero.strip_prefix('-') {
        Some(positivo) => format!("-R$ {}", positivo),
        None => format!("R$ {}", numero),
    }
}

pub fn formatar_percentual(valor: f64, formato: FormatoNumerico) -> String {
    format!("{}%", formatar_numero(valor, 1, formato))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_brl_currency() {
        assert_eq!(formatar_moeda(10000.0, FormatoNumerico::PtBr), "R$ 10.000,00");
        assert_eq!(formatar_moeda(1234567.891, FormatoNumerico::PtBr), "R$ 1.234.567,89");
        assert_eq!(formatar_moeda(999.5, FormatoNumerico::PtBr), "R$ 999,50");
        assert_eq!(formatar_moeda(-1500.0, FormatoNumerico::PtBr), "-R$ 1.500,00");
        assert_eq!(formatar_moeda(10000.0, FormatoNumerico::EnUs), "R$ 10,000.00");
    }

    #[test]
    fn non_finite_and_negative_zero() {
        assert_eq!(formatar_moeda(f64::NAN, FormatoNumerico::PtBr), "R$ 0,00");
        assert_eq!(formatar_moeda(-0.001, FormatoNumerico::PtBr), "R$ 0,00");
    }

    #[test]
    fn formats_percent_and_integers() {
        assert_eq!(formatar_percentual(12.345, FormatoNumerico::PtBr), "12,3%");
        assert_eq!(formatar_numero(1234.0, 0, FormatoNumerico::PtBr), "1.234");
        assert_eq!(formatar_numero(123.0, 0, FormatoNumerico::EnUs), "123");
    }

    #[test]
    fn language_tag_selection() {
        assert_eq!(FormatoNumerico::from_idioma("en"), FormatoNumerico::EnUs);
        assert_eq!(FormatoNumerico::from_idioma("en-US"), FormatoNumerico::EnUs);
        assert_eq!(FormatoNumerico::from_idioma("pt"), FormatoNumerico::PtBr);
        assert_eq!(FormatoNumerico::from_idioma("fr"), FormatoNumerico::PtBr);
    }
}
