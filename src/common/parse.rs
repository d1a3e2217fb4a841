// src/common/parse.rs
//
// Parsers permissivos para os valores vindos de planilhas e formulários.
// Política: nunca falhar. Valor vazio vira 0; valor ilegível vira 0 e gera um
// `warn!`, para que problemas de qualidade de dados fiquem visíveis no log.

use chrono::NaiveDate;

const FORMATOS_DATA: [&str; 4] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d/%m/%y"];

const MARCADORES_SIM: [&str; 7] = ["SIM", "S", "X", "OK", "TRUE", "PAGO", "ASSINADO"];

/// Converte valores no padrão brasileiro (`"R$ 12.345,67"`, `"1.500"`, `"-3,5"`)
/// para `f64`. O resultado é sempre finito.
pub fn parse_valor(bruto: &str) -> f64 {
    let texto = bruto.trim();
    if texto.is_empty() {
        return 0.0;
    }

    match normalizar_numero(texto).and_then(|n| n.parse::<f64>().ok()) {
        Some(valor) if valor.is_finite() => valor,
        _ => {
            tracing::warn!(valor = %texto, "Valor numérico ilegível, usando 0");
            0.0
        }
    }
}

pub fn parse_valor_opt(bruto: Option<&str>) -> f64 {
    bruto.map(parse_valor).unwrap_or(0.0)
}

/// `"12,3%"` -> `12.3`. Mesmo comportamento de `parse_valor`.
// Nenhuma coluna percentual é lida hoje; a planilha e as metas chegam como número.
#[cfg_attr(not(test), allow(dead_code))]
pub fn parse_percentual(bruto: &str) -> f64 {
    parse_valor(bruto.trim().trim_end_matches('%'))
}

pub fn parse_data(bruto: &str) -> Option<NaiveDate> {
    let texto = bruto.trim();
    if texto.is_empty() {
        return None;
    }

    // Planilhas às vezes trazem "dd/mm/aaaa hh:mm:ss"
    let somente_data = texto.split_whitespace().next().unwrap_or(texto);

    let data = FORMATOS_DATA
        .iter()
        .find_map(|formato| NaiveDate::parse_from_str(somente_data, formato).ok());

    if data.is_none() {
        tracing::warn!(data = %texto, "Data ilegível, ignorando");
    }
    data
}

/// Flags de planilha do tipo "SIM"/"X"/"OK".
pub fn parse_sim(bruto: &str) -> bool {
    let texto = bruto.trim().to_uppercase();
    MARCADORES_SIM.contains(&texto.as_str())
}

/// Chave usada em todas as comparações por nome (lead, colaborador).
pub fn normalizar_nome(nome: &str) -> String {
    nome.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// Remove moeda/espaços e resolve os separadores de milhar e decimal.
fn normalizar_numero(texto: &str) -> Option<String> {
    // Sinal antes do primeiro dígito: "-1.500", "R$ -1.500,00", "(1.500)"
    let prefixo: String = texto.chars().take_while(|c| !c.is_ascii_digit()).collect();
    let negativo = prefixo.contains('-') || (prefixo.contains('(') && texto.ends_with(')'));

    let limpo: String = texto
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if !limpo.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let numero = if limpo.contains(',') {
        // Padrão brasileiro: ponto é milhar, vírgula é decimal
        if limpo.matches(',').count() > 1 {
            return None;
        }
        limpo.replace('.', "").replace(',', ".")
    } else if limpo.matches('.').count() > 1 {
        // "1.234.567"
        limpo.replace('.', "")
    } else if let Some((inteiro, decimais)) = limpo.split_once('.') {
        // "10.000" é milhar; "12.5", "1500.50" e "0.125" são decimais
        if decimais.len() == 3 && !inteiro.is_empty() && inteiro != "0" {
            limpo.replace('.', "")
        } else {
            limpo
        }
    } else {
        limpo
    };

    Some(if negativo { format!("-{}", numero) } else { numero })
}
