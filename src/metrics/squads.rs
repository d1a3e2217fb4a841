// src/metrics/squads.rs
//
// Classificação de colaboradores em squads e o comparativo entre squads.
//
// A classificação é uma tabela de consulta com um squad padrão:
//   1. atribuição explícita (nome -> squad)
//   2. primeira regra cuja palavra-chave aparece no nome
//   3. squad padrão
// A tabela é configuração (JSON), não código.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::common::parse::normalizar_nome;
use crate::metrics::{participacao, razao, taxa};
use crate::models::agendamento::{Agendamento, StatusAgendamento};
use crate::models::colaborador::Colaborador;
use crate::models::dashboard::{ComparativoSquads, DesempenhoSquad};
use crate::models::venda::Venda;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegraSquad {
    pub nome: String,
    pub palavras_chave: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSquads {
    pub squads: Vec<RegraSquad>,
    pub squad_padrao: String,
    #[serde(default)]
    pub atribuicoes: HashMap<String, String>,
}

impl Default for ConfigSquads {
    fn default() -> Self {
        Self {
            squads: vec![RegraSquad {
                nome: "Corvo Azul".to_string(),
                palavras_chave: vec![
                    "vinicius".to_string(),
                    "leandro".to_string(),
                    "guilherme".to_string(),
                    "marcos".to_string(),
                ],
            }],
            squad_padrao: "Hot Dogs".to_string(),
            atribuicoes: HashMap::new(),
        }
    }
}

impl ConfigSquads {
    pub fn carregar(caminho: &Path) -> anyhow::Result<Self> {
        let texto = std::fs::read_to_string(caminho)
            .with_context(|| format!("Falha ao ler a tabela de squads em {}", caminho.display()))?;
        let config: ConfigSquads = serde_json::from_str(&texto)
            .with_context(|| format!("Tabela de squads inválida em {}", caminho.display()))?;
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct ClassificadorSquads {
    regras: Vec<(String, Vec<String>)>,
    padrao: String,
    atribuicoes: HashMap<String, String>,
}

impl ClassificadorSquads {
    pub fn new(config: ConfigSquads) -> Self {
        let regras = config
            .squads
            .into_iter()
            .map(|r| {
                let chaves = r
                    .palavras_chave
                    .iter()
                    .map(|p| normalizar_nome(p))
                    .filter(|p| !p.is_empty())
                    .collect();
                (r.nome, chaves)
            })
            .collect();

        let atribuicoes = config
            .atribuicoes
            .into_iter()
            .map(|(nome, squad)| (normalizar_nome(&nome), squad))
            .collect();

        Self {
            regras,
            padrao: config.squad_padrao,
            atribuicoes,
        }
    }

    pub fn classificar(&self, nome: &str) -> &str {
        let chave = normalizar_nome(nome);

        if let Some(squad) = self.atribuicoes.get(&chave) {
            return squad;
        }

        self.regras
            .iter()
            .find(|(_, chaves)| chaves.iter().any(|p| chave.contains(p.as_str())))
            .map(|(squad, _)| squad.as_str())
            .unwrap_or(&self.padrao)
    }

    /// O squad gravado no cadastro tem prioridade sobre a tabela.
    pub fn squad_do_colaborador<'a>(&'a self, colaborador: &'a Colaborador) -> &'a str {
        match colaborador.squad.as_deref().map(str::trim) {
            Some(squad) if !squad.is_empty() => squad,
            _ => self.classificar(&colaborador.nome),
        }
    }

    /// Todos os squads conhecidos, na ordem da tabela, com o padrão por último.
    pub fn squads(&self) -> Vec<&str> {
        let mut nomes: Vec<&str> = self.regras.iter().map(|(n, _)| n.as_str()).collect();

        let mut extras: Vec<&str> = self
            .atribuicoes
            .values()
            .map(String::as_str)
            .filter(|s| *s != self.padrao)
            .collect();
        extras.sort_unstable();
        for squad in extras {
            if !nomes.contains(&squad) {
                nomes.push(squad);
            }
        }
        if !nomes.contains(&self.padrao.as_str()) {
            nomes.push(&self.padrao);
        }
        nomes
    }
}

impl Default for ClassificadorSquads {
    fn default() -> Self {
        Self::new(ConfigSquads::default())
    }
}

/// Resolve o squad de um nome usando o cadastro quando possível.
pub(crate) fn squad_por_nome(
    nome: &str,
    cadastro: &HashMap<String, &Colaborador>,
    classificador: &ClassificadorSquads,
) -> String {
    match cadastro.get(&normalizar_nome(nome)) {
        Some(colaborador) => classificador.squad_do_colaborador(colaborador).to_string(),
        None => classificador.classificar(nome).to_string(),
    }
}

pub(crate) fn indexar_colaboradores(colaboradores: &[Colaborador]) -> HashMap<String, &Colaborador> {
    colaboradores
        .iter()
        .map(|c| (normalizar_nome(&c.nome), c))
        .collect()
}

// =============================================================================
//  COMPARATIVO ENTRE SQUADS
// =============================================================================

pub fn comparar_squads(
    vendas: &[Venda],
    agendamentos: &[Agendamento],
    colaboradores: &[Colaborador],
    classificador: &ClassificadorSquads,
) -> ComparativoSquads {
    let cadastro = indexar_colaboradores(colaboradores);

    let mut por_squad: Vec<DesempenhoSquad> = classificador
        .squads()
        .into_iter()
        .map(|nome| DesempenhoSquad {
            nome: nome.to_string(),
            ..Default::default()
        })
        .collect();

    fn entrada<'a>(lista: &'a mut Vec<DesempenhoSquad>, nome: &str) -> &'a mut DesempenhoSquad {
        // Squad gravado no cadastro que não está na tabela
        let pos = match lista.iter().position(|s| s.nome == nome) {
            Some(pos) => pos,
            None => {
                lista.push(DesempenhoSquad {
                    nome: nome.to_string(),
                    ..Default::default()
                });
                lista.len() - 1
            }
        };
        &mut lista[pos]
    }

    for colaborador in colaboradores.iter().filter(|c| c.ativo) {
        let squad = classificador.squad_do_colaborador(colaborador).to_string();
        entrada(&mut por_squad, &squad).membros.push(colaborador.nome.clone());
    }

    for venda in vendas {
        let squad = squad_por_nome(&venda.colaborador_nome, &cadastro, classificador);
        let s = entrada(&mut por_squad, &squad);
        s.receita += venda.valor_f64();
        s.contratos += 1;
    }

    for agendamento in agendamentos
        .iter()
        .filter(|a| a.status == StatusAgendamento::Realizado)
    {
        // A call pertence ao squad de quem conduziu (closer); sem closer, ao SDR
        let responsavel = agendamento
            .closer_nome
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&agendamento.sdr_nome);
        let squad = squad_por_nome(responsavel, &cadastro, classificador);
        entrada(&mut por_squad, &squad).realizados += 1;
    }

    let receita_total: f64 = por_squad.iter().map(|s| s.receita).sum();

    for s in por_squad.iter_mut() {
        s.taxa_conversao = taxa(s.contratos as f64, s.realizados as f64);
        s.ticket_medio = razao(s.receita, s.contratos as f64);
        s.participacao_receita = participacao(s.receita, receita_total);
        s.membros.sort();
    }

    por_squad.sort_by(|a, b| {
        b.receita
            .total_cmp(&a.receita)
            .then(b.contratos.cmp(&a.contratos))
            .then(a.nome.cmp(&b.nome))
    });
    for (i, s) in por_squad.iter_mut().enumerate() {
        s.posicao = i as u32 + 1;
    }

    let lider = por_squad
        .first()
        .filter(|s| s.receita > 0.0)
        .map(|s| s.nome.clone());
    let vantagem_lider = match (por_squad.first(), por_squad.get(1)) {
        (Some(primeiro), Some(segundo)) => primeiro.receita - segundo.receita,
        (Some(primeiro), None) => primeiro.receita,
        _ => 0.0,
    };

    tracing::debug!(squads = por_squad.len(), receita_total, "Comparativo de squads calculado");

    ComparativoSquads {
        squads: por_squad,
        lider,
        vantagem_lider,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testes::{agendamento, colaborador, venda};
    use crate::models::colaborador::TipoColaborador;

    #[test]
    fn keyword_classification_with_default_bucket() {
        let c = ClassificadorSquads::default();
        assert_eq!(c.classificar("Bruno"), "Hot Dogs");
        assert_eq!(c.classificar("VINICIUS Souza"), "Corvo Azul");
        assert_eq!(c.classificar(""), "Hot Dogs");
        assert_eq!(c.squads(), vec!["Corvo Azul", "Hot Dogs"]);
    }

    #[test]
    fn explicit_assignment_wins_over_keywords() {
        let mut config = ConfigSquads::default();
        config
            .atribuicoes
            .insert("Vinicius Lima".to_string(), "Hot Dogs".to_string());
        let c = ClassificadorSquads::new(config);

        assert_eq!(c.classificar("vinicius  lima"), "Hot Dogs");
        assert_eq!(c.classificar("Vinicius Souza"), "Corvo Azul");
    }

    #[test]
    fn stored_squad_wins_over_table() {
        let c = ClassificadorSquads::default();
        let mut bruno = colaborador("Bruno", TipoColaborador::Closer);
        bruno.squad = Some("Corvo Azul".into());
        assert_eq!(c.squad_do_colaborador(&bruno), "Corvo Azul");
    }

    #[test]
    fn config_parses_from_json() {
        let config: ConfigSquads = serde_json::from_str(
            r#"{ "squads": [{ "nome": "Alfa", "palavrasChave": ["ana"] }], "squadPadrao": "Beta" }"#,
        )
        .unwrap();
        let c = ClassificadorSquads::new(config);
        assert_eq!(c.classificar("Mariana"), "Alfa");
        assert_eq!(c.classificar("Pedro"), "Beta");
    }

    #[test]
    fn compares_squads_by_revenue() {
        let c = ClassificadorSquads::default();
        let colaboradores = vec![
            colaborador("Vinicius", TipoColaborador::Closer),
            colaborador("Bruno", TipoColaborador::Closer),
        ];
        let vendas = vec![
            venda("Vinicius", "Lead A", 10_000.0),
            venda("Bruno", "Lead B", 4_000.0),
            venda("Bruno", "Lead C", 2_000.0),
        ];
        let agendamentos = vec![
            agendamento("Sara", Some("Vinicius"), "Lead A", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Bruno"), "Lead B", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Bruno"), "Lead C", StatusAgendamento::Realizado),
            agendamento("Sara", Some("Bruno"), "Lead D", StatusAgendamento::Realizado),
        ];

        let r = comparar_squads(&vendas, &agendamentos, &colaboradores, &c);

        assert_eq!(r.lider.as_deref(), Some("Corvo Azul"));
        assert_eq!(r.vantagem_lider, 4_000.0);

        let corvo = &r.squads[0];
        assert_eq!(corvo.posicao, 1);
        assert_eq!(corvo.taxa_conversao, 100.0);
        assert_eq!(corvo.membros, vec!["Vinicius".to_string()]);

        let hot = &r.squads[1];
        assert_eq!(hot.nome, "Hot Dogs");
        assert_eq!(hot.contratos, 2);
        assert_eq!(hot.ticket_medio, 3_000.0);
        assert!((hot.taxa_conversao - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn empty_month_has_no_leader() {
        let r = comparar_squads(&[], &[], &[], &ClassificadorSquads::default());
        assert_eq!(r.lider, None);
        assert!(r.squads.iter().all(|s| s.taxa_conversao == 0.0));
    }
}
