// src/services/import_service.rs
//
// Importação da planilha comercial (CSV publicado do Google Sheets) para a
// tabela `vendas`. Só entram linhas com FECHAMENTO = SIM; rodapés são ignorados
// e closers desconhecidos entram sem colaborador, para não perder receita.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        parse::{normalizar_nome, parse_data, parse_valor_opt},
    },
    db::{ColaboradoresRepository, VendasRepository},
    metrics::{
        financeiro::{is_fechada, is_linha_rodape},
        squads::indexar_colaboradores,
    },
    models::{
        colaborador::{Colaborador, TipoColaborador},
        planilha::{colunas, LinhaPlanilha, ResumoImportacao},
        venda::{NovaVenda, OrigemVenda, Venda},
    },
};

/// Lê o CSV da planilha. Cabeçalhos são aparados; linhas curtas são aceitas.
pub fn ler_planilha_csv(texto: &str) -> Result<Vec<LinhaPlanilha>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(texto.as_bytes());

    let cabecalhos = reader.headers()?.clone();

    let mut linhas = Vec::new();
    for registro in reader.records() {
        let registro = registro?;
        if registro.iter().all(str::is_empty) {
            continue;
        }
        let linha: LinhaPlanilha = cabecalhos
            .iter()
            .zip(registro.iter())
            .filter(|(cabecalho, _)| !cabecalho.is_empty())
            .collect();
        linhas.push(linha);
    }

    tracing::debug!(linhas = linhas.len(), "Planilha lida");
    Ok(linhas)
}

#[derive(Debug, Clone, Default)]
pub struct VendasImportadas {
    pub vendas: Vec<NovaVenda>,
    pub resumo: ResumoImportacao,
}

/// Converte as linhas da planilha em vendas prontas para gravar.
///
/// `hoje` é usado como data de fechamento quando a coluna DATA falta ou não é
/// reconhecida.
pub fn importar_vendas(
    linhas: &[LinhaPlanilha],
    colaboradores: &[Colaborador],
    hoje: NaiveDate,
) -> VendasImportadas {
    let cadastro = indexar_colaboradores(colaboradores);
    let mut resultado = VendasImportadas::default();

    for (indice, linha) in linhas.iter().enumerate() {
        // +2: cabeçalho na linha 1, planilha começa em 1
        let numero = indice + 2;

        if is_linha_rodape(linha) {
            tracing::debug!(linha = numero, "Rodapé ignorado na importação");
            continue;
        }
        if !is_fechada(linha) {
            resultado.resumo.descartadas += 1;
            continue;
        }

        let nome_lead = linha
            .texto(colunas::NOME_DA_CALL)
            .unwrap_or("Sem nome")
            .to_string();

        let valor = Decimal::from_f64(parse_valor_opt(linha.get(colunas::VALOR)))
            .unwrap_or_default()
            .round_dp(2);

        let data_fechamento = match linha.texto(colunas::DATA).and_then(parse_data) {
            Some(data) => data,
            None => {
                resultado.resumo.avisos.push(format!(
                    "Linha {}: data ausente ou inválida, usando {}",
                    numero,
                    hoje.format("%d/%m/%Y")
                ));
                hoje
            }
        };

        let origem = OrigemVenda::from(linha.texto(colunas::ORIGEM).unwrap_or_default().to_string());

        let closer = linha.texto(colunas::CLOSER_FECHOU);
        let colaborador_id = closer
            .and_then(|nome| cadastro.get(&normalizar_nome(nome)))
            .filter(|c| c.tipo == TipoColaborador::Closer)
            .map(|c| c.id);

        if colaborador_id.is_none() {
            resultado.resumo.sem_closer += 1;
            let aviso = format!(
                "Linha {}: closer '{}' não cadastrado, venda importada só com o nome da planilha",
                numero,
                closer.unwrap_or_default()
            );
            tracing::warn!("{}", aviso);
            resultado.resumo.avisos.push(aviso);
        }

        resultado.vendas.push(NovaVenda {
            colaborador_id,
            closer_nome: closer.map(str::to_string),
            valor,
            origem,
            nome_lead,
            data_fechamento,
        });
    }

    resultado.resumo.importadas = resultado.vendas.len();
    resultado
}

// Mesma venda já gravada: lead, data e valor iguais.
fn chave_venda(nome_lead: &str, data: NaiveDate, valor: Decimal) -> (String, NaiveDate, Decimal) {
    (normalizar_nome(nome_lead), data, valor.round_dp(2))
}

/// Remove da importação as vendas que já existem no banco.
pub fn remover_duplicadas(importadas: &mut VendasImportadas, existentes: &[Venda]) {
    let conhecidas: HashSet<_> = existentes
        .iter()
        .map(|v| chave_venda(&v.nome_lead, v.data_fechamento, v.valor))
        .collect();

    let antes = importadas.vendas.len();
    importadas
        .vendas
        .retain(|v| !conhecidas.contains(&chave_venda(&v.nome_lead, v.data_fechamento, v.valor)));

    let duplicadas = antes - importadas.vendas.len();
    importadas.resumo.duplicadas = duplicadas;
    importadas.resumo.importadas = importadas.vendas.len();
}

#[derive(Clone)]
pub struct ImportService {
    vendas_repo: VendasRepository,
    colaboradores_repo: ColaboradoresRepository,
    http: reqwest::Client,
    sheets_csv_url: Option<String>,
}

impl ImportService {
    pub fn new(
        vendas_repo: VendasRepository,
        colaboradores_repo: ColaboradoresRepository,
        http: reqwest::Client,
        sheets_csv_url: Option<String>,
    ) -> Self {
        Self {
            vendas_repo,
            colaboradores_repo,
            http,
            sheets_csv_url,
        }
    }

    pub fn planilha_configurada(&self) -> bool {
        self.sheets_csv_url.is_some()
    }

    /// Baixa o CSV publicado em `SHEETS_CSV_URL`.
    pub async fn baixar_planilha(&self) -> Result<String, AppError> {
        let url = self
            .sheets_csv_url
            .as_deref()
            .ok_or(AppError::PlanilhaNaoConfigurada)?;

        let resposta = self.http.get(url).send().await.map_err(|e| {
            tracing::error!("Falha ao baixar a planilha: {}", e);
            e
        })?;
        let texto = resposta.error_for_status()?.text().await?;
        Ok(texto)
    }

    pub async fn linhas_da_planilha(&self) -> Result<Vec<LinhaPlanilha>, AppError> {
        let texto = self.baixar_planilha().await?;
        ler_planilha_csv(&texto)
    }

    /// Importa o CSV recebido (ou o da planilha publicada, se `csv` for `None`)
    /// numa única transação.
    pub async fn importar(
        &self,
        pool: &PgPool,
        csv: Option<String>,
        hoje: NaiveDate,
    ) -> Result<ResumoImportacao, AppError> {
        let texto = match csv {
            Some(texto) => texto,
            None => self.baixar_planilha().await?,
        };
        let linhas = ler_planilha_csv(&texto)?;

        let colaboradores = self.colaboradores_repo.listar(pool).await?;
        let mut importadas = importar_vendas(&linhas, &colaboradores, hoje);

        let periodo = importadas
            .vendas
            .iter()
            .map(|v| v.data_fechamento)
            .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
                None => Some((d, d)),
                Some((ini, fim)) => Some((ini.min(d), fim.max(d))),
            });
        if let Some((inicio, fim)) = periodo {
            let existentes = self.vendas_repo.listar_por_periodo(pool, inicio, fim).await?;
            remover_duplicadas(&mut importadas, &existentes);
        }

        let mut tx = pool.begin().await?;
        for venda in &importadas.vendas {
            self.vendas_repo.criar(&mut *tx, venda).await?;
        }
        tx.commit().await?;

        tracing::info!(
            importadas = importadas.resumo.importadas,
            descartadas = importadas.resumo.descartadas,
            duplicadas = importadas.resumo.duplicadas,
            "Importação da planilha concluída"
        );

        Ok(importadas.resumo)
    }
}
