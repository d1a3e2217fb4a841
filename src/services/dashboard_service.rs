// src/services/dashboard_service.rs
//
// Busca os dados do mês e entrega aos calculadores de `metrics`.
// Toda regra de negócio fica nos calculadores; aqui só há I/O e montagem.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;

use crate::{
    common::{error::AppError, format::FormatoNumerico, month::MesReferencia, parse::parse_data},
    db::{
        AgendamentosRepository, ColaboradoresRepository, MarketingRepository, MetasRepository,
        VendasRepository,
    },
    metrics::{
        comparativo::comparar_meses,
        desempenho::{calcular_metricas_closer, calcular_metricas_sdr, correlacionar_venda},
        executivo::resumo_executivo,
        financeiro::calcular_metricas_financeiras,
        funil::funil_comercial,
        squads::{comparar_squads, ClassificadorSquads},
        trafego::{campanhas_de_marketing, montar_painel_trafego},
    },
    models::{
        agendamento::Agendamento,
        ai::AnaliseTrafegoRequest,
        colaborador::Colaborador,
        dashboard::{
            ComparativoMensal, ComparativoSquads, EtapaFunil, PainelTrafego, ResumoExecutivo,
        },
        desempenho::{PainelCloser, PainelSdr},
        financeiro::MetricasFinanceiras,
        marketing::CampanhaData,
        meta::Alvos,
        planilha::{colunas, venda_to_sheet_row, LinhaPlanilha},
        venda::Venda,
    },
    services::{ai_service::AiService, import_service::ImportService},
};

// Dados brutos de um mês
struct DadosMes {
    vendas: Vec<Venda>,
    agendamentos: Vec<Agendamento>,
    colaboradores: Vec<Colaborador>,
}

#[derive(Clone)]
pub struct DashboardService {
    vendas_repo: VendasRepository,
    agendamentos_repo: AgendamentosRepository,
    colaboradores_repo: ColaboradoresRepository,
    metas_repo: MetasRepository,
    marketing_repo: MarketingRepository,
    classificador: Arc<ClassificadorSquads>,
    import_service: ImportService,
    ai_service: AiService,
}

impl DashboardService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vendas_repo: VendasRepository,
        agendamentos_repo: AgendamentosRepository,
        colaboradores_repo: ColaboradoresRepository,
        metas_repo: MetasRepository,
        marketing_repo: MarketingRepository,
        classificador: Arc<ClassificadorSquads>,
        import_service: ImportService,
        ai_service: AiService,
    ) -> Self {
        Self {
            vendas_repo,
            agendamentos_repo,
            colaboradores_repo,
            metas_repo,
            marketing_repo,
            classificador,
            import_service,
            ai_service,
        }
    }

    async fn carregar_mes(&self, pool: &PgPool, mes: MesReferencia) -> Result<DadosMes, AppError> {
        let (inicio, fim) = (mes.primeiro_dia(), mes.ultimo_dia());
        let (vendas, agendamentos, colaboradores) = tokio::try_join!(
            self.vendas_repo.listar_por_periodo(pool, inicio, fim),
            self.agendamentos_repo.listar_por_periodo(pool, inicio, fim),
            self.colaboradores_repo.listar(pool),
        )?;

        tracing::debug!(
            mes = %mes,
            vendas = vendas.len(),
            agendamentos = agendamentos.len(),
            "Dados do mês carregados"
        );

        Ok(DadosMes {
            vendas,
            agendamentos,
            colaboradores,
        })
    }

    async fn alvos(&self, pool: &PgPool, mes: MesReferencia) -> Result<Option<Alvos>, AppError> {
        let meta = self.metas_repo.buscar_por_mes(pool, mes).await?;
        Ok(meta.map(|m| m.alvos()))
    }

    // =========================================================================
    //  FINANCEIRO
    // =========================================================================

    /// Usa a planilha publicada quando configurada; senão converte as vendas
    /// do banco para o formato de linha da planilha.
    pub async fn financeiro(&self, pool: &PgPool, mes: MesReferencia) -> Result<MetricasFinanceiras, AppError> {
        let linhas = if self.import_service.planilha_configurada() {
            let linhas = self.import_service.linhas_da_planilha().await?;
            linhas_do_mes(linhas, mes)
        } else {
            let dados = self.carregar_mes(pool, mes).await?;
            dados
                .vendas
                .iter()
                .map(|v| {
                    let sdr = correlacionar_venda(v, &dados.agendamentos).map(|a| a.sdr_nome.as_str());
                    venda_to_sheet_row(v, sdr)
                })
                .collect()
        };

        Ok(calcular_metricas_financeiras(&linhas, &self.classificador))
    }

    // =========================================================================
    //  DESEMPENHO
    // =========================================================================

    pub async fn sdrs(&self, pool: &PgPool, mes: MesReferencia) -> Result<PainelSdr, AppError> {
        let dados = self.carregar_mes(pool, mes).await?;
        Ok(calcular_metricas_sdr(
            &dados.vendas,
            &dados.agendamentos,
            &dados.colaboradores,
            &self.classificador,
        ))
    }

    pub async fn closers(&self, pool: &PgPool, mes: MesReferencia) -> Result<PainelCloser, AppError> {
        let dados = self.carregar_mes(pool, mes).await?;
        let alvos = self.alvos(pool, mes).await?;
        Ok(calcular_metricas_closer(
            &dados.vendas,
            &dados.agendamentos,
            &dados.colaboradores,
            &self.classificador,
            alvos.as_ref(),
        ))
    }

    pub async fn squads(&self, pool: &PgPool, mes: MesReferencia) -> Result<ComparativoSquads, AppError> {
        let dados = self.carregar_mes(pool, mes).await?;
        Ok(comparar_squads(
            &dados.vendas,
            &dados.agendamentos,
            &dados.colaboradores,
            &self.classificador,
        ))
    }

    pub async fn funil(&self, pool: &PgPool, mes: MesReferencia) -> Result<Vec<EtapaFunil>, AppError> {
        let dados = self.carregar_mes(pool, mes).await?;
        let leads = self
            .marketing_repo
            .listar_leads(pool, mes.primeiro_dia(), mes.ultimo_dia())
            .await?;
        Ok(funil_comercial(&leads, &dados.agendamentos, &dados.vendas))
    }

    // =========================================================================
    //  EXECUTIVO
    // =========================================================================

    pub async fn executivo(
        &self,
        pool: &PgPool,
        mes: MesReferencia,
        hoje: NaiveDate,
        formato: FormatoNumerico,
    ) -> Result<ResumoExecutivo, AppError> {
        let dados = self.carregar_mes(pool, mes).await?;
        let alvos = self.alvos(pool, mes).await?;
        Ok(resumo_executivo(
            mes,
            hoje,
            &dados.vendas,
            &dados.agendamentos,
            alvos.as_ref(),
            formato,
        ))
    }

    pub async fn comparativo(
        &self,
        pool: &PgPool,
        mes: MesReferencia,
        hoje: NaiveDate,
        formato: FormatoNumerico,
    ) -> Result<ComparativoMensal, AppError> {
        let (atual, anterior) = tokio::try_join!(
            self.executivo(pool, mes, hoje, formato),
            self.executivo(pool, mes.anterior(), hoje, formato),
        )?;
        Ok(comparar_meses(&atual, &anterior))
    }

    // =========================================================================
    //  TRÁFEGO
    // =========================================================================

    /// No mês corrente, campanhas da Meta quando a integração responde; nos
    /// demais casos, os lançamentos manuais de `marketing_metrics`.
    async fn campanhas(
        &self,
        pool: &PgPool,
        mes: MesReferencia,
        hoje: NaiveDate,
    ) -> Result<Vec<CampanhaData>, AppError> {
        if usa_campanhas_meta(mes, hoje) {
            if let Some(resposta) = self.ai_service.campanhas_meta().await? {
                if !resposta.campanhas.is_empty() {
                    return Ok(resposta.campanhas);
                }
            }
        }
        let metricas = self.marketing_repo.listar_metricas(pool, mes).await?;
        Ok(campanhas_de_marketing(&metricas))
    }

    pub async fn trafego(&self, pool: &PgPool, mes: MesReferencia, hoje: NaiveDate) -> Result<PainelTrafego, AppError> {
        let campanhas = self.campanhas(pool, mes, hoje).await?;
        Ok(montar_painel_trafego(
            &campanhas,
            mes.dias_no_mes(),
            dias_decorridos(mes, hoje),
        ))
    }

    /// Snapshot enviado para a análise de tráfego por IA.
    pub async fn requisicao_analise(
        &self,
        pool: &PgPool,
        mes: MesReferencia,
        hoje: NaiveDate,
    ) -> Result<AnaliseTrafegoRequest, AppError> {
        let campanhas = self.campanhas(pool, mes, hoje).await?;
        let painel = montar_painel_trafego(&campanhas, mes.dias_no_mes(), dias_decorridos(mes, hoje));
        let funil = self.funil(pool, mes).await?;

        Ok(AnaliseTrafegoRequest {
            campanhas,
            totais: painel.totais,
            canais: painel.canais,
            dias_no_mes: mes.dias_no_mes(),
            dias_decorridos: dias_decorridos(mes, hoje),
            data_atual: hoje,
            taxas_conversao: taxas_conversao(&funil),
        })
    }
}

// A Meta só devolve as campanhas ativas, que pertencem ao mês corrente.
fn usa_campanhas_meta(mes: MesReferencia, hoje: NaiveDate) -> bool {
    mes.contem(hoje)
}

/// Dias corridos do mês já passados em `hoje` (mês fechado conta inteiro).
fn dias_decorridos(mes: MesReferencia, hoje: NaiveDate) -> u32 {
    if hoje < mes.primeiro_dia() {
        0
    } else if hoje > mes.ultimo_dia() {
        mes.dias_no_mes()
    } else {
        hoje.day()
    }
}

fn taxas_conversao(funil: &[EtapaFunil]) -> BTreeMap<String, f64> {
    funil
        .iter()
        .skip(1)
        .map(|e| (e.etapa.clone(), e.percentual_etapa_anterior))
        .collect()
}

// Planilha única com vários meses: linhas com data de outro mês saem;
// linhas sem data ficam (o calculador decide o que fazer com elas).
fn linhas_do_mes(linhas: Vec<LinhaPlanilha>, mes: MesReferencia) -> Vec<LinhaPlanilha> {
    linhas
        .into_iter()
        .filter(|l| {
            l.texto(colunas::DATA)
                .and_then(parse_data)
                .is_none_or(|data| mes.contem(data))
        })
        .collect()
}
