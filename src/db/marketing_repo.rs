// src/db/marketing_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};

use crate::{
    common::{error::AppError, month::MesReferencia},
    models::marketing::{LeadCrm, MetricaMarketing},
};

#[derive(Clone, Default)]
pub struct MarketingRepository;

impl MarketingRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  MÉTRICAS POR CANAL (lançamento manual)
    // =========================================================================

    pub async fn listar_metricas<'e, E>(
        &self,
        executor: E,
        mes: MesReferencia,
    ) -> Result<Vec<MetricaMarketing>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let metricas = sqlx::query_as::<_, MetricaMarketing>(
            r#"
            SELECT id, mes_ano, canal, investimento, leads, fechamentos, receita
            FROM marketing_metrics
            WHERE mes_ano = $1
            ORDER BY canal ASC
            "#,
        )
            .bind(mes.to_string())
            .fetch_all(executor)
            .await?;

        Ok(metricas)
    }

    // =========================================================================
    //  LEADS DO CRM
    // =========================================================================

    /// Leads criados no intervalo (datas inclusivas).
    pub async fn listar_leads<'e, E>(
        &self,
        executor: E,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<Vec<LeadCrm>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let leads = sqlx::query_as::<_, LeadCrm>(
            r#"
            SELECT id, nome, origem, etapa, created_at
            FROM leads_crm
            WHERE created_at::date BETWEEN $1 AND $2
            ORDER BY created_at ASC
            "#,
        )
            .bind(inicio)
            .bind(fim)
            .fetch_all(executor)
            .await?;

        Ok(leads)
    }
}
