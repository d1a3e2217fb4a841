// src/db/metas_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::{error::AppError, month::MesReferencia},
    models::meta::{MetaMensal, SalvarMetaPayload},
};

#[derive(Clone, Default)]
pub struct MetasRepository;

impl MetasRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn buscar_por_mes<'e, E>(
        &self,
        executor: E,
        mes: MesReferencia,
    ) -> Result<Option<MetaMensal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let meta = sqlx::query_as::<_, MetaMensal>(
            r#"
            SELECT id, mes_ano, meta_receita, meta_por_closer, ticket_medio,
                   taxa_conversao, taxa_qualificacao, taxa_comparecimento
            FROM metas_mensais
            WHERE mes_ano = $1
            "#,
        )
            .bind(mes.to_string())
            .fetch_optional(executor)
            .await?;

        Ok(meta)
    }

    /// Uma meta por mês: salvar de novo sobrescreve.
    pub async fn salvar<'e, E>(
        &self,
        executor: E,
        mes: MesReferencia,
        payload: &SalvarMetaPayload,
    ) -> Result<MetaMensal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let meta = sqlx::query_as::<_, MetaMensal>(
            r#"
            INSERT INTO metas_mensais (
                mes_ano, meta_receita, meta_por_closer, ticket_medio,
                taxa_conversao, taxa_qualificacao, taxa_comparecimento
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (mes_ano) DO UPDATE SET
                meta_receita = EXCLUDED.meta_receita,
                meta_por_closer = EXCLUDED.meta_por_closer,
                ticket_medio = EXCLUDED.ticket_medio,
                taxa_conversao = EXCLUDED.taxa_conversao,
                taxa_qualificacao = EXCLUDED.taxa_qualificacao,
                taxa_comparecimento = EXCLUDED.taxa_comparecimento
            RETURNING id, mes_ano, meta_receita, meta_por_closer, ticket_medio,
                      taxa_conversao, taxa_qualificacao, taxa_comparecimento
            "#,
        )
            .bind(mes.to_string())
            .bind(payload.meta_receita)
            .bind(payload.meta_por_closer)
            .bind(payload.ticket_medio)
            .bind(payload.taxa_conversao)
            .bind(payload.taxa_qualificacao)
            .bind(payload.taxa_comparecimento)
            .fetch_one(executor)
            .await?;

        Ok(meta)
    }
}
