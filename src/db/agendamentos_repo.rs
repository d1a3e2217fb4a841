// src/db/agendamentos_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::agendamento::{Agendamento, NovoAgendamento},
};

// Nomes de SDR e closer resolvidos pelo cadastro
const COLUNAS_AGENDAMENTO: &str = r#"
    a.id,
    a.sdr_id, COALESCE(s.nome, '') AS sdr_nome,
    a.closer_id, c.nome AS closer_nome,
    a.nome_lead, a.data_agendamento, a.status, a.qualificado, a.origem
"#;

#[derive(Clone, Default)]
pub struct AgendamentosRepository;

impl AgendamentosRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn listar_por_periodo<'e, E>(
        &self,
        executor: E,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<Vec<Agendamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {}
            FROM agendamentos a
            LEFT JOIN colaboradores s ON s.id = a.sdr_id
            LEFT JOIN colaboradores c ON c.id = a.closer_id
            WHERE a.data_agendamento BETWEEN $1 AND $2
            ORDER BY a.data_agendamento ASC
            "#,
            COLUNAS_AGENDAMENTO
        );

        let agendamentos = sqlx::query_as::<_, Agendamento>(&sql)
            .bind(inicio)
            .bind(fim)
            .fetch_all(executor)
            .await?;

        Ok(agendamentos)
    }

    pub async fn criar<'e, E>(
        &self,
        executor: E,
        agendamento: &NovoAgendamento,
    ) -> Result<Agendamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH novo AS (
                INSERT INTO agendamentos (sdr_id, closer_id, nome_lead, data_agendamento, status, qualificado, origem)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT {}
            FROM novo a
            LEFT JOIN colaboradores s ON s.id = a.sdr_id
            LEFT JOIN colaboradores c ON c.id = a.closer_id
            "#,
            COLUNAS_AGENDAMENTO
        );

        let criado = sqlx::query_as::<_, Agendamento>(&sql)
            .bind(agendamento.sdr_id)
            .bind(agendamento.closer_id)
            .bind(&agendamento.nome_lead)
            .bind(agendamento.data_agendamento)
            .bind(agendamento.status.as_str())
            .bind(agendamento.qualificado)
            .bind(&agendamento.origem)
            .fetch_one(executor)
            .await?;

        Ok(criado)
    }

    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        agendamento: &NovoAgendamento,
    ) -> Result<Agendamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            WITH alterado AS (
                UPDATE agendamentos
                SET sdr_id = $2, closer_id = $3, nome_lead = $4, data_agendamento = $5,
                    status = $6, qualificado = $7, origem = $8
                WHERE id = $1
                RETURNING *
            )
            SELECT {}
            FROM alterado a
            LEFT JOIN colaboradores s ON s.id = a.sdr_id
            LEFT JOIN colaboradores c ON c.id = a.closer_id
            "#,
            COLUNAS_AGENDAMENTO
        );

        sqlx::query_as::<_, Agendamento>(&sql)
            .bind(id)
            .bind(agendamento.sdr_id)
            .bind(agendamento.closer_id)
            .bind(&agendamento.nome_lead)
            .bind(agendamento.data_agendamento)
            .bind(agendamento.status.as_str())
            .bind(agendamento.qualificado)
            .bind(&agendamento.origem)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn remover<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM agendamentos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if resultado.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
