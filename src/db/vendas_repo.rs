// src/db/vendas_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::venda::{NovaVenda, Venda},
};

// O nome do closer vem do cadastro (LEFT JOIN); sem colaborador, vale o nome
// literal gravado em `closer_nome`.
const SELECT_VENDA: &str = r#"
    SELECT
        v.id, v.colaborador_id, COALESCE(c.nome, v.closer_nome, '') AS colaborador_nome,
        v.valor, v.origem, v.nome_lead, v.data_fechamento
    FROM vendas v
    LEFT JOIN colaboradores c ON c.id = v.colaborador_id
"#;

#[derive(Clone, Default)]
pub struct VendasRepository;

impl VendasRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn listar_por_periodo<'e, E>(
        &self,
        executor: E,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<Vec<Venda>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "{} WHERE v.data_fechamento BETWEEN $1 AND $2 ORDER BY v.data_fechamento ASC, v.nome_lead ASC",
            SELECT_VENDA
        );

        let vendas = sqlx::query_as::<_, Venda>(&sql)
            .bind(inicio)
            .bind(fim)
            .fetch_all(executor)
            .await?;

        Ok(vendas)
    }

    pub async fn criar<'e, E>(&self, executor: E, venda: &NovaVenda) -> Result<Venda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let venda = sqlx::query_as::<_, Venda>(
            r#"
            WITH nova AS (
                INSERT INTO vendas (colaborador_id, closer_nome, valor, origem, nome_lead, data_fechamento)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT
                v.id, v.colaborador_id, COALESCE(c.nome, v.closer_nome, '') AS colaborador_nome,
                v.valor, v.origem, v.nome_lead, v.data_fechamento
            FROM nova v
            LEFT JOIN colaboradores c ON c.id = v.colaborador_id
            "#,
        )
            .bind(venda.colaborador_id)
            .bind(venda.closer_nome.as_deref().map(str::trim).filter(|n| !n.is_empty()))
            .bind(venda.valor)
            .bind(venda.origem.as_str())
            .bind(&venda.nome_lead)
            .bind(venda.data_fechamento)
            .fetch_one(executor)
            .await?;

        Ok(venda)
    }

    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        venda: &NovaVenda,
    ) -> Result<Venda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Venda>(
            r#"
            WITH alterada AS (
                UPDATE vendas
                SET colaborador_id = $2, closer_nome = $3, valor = $4, origem = $5,
                    nome_lead = $6, data_fechamento = $7
                WHERE id = $1
                RETURNING *
            )
            SELECT
                v.id, v.colaborador_id, COALESCE(c.nome, v.closer_nome, '') AS colaborador_nome,
                v.valor, v.origem, v.nome_lead, v.data_fechamento
            FROM alterada v
            LEFT JOIN colaboradores c ON c.id = v.colaborador_id
            "#,
        )
            .bind(id)
            .bind(venda.colaborador_id)
            .bind(venda.closer_nome.as_deref().map(str::trim).filter(|n| !n.is_empty()))
            .bind(venda.valor)
            .bind(venda.origem.as_str())
            .bind(&venda.nome_lead)
            .bind(venda.data_fechamento)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn remover<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM vendas WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if resultado.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
