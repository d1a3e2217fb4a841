// src/db/colaboradores_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::colaborador::{Colaborador, NovoColaborador},
};

#[derive(Clone, Default)]
pub struct ColaboradoresRepository;

impl ColaboradoresRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Colaborador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let colaboradores = sqlx::query_as::<_, Colaborador>(
            "SELECT id, nome, tipo, squad, ativo FROM colaboradores ORDER BY nome ASC",
        )
            .fetch_all(executor)
            .await?;

        Ok(colaboradores)
    }

    pub async fn criar<'e, E>(
        &self,
        executor: E,
        colaborador: &NovoColaborador,
    ) -> Result<Colaborador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let criado = sqlx::query_as::<_, Colaborador>(
            r#"
            INSERT INTO colaboradores (nome, tipo, squad, ativo)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nome, tipo, squad, ativo
            "#,
        )
            .bind(colaborador.nome.trim())
            .bind(colaborador.tipo.as_str())
            .bind(&colaborador.squad)
            .bind(colaborador.ativo)
            .fetch_one(executor)
            .await?;

        Ok(criado)
    }

    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        colaborador: &NovoColaborador,
    ) -> Result<Colaborador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Colaborador>(
            r#"
            UPDATE colaboradores
            SET nome = $2, tipo = $3, squad = $4, ativo = $5
            WHERE id = $1
            RETURNING id, nome, tipo, squad, ativo
            "#,
        )
            .bind(id)
            .bind(colaborador.nome.trim())
            .bind(colaborador.tipo.as_str())
            .bind(&colaborador.squad)
            .bind(colaborador.ativo)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn remover<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM colaboradores WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if resultado.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
