// src/services/cadastro_service.rs
//
// Formulários administrativos: vendas, agendamentos, colaboradores e metas.
// Cada operação grava uma única linha.

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, month::MesReferencia},
    db::{AgendamentosRepository, ColaboradoresRepository, MetasRepository, VendasRepository},
    models::{
        agendamento::{Agendamento, NovoAgendamento},
        colaborador::{Colaborador, NovoColaborador},
        meta::{MetaMensal, SalvarMetaPayload},
        venda::{NovaVenda, Venda},
    },
};

#[derive(Clone)]
pub struct CadastroService {
    vendas_repo: VendasRepository,
    agendamentos_repo: AgendamentosRepository,
    colaboradores_repo: ColaboradoresRepository,
    metas_repo: MetasRepository,
}

impl CadastroService {
    pub fn new(
        vendas_repo: VendasRepository,
        agendamentos_repo: AgendamentosRepository,
        colaboradores_repo: ColaboradoresRepository,
        metas_repo: MetasRepository,
    ) -> Self {
        Self {
            vendas_repo,
            agendamentos_repo,
            colaboradores_repo,
            metas_repo,
        }
    }

    // =========================================================================
    //  VENDAS
    // =========================================================================

    pub async fn listar_vendas<'e, E>(&self, executor: E, mes: MesReferencia) -> Result<Vec<Venda>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.vendas_repo
            .listar_por_periodo(executor, mes.primeiro_dia(), mes.ultimo_dia())
            .await
    }

    pub async fn criar_venda<'e, E>(&self, executor: E, venda: &NovaVenda) -> Result<Venda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let criada = self.vendas_repo.criar(executor, venda).await?;
        tracing::info!(id = %criada.id, valor = %criada.valor, "Venda registrada");
        Ok(criada)
    }

    pub async fn atualizar_venda<'e, E>(&self, executor: E, id: Uuid, venda: &NovaVenda) -> Result<Venda, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.vendas_repo.atualizar(executor, id, venda).await
    }

    pub async fn remover_venda<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.vendas_repo.remover(executor, id).await
    }

    // =========================================================================
    //  AGENDAMENTOS
    // =========================================================================

    pub async fn listar_agendamentos<'e, E>(
        &self,
        executor: E,
        mes: MesReferencia,
    ) -> Result<Vec<Agendamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.agendamentos_repo
            .listar_por_periodo(executor, mes.primeiro_dia(), mes.ultimo_dia())
            .await
    }

    pub async fn criar_agendamento<'e, E>(
        &self,
        executor: E,
        agendamento: &NovoAgendamento,
    ) -> Result<Agendamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.agendamentos_repo.criar(executor, agendamento).await
    }

    pub async fn atualizar_agendamento<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        agendamento: &NovoAgendamento,
    ) -> Result<Agendamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.agendamentos_repo.atualizar(executor, id, agendamento).await
    }

    pub async fn remover_agendamento<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.agendamentos_repo.remover(executor, id).await
    }

    // =========================================================================
    //  COLABORADORES
    // =========================================================================

    pub async fn listar_colaboradores<'e, E>(&self, executor: E) -> Result<Vec<Colaborador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.colaboradores_repo.listar(executor).await
    }

    pub async fn criar_colaborador<'e, E>(
        &self,
        executor: E,
        colaborador: &NovoColaborador,
    ) -> Result<Colaborador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.colaboradores_repo.criar(executor, colaborador).await
    }

    pub async fn atualizar_colaborador<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        colaborador: &NovoColaborador,
    ) -> Result<Colaborador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.colaboradores_repo.atualizar(executor, id, colaborador).await
    }

    pub async fn remover_colaborador<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.colaboradores_repo.remover(executor, id).await
    }

    // =========================================================================
    //  METAS
    // =========================================================================

    pub async fn buscar_meta<'e, E>(&self, executor: E, mes: MesReferencia) -> Result<MetaMensal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.metas_repo
            .buscar_por_mes(executor, mes)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn salvar_meta<'e, E>(
        &self,
        executor: E,
        mes: MesReferencia,
        payload: &SalvarMetaPayload,
    ) -> Result<MetaMensal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let meta = self.metas_repo.salvar(executor, mes, payload).await?;
        tracing::info!(mes = %mes, "Metas do mês salvas");
        Ok(meta)
    }
}
