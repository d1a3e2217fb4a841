pub mod agendamentos_repo;
pub use agendamentos_repo::AgendamentosRepository;
pub mod colaboradores_repo;
pub use colaboradores_repo::ColaboradoresRepository;
pub mod marketing_repo;
pub use marketing_repo::MarketingRepository;
pub mod metas_repo;
pub use metas_repo::MetasRepository;
pub mod vendas_repo;
pub use vendas_repo::VendasRepository;
