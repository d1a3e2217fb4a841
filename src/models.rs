pub mod agendamento;
pub mod ai;
pub mod auth;
pub mod colaborador;
pub mod dashboard;
pub mod desempenho;
pub mod financeiro;
pub mod marketing;
pub mod meta;
pub mod planilha;
pub mod venda;
