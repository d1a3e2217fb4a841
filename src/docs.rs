// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_financeiro,
        handlers::dashboard::get_sdrs,
        handlers::dashboard::get_closers,
        handlers::dashboard::get_squads,
        handlers::dashboard::get_funil,
        handlers::dashboard::get_executivo,
        handlers::dashboard::get_comparativo,

        // --- Tráfego ---
        handlers::trafego::get_painel,
        handlers::trafego::post_analise,

        // --- IA ---
        handlers::ai::post_assistente,

        // --- Importação ---
        handlers::importacao::post_vendas,

        // --- Cadastros ---
        handlers::cadastros::list_vendas,
        handlers::cadastros::create_venda,
        handlers::cadastros::update_venda,
        handlers::cadastros::delete_venda,
        handlers::cadastros::list_agendamentos,
        handlers::cadastros::create_agendamento,
        handlers::cadastros::update_agendamento,
        handlers::cadastros::delete_agendamento,
        handlers::cadastros::list_colaboradores,
        handlers::cadastros::create_colaborador,
        handlers::cadastros::update_colaborador,
        handlers::cadastros::delete_colaborador,
        handlers::cadastros::get_meta,
        handlers::cadastros::put_meta,
    ),
    components(
        schemas(
            // --- CADASTROS ---
            models::venda::Venda,
            models::venda::NovaVenda,
            models::venda::OrigemVenda,
            models::agendamento::Agendamento,
            models::agendamento::NovoAgendamento,
            models::agendamento::StatusAgendamento,
            models::colaborador::Colaborador,
            models::colaborador::NovoColaborador,
            models::colaborador::TipoColaborador,
            models::meta::MetaMensal,
            models::meta::SalvarMetaPayload,

            // --- PAINÉIS ---
            models::financeiro::MetricasFinanceiras,
            models::desempenho::PainelSdr,
            models::desempenho::PainelCloser,
            models::dashboard::ComparativoSquads,
            models::dashboard::EtapaFunil,
            models::dashboard::ResumoExecutivo,
            models::dashboard::ComparativoMensal,
            models::dashboard::PainelTrafego,

            // --- IA / IMPORTAÇÃO ---
            models::ai::AssistenteRequest,
            models::ai::AnaliseTrafegoResultado,
            models::planilha::ResumoImportacao,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores comerciais do mês"),
        (name = "Tráfego", description = "Mídia paga e análise por IA"),
        (name = "IA", description = "Assistente de IA do painel"),
        (name = "Importação", description = "Importação da planilha de vendas"),
        (name = "Cadastros", description = "Vendas, agendamentos, equipe e metas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route_with_bearer_auth() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/dashboard/executivo"));
        assert!(doc.paths.paths.contains_key("/api/trafego/analise"));
        assert!(doc.paths.paths.contains_key("/api/metas/{mes}"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
        assert!(components.schemas.contains_key("ResumoExecutivo"));
    }
}
