//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod metrics;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

fn api_routes(app_state: AppState) -> Router<AppState> {
    let dashboard_routes = Router::new()
        .route("/financeiro", get(handlers::dashboard::get_financeiro))
        .route("/sdrs", get(handlers::dashboard::get_sdrs))
        .route("/closers", get(handlers::dashboard::get_closers))
        .route("/squads", get(handlers::dashboard::get_squads))
        .route("/funil", get(handlers::dashboard::get_funil))
        .route("/executivo", get(handlers::dashboard::get_executivo))
        .route("/comparativo", get(handlers::dashboard::get_comparativo));

    let trafego_routes = Router::new()
        .route("/", get(handlers::trafego::get_painel))
        .route("/analise", post(handlers::trafego::post_analise));

    let cadastro_routes = Router::new()
        .route("/vendas"
               ,post(handlers::cadastros::create_venda)
               .get(handlers::cadastros::list_vendas)
        )
        .route("/vendas/{id}"
               ,put(handlers::cadastros::update_venda)
               .delete(handlers::cadastros::delete_venda)
        )
        .route("/agendamentos"
               ,post(handlers::cadastros::create_agendamento)
               .get(handlers::cadastros::list_agendamentos)
        )
        .route("/agendamentos/{id}"
               ,put(handlers::cadastros::update_agendamento)
               .delete(handlers::cadastros::delete_agendamento)
        )
        .route("/colaboradores"
               ,post(handlers::cadastros::create_colaborador)
               .get(handlers::cadastros::list_colaboradores)
        )
        .route("/colaboradores/{id}"
               ,put(handlers::cadastros::update_colaborador)
               .delete(handlers::cadastros::delete_colaborador)
        )
        .route("/metas/{mes}"
               ,get(handlers::cadastros::get_meta)
               .put(handlers::cadastros::put_meta)
        );

    Router::new()
        .nest("/dashboard", dashboard_routes)
        .nest("/trafego", trafego_routes)
        .route("/ai/assistente", post(handlers::ai::post_assistente))
        .route("/importacao/vendas", post(handlers::importacao::post_vendas))
        .merge(cadastro_routes)
        // Toda a API exige o JWT do Supabase
        .layer(axum_middleware::from_fn_with_state(app_state, auth_guard))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Sem configuração válida a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings).await?;

    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", api_routes(app_state.clone()))
        .with_state(app_state);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
