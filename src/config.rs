// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AgendamentosRepository, ColaboradoresRepository, MarketingRepository, MetasRepository,
        VendasRepository,
    },
    metrics::squads::{ClassificadorSquads, ConfigSquads},
    services::{
        ai_service::{AiService, SupabaseFunctionsClient},
        auth::AuthService,
        cadastro_service::CadastroService,
        dashboard_service::DashboardService,
        import_service::ImportService,
    },
};

const BIND_ADDR_PADRAO: &str = "0.0.0.0:3000";
const TTL_ANALISE_PADRAO_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub supabase_jwt_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub sheets_csv_url: Option<String>,
    pub squads_config: Option<PathBuf>,
    pub bind_addr: String,
    pub analise_cache_ttl: Duration,
}

fn obrigatoria(nome: &str) -> anyhow::Result<String> {
    env::var(nome).with_context(|| format!("{} deve ser definida", nome))
}

fn opcional(nome: &str) -> Option<String> {
    env::var(nome).ok().filter(|v| !v.trim().is_empty())
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let ttl = match opcional("ANALISE_CACHE_TTL_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("ANALISE_CACHE_TTL_SECS inválido: {}", v))?,
            None => TTL_ANALISE_PADRAO_SECS,
        };

        Ok(Self {
            database_url: obrigatoria("DATABASE_URL")?,
            supabase_jwt_secret: obrigatoria("SUPABASE_JWT_SECRET")?,
            supabase_url: opcional("SUPABASE_URL").unwrap_or_default(),
            supabase_anon_key: opcional("SUPABASE_ANON_KEY").unwrap_or_default(),
            sheets_csv_url: opcional("SHEETS_CSV_URL"),
            squads_config: opcional("SQUADS_CONFIG").map(PathBuf::from),
            bind_addr: opcional("BIND_ADDR").unwrap_or_else(|| BIND_ADDR_PADRAO.to_string()),
            analise_cache_ttl: Duration::from_secs(ttl),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub cadastro_service: CadastroService,
    pub import_service: ImportService,
    pub ai_service: AiService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let config_squads = match &settings.squads_config {
            Some(caminho) => ConfigSquads::carregar(caminho)?,
            None => ConfigSquads::default(),
        };
        let classificador = Arc::new(ClassificadorSquads::new(config_squads));

        if settings.supabase_url.is_empty() {
            tracing::warn!("SUPABASE_URL não definida: recursos de IA e campanhas da Meta ficarão indisponíveis");
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        // --- Monta o grafo de dependências ---
        let vendas_repo = VendasRepository::new();
        let agendamentos_repo = AgendamentosRepository::new();
        let colaboradores_repo = ColaboradoresRepository::new();
        let metas_repo = MetasRepository::new();
        let marketing_repo = MarketingRepository::new();

        let gateway = Arc::new(SupabaseFunctionsClient::new(
            http.clone(),
            &settings.supabase_url,
            &settings.supabase_anon_key,
        ));
        let ai_service = AiService::new(gateway, settings.analise_cache_ttl);

        let import_service = ImportService::new(
            vendas_repo.clone(),
            colaboradores_repo.clone(),
            http,
            settings.sheets_csv_url.clone(),
        );

        let dashboard_service = DashboardService::new(
            vendas_repo.clone(),
            agendamentos_repo.clone(),
            colaboradores_repo.clone(),
            metas_repo.clone(),
            marketing_repo,
            classificador,
            import_service.clone(),
            ai_service.clone(),
        );

        let cadastro_service = CadastroService::new(
            vendas_repo,
            agendamentos_repo,
            colaboradores_repo,
            metas_repo,
        );

        Ok(Self {
            db_pool,
            auth_service: AuthService::new(settings.supabase_jwt_secret.clone()),
            dashboard_service,
            cadastro_service,
            import_service,
            ai_service,
        })
    }
}
