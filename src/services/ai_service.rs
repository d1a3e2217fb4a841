// src/services/ai_service.rs
//
// Chamadas às edge functions do Supabase que fazem proxy para o LLM
// (`ai-assistant`, `ai-trafego-analyst`) e para a API de anúncios da Meta
// (`fetch-meta-campaigns`). Sem retry: falhas sobem direto para o cliente.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    models::ai::{
        AnaliseTrafegoRequest, AnaliseTrafegoResponse, AnaliseTrafegoResultado, AssistenteRequest,
        CampanhasMetaResponse, ErroEdgeFunction,
    },
};

pub const FUNCAO_ASSISTENTE: &str = "ai-assistant";
pub const FUNCAO_ANALISE_TRAFEGO: &str = "ai-trafego-analyst";
pub const FUNCAO_CAMPANHAS_META: &str = "fetch-meta-campaigns";

#[async_trait]
pub trait AiGateway: Send + Sync {
    async fn assistente(&self, req: &AssistenteRequest) -> Result<Value, AppError>;

    async fn analisar_trafego(
        &self,
        req: &AnaliseTrafegoRequest,
    ) -> Result<AnaliseTrafegoResponse, AppError>;

    async fn buscar_campanhas_meta(&self) -> Result<CampanhasMetaResponse, AppError>;
}

/// Cliente HTTP para `{SUPABASE_URL}/functions/v1/<nome>`.
#[derive(Clone)]
pub struct SupabaseFunctionsClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseFunctionsClient {
    pub fn new(http: reqwest::Client, supabase_url: &str, anon_key: &str) -> Self {
        Self {
            http,
            base_url: format!("{}/functions/v1", supabase_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
        }
    }

    pub fn url_funcao(&self, nome: &str) -> String {
        format!("{}/{}", self.base_url, nome)
    }

    async fn invocar<B, T>(&self, nome: &str, corpo: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let resposta = self
            .http
            .post(self.url_funcao(nome))
            .bearer_auth(&self.anon_key)
            .header("apikey", &self.anon_key)
            .json(corpo)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(funcao = nome, "Falha ao chamar edge function: {}", e);
                e
            })?;

        let status = resposta.status();
        if !status.is_success() {
            let texto = resposta.text().await.unwrap_or_default();
            return Err(erro_da_funcao(nome, status, &texto));
        }

        Ok(resposta.json::<T>().await?)
    }
}

/// Traduz o status HTTP da edge function para o erro da aplicação.
pub fn erro_da_funcao(nome: &str, status: StatusCode, corpo: &str) -> AppError {
    let mensagem = serde_json::from_str::<ErroEdgeFunction>(corpo)
        .map(|e| e.error)
        .unwrap_or_else(|_| corpo.trim().to_string());

    tracing::error!(funcao = nome, status = %status, "Edge function retornou erro: {}", mensagem);

    match status {
        StatusCode::TOO_MANY_REQUESTS => AppError::AiRateLimited,
        StatusCode::PAYMENT_REQUIRED => AppError::AiCreditsRequired,
        _ if mensagem.is_empty() => AppError::AiGateway(format!("{} respondeu {}", nome, status)),
        _ => AppError::AiGateway(mensagem),
    }
}

#[async_trait]
impl AiGateway for SupabaseFunctionsClient {
    async fn assistente(&self, req: &AssistenteRequest) -> Result<Value, AppError> {
        self.invocar(FUNCAO_ASSISTENTE, req).await
    }

    async fn analisar_trafego(
        &self,
        req: &AnaliseTrafegoRequest,
    ) -> Result<AnaliseTrafegoResponse, AppError> {
        self.invocar(FUNCAO_ANALISE_TRAFEGO, req).await
    }

    async fn buscar_campanhas_meta(&self) -> Result<CampanhasMetaResponse, AppError> {
        self.invocar(FUNCAO_CAMPANHAS_META, &json!({})).await
    }
}

// =============================================================================
//  CACHE DA ANÁLISE DE TRÁFEGO
// =============================================================================

#[derive(Debug, Clone)]
struct EntradaCache {
    analise: Value,
    gerada_em: DateTime<Utc>,
    criada: Instant,
}

/// Cache de uma única entrada (chave global) com TTL fixo.
///
/// Mudanças nos dados dentro da janela não geram nova análise; quem precisa
/// de dados frescos força a atualização.
#[derive(Debug, Clone)]
pub struct AnaliseCache {
    ttl: Duration,
    entrada: Arc<RwLock<Option<EntradaCache>>>,
}

impl AnaliseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entrada: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn obter(&self) -> Option<AnaliseTrafegoResultado> {
        let guarda = self.entrada.read().await;
        guarda
            .as_ref()
            .filter(|e| e.criada.elapsed() < self.ttl)
            .map(|e| AnaliseTrafegoResultado {
                analysis: e.analise.clone(),
                em_cache: true,
                gerada_em: e.gerada_em,
            })
    }

    pub async fn guardar(&self, analise: Value) -> AnaliseTrafegoResultado {
        let gerada_em = Utc::now();
        *self.entrada.write().await = Some(EntradaCache {
            analise: analise.clone(),
            gerada_em,
            criada: Instant::now(),
        });
        AnaliseTrafegoResultado {
            analysis: analise,
            em_cache: false,
            gerada_em,
        }
    }
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct AiService {
    gateway: Arc<dyn AiGateway>,
    cache: AnaliseCache,
}

impl AiService {
    pub fn new(gateway: Arc<dyn AiGateway>, ttl: Duration) -> Self {
        Self {
            gateway,
            cache: AnaliseCache::new(ttl),
        }
    }

    pub async fn assistente(&self, req: &AssistenteRequest) -> Result<Value, AppError> {
        tracing::debug!(tipo = req.tipo.as_str(), "Chamando assistente de IA");
        self.gateway.assistente(req).await
    }

    /// Análise de tráfego com cache global; `forcar` ignora e renova o cache.
    pub async fn analisar_trafego(
        &self,
        req: &AnaliseTrafegoRequest,
        forcar: bool,
    ) -> Result<AnaliseTrafegoResultado, AppError> {
        if !forcar {
            if let Some(em_cache) = self.cache.obter().await {
                tracing::debug!("Análise de tráfego servida do cache");
                return Ok(em_cache);
            }
        }

        let resposta = self.gateway.analisar_trafego(req).await?;
        if !resposta.success {
            return Err(AppError::AiGateway(
                "A análise de tráfego não foi concluída".to_string(),
            ));
        }

        Ok(self.cache.guardar(resposta.analysis).await)
    }

    /// Campanhas da Meta; `None` quando a integração falha por qualquer motivo
    /// que não seja limite/créditos.
    pub async fn campanhas_meta(&self) -> Result<Option<CampanhasMetaResponse>, AppError> {
        match self.gateway.buscar_campanhas_meta().await {
            Ok(resposta) if resposta.success => Ok(Some(resposta)),
            Ok(_) => {
                tracing::warn!("fetch-meta-campaigns retornou success=false");
                Ok(None)
            }
            Err(e @ (AppError::AiRateLimited | AppError::AiCreditsRequired)) => Err(e),
            Err(e) => {
                tracing::warn!("Campanhas da Meta indisponíveis: {}", e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::trafego::consolidar_campanhas;
    use crate::models::ai::TipoAssistente;
    use crate::models::marketing::CampanhaData;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct GatewayFalso {
        chamadas_analise: AtomicUsize,
        status_erro: Option<StatusCode>,
    }

    #[async_trait]
    impl AiGateway for GatewayFalso {
        async fn assistente(&self, req: &AssistenteRequest) -> Result<Value, AppError> {
            Ok(json!({ req.tipo.as_str(): "ok", "timestamp": "2025-03-10T12:00:00Z" }))
        }

        async fn analisar_trafego(
            &self,
            _req: &AnaliseTrafegoRequest,
        ) -> Result<AnaliseTrafegoResponse, AppError> {
            if let Some(status) = self.status_erro {
                return Err(erro_da_funcao(FUNCAO_ANALISE_TRAFEGO, status, r#"{"error":"x"}"#));
            }
            let n = self.chamadas_analise.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(AnaliseTrafegoResponse {
                success: true,
                analysis: json!({ "rodada": n }),
            })
        }

        async fn buscar_campanhas_meta(&self) -> Result<CampanhasMetaResponse, AppError> {
            Err(AppError::AiGateway("META_ACCESS_TOKEN ausente".into()))
        }
    }

    fn requisicao() -> AnaliseTrafegoRequest {
        let campanhas = vec![CampanhaData {
            nome: "Março".into(),
            canal: "meta".into(),
            investimento: 1000.0,
            leads: 50,
            ..Default::default()
        }];
        let (totais, canais) = consolidar_campanhas(&campanhas);
        AnaliseTrafegoRequest {
            campanhas,
            totais,
            canais,
            dias_no_mes: 31,
            dias_decorridos: 10,
            data_atual: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            taxas_conversao: BTreeMap::new(),
        }
    }

    fn servico(gateway: Arc<GatewayFalso>, ttl: Duration) -> AiService {
        AiService::new(gateway, ttl)
    }

    #[tokio::test]
    async fn analysis_is_cached_within_ttl() {
        let gateway = Arc::new(GatewayFalso::default());
        let s = servico(gateway.clone(), Duration::from_secs(1800));

        let primeira = s.analisar_trafego(&requisicao(), false).await.unwrap();
        let segunda = s.analisar_trafego(&requisicao(), false).await.unwrap();

        assert!(!primeira.em_cache);
        assert!(segunda.em_cache);
        assert_eq!(segunda.analysis, json!({ "rodada": 1 }));
        assert_eq!(gateway.chamadas_analise.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn forced_refresh_bypasses_cache() {
        let gateway = Arc::new(GatewayFalso::default());
        let s = servico(gateway.clone(), Duration::from_secs(1800));

        s.analisar_trafego(&requisicao(), false).await.unwrap();
        let nova = s.analisar_trafego(&requisicao(), true).await.unwrap();

        assert!(!nova.em_cache);
        assert_eq!(nova.analysis, json!({ "rodada": 2 }));

        let depois = s.analisar_trafego(&requisicao(), false).await.unwrap();
        assert_eq!(depois.analysis, json!({ "rodada": 2 }));
    }

    #[tokio::test]
    async fn expired_entry_triggers_new_analysis() {
        let gateway = Arc::new(GatewayFalso::default());
        let s = servico(gateway.clone(), Duration::from_millis(20));

        s.analisar_trafego(&requisicao(), false).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        let nova = s.analisar_trafego(&requisicao(), false).await.unwrap();

        assert!(!nova.em_cache);
        assert_eq!(gateway.chamadas_analise.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn rate_limit_and_credit_errors_keep_their_status() {
        let limite = Arc::new(GatewayFalso {
            status_erro: Some(StatusCode::TOO_MANY_REQUESTS),
            ..Default::default()
        });
        let erro = servico(limite, Duration::from_secs(60))
            .analisar_trafego(&requisicao(), false)
            .await
            .unwrap_err();
        assert!(matches!(erro, AppError::AiRateLimited));

        let creditos = Arc::new(GatewayFalso {
            status_erro: Some(StatusCode::PAYMENT_REQUIRED),
            ..Default::default()
        });
        let erro = servico(creditos, Duration::from_secs(60))
            .analisar_trafego(&requisicao(), false)
            .await
            .unwrap_err();
        assert_eq!(erro.status_code(), axum::http::StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn generic_failures_carry_the_function_message() {
        let erro = erro_da_funcao(
            FUNCAO_ASSISTENTE,
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"LOVABLE_API_KEY is not configured"}"#,
        );
        match erro {
            AppError::AiGateway(msg) => assert_eq!(msg, "LOVABLE_API_KEY is not configured"),
            outro => panic!("erro inesperado: {:?}", outro),
        }

        let erro = erro_da_funcao(FUNCAO_ASSISTENTE, StatusCode::BAD_GATEWAY, "");
        assert!(matches!(erro, AppError::AiGateway(m) if m.contains("502")));
    }

    #[tokio::test]
    async fn meta_campaign_failure_degrades_to_none() {
        let s = servico(Arc::new(GatewayFalso::default()), Duration::from_secs(60));
        assert!(s.campanhas_meta().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn assistant_passes_response_through() {
        let s = servico(Arc::new(GatewayFalso::default()), Duration::from_secs(60));
        let req = AssistenteRequest {
            tipo: TipoAssistente::Report,
            metrics: json!({}),
            history: None,
            question: None,
            changes: None,
        };
        let resposta = s.assistente(&req).await.unwrap();
        assert_eq!(resposta["report"], "ok");
    }

    #[test]
    fn function_urls_are_built_from_project_url() {
        let c = SupabaseFunctionsClient::new(reqwest::Client::new(), "https://abc.supabase.co/", "anon");
        assert_eq!(
            c.url_funcao(FUNCAO_CAMPANHAS_META),
            "https://abc.supabase.co/functions/v1/fetch-meta-campaigns"
        );
    }
}
