// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{FranchiseRepository, PgMetricsStore},
    services::dashboard_service::DashboardService,
};

// Parâmetros do motor de métricas. Montável em testes sem variáveis de ambiente.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub request_timeout: Duration,
    pub default_top_n: usize,
    pub maintenance_window_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            retry_delay: Duration::from_millis(50),
            request_timeout: Duration::from_secs(10),
            default_top_n: 5,
            maintenance_window_days: 7,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            // Nunca menos de uma tentativa
            max_attempts: env_or("METRICS_MAX_ATTEMPTS", defaults.max_attempts)?.max(1),
            retry_delay: Duration::from_millis(env_or("METRICS_RETRY_DELAY_MS", defaults.retry_delay.as_millis() as u64)?),
            request_timeout: Duration::from_secs(env_or("METRICS_REQUEST_TIMEOUT_SECS", defaults.request_timeout.as_secs())?),
            default_top_n: env_or("METRICS_DEFAULT_TOP_N", defaults.default_top_n)?,
            maintenance_window_days: env_or(
                "METRICS_MAINTENANCE_WINDOW_DAYS",
                defaults.maintenance_window_days,
            )?,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} tem um valor inválido: '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let max_connections = env_or("DB_MAX_CONNECTIONS", 5u32)?;
        let engine_config = EngineConfig::from_env()?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        tracing::debug!("Configuração do motor de métricas: {:?}", engine_config);

        // --- Monta o gráfico de dependências ---
        let store = Arc::new(PgMetricsStore::new(db_pool.clone()));
        let directory = Arc::new(FranchiseRepository::new(db_pool));
        let dashboard_service = DashboardService::new(store, directory, engine_config);

        Ok(Self::with_service(dashboard_service))
    }

    pub fn with_service(dashboard_service: DashboardService) -> Self {
        Self { dashboard_service }
    }
}

pub fn bind_addr() -> String {
    env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}
