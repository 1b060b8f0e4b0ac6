//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use franchise_metrics::config::{bind_addr, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; padrão "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().await.inspect_err(|e| {
        tracing::error!("🔥 Falha ao inicializar o estado da aplicação: {:?}", e);
    })?;

    let app = franchise_metrics::app(app_state);

    // Inicia o servidor
    let addr = bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📚 Documentação em http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
