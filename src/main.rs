// src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;

use crate::config::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG sobrescreve o nível padrão
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let app_state = AppState::new(&config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados.")?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Sessão salva antes do último desligamento continua válida
    match app_state.auth_service.current_session().await {
        Ok(Some(session)) => tracing::info!("🔑 Sessão restaurada para {}", session.user.email),
        Ok(None) => tracing::info!("Nenhuma sessão ativa"),
        Err(e) => tracing::warn!("⚠️ Não foi possível ler a sessão salva: {}", e),
    }

    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", config.server_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📚 Documentação em /swagger-ui");

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;

    Ok(())
}
