// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{FixedCostRepository, PgRecordSource, RevenueRepository, SporadicCostRepository, VariableCostRepository},
    services::{
        auth::{AuthService, StaticCredentialAuthenticator},
        dashboard_service::DashboardService,
        session::{FileSessionStore, MemorySessionStore, SessionStore},
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub auth_test_email: String,
    pub auth_test_password: String,
    pub auth_test_name: String,
    pub bcrypt_cost: u32,
    pub session_file: String,
    pub server_addr: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let database_max_connections = var_or("DATABASE_MAX_CONNECTIONS", "5")
            .parse()
            .context("DATABASE_MAX_CONNECTIONS deve ser um número")?;

        let bcrypt_cost = var_or("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())
            .parse()
            .context("BCRYPT_COST deve ser um número")?;

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            auth_test_email: var_or("AUTH_TEST_EMAIL", "demo@sistemamr.com"),
            auth_test_password: var_or("AUTH_TEST_PASSWORD", "123456"),
            auth_test_name: var_or("AUTH_TEST_NAME", "Usuário Demo"),
            bcrypt_cost,
            session_file: var_or("SESSION_FILE", ".sistema_mr_session.json"),
            server_addr: var_or("SERVER_ADDR", "0.0.0.0:3000"),
        })
    }
}

/// `SESSION_FILE` vazio mantém a sessão só em memória.
pub async fn session_store(config: &AppConfig) -> anyhow::Result<Arc<dyn SessionStore>> {
    let path = config.session_file.trim();
    if path.is_empty() {
        tracing::info!("Sessão mantida apenas em memória");
        return Ok(Arc::new(MemorySessionStore::default()));
    }

    let store = FileSessionStore::open(path)
        .await
        .with_context(|| format!("Falha ao abrir o arquivo de sessão {}", path))?;
    Ok(Arc::new(store))
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: Arc<I18nStore>,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub fixed_cost_repo: FixedCostRepository,
    pub sporadic_cost_repo: SporadicCostRepository,
    pub variable_cost_repo: VariableCostRepository,
    pub revenue_repo: RevenueRepository,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let sessions = session_store(config).await?;
        Self::with_pool(config, db_pool, sessions)
    }

    /// Monta o gráfico de dependências sobre um pool já criado.
    pub fn with_pool(
        config: &AppConfig,
        db_pool: PgPool,
        sessions: Arc<dyn SessionStore>,
    ) -> anyhow::Result<Self> {
        let fixed_cost_repo = FixedCostRepository::new(db_pool.clone());
        let sporadic_cost_repo = SporadicCostRepository::new(db_pool.clone());
        let variable_cost_repo = VariableCostRepository::new(db_pool.clone());
        let revenue_repo = RevenueRepository::new(db_pool.clone());

        let record_source = PgRecordSource::new(
            fixed_cost_repo.clone(),
            sporadic_cost_repo.clone(),
            variable_cost_repo.clone(),
            revenue_repo.clone(),
        );
        let dashboard_service = DashboardService::new(Arc::new(record_source));

        let authenticator = StaticCredentialAuthenticator::new(
            &config.auth_test_email,
            &config.auth_test_password,
            &config.auth_test_name,
            config.bcrypt_cost,
        )
        .map_err(|e| anyhow::anyhow!("Falha ao preparar as credenciais de teste: {}", e))?;

        let auth_service =
            AuthService::new(Arc::new(authenticator), sessions, config.jwt_secret.clone());

        Ok(Self {
            db_pool,
            i18n_store: Arc::new(I18nStore::new()),
            auth_service,
            dashboard_service,
            fixed_cost_repo,
            sporadic_cost_repo,
            variable_cost_repo,
            revenue_repo,
        })
    }
}
