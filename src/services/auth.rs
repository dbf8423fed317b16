// src/services/auth.rs

use std::sync::Arc;

use async_trait::async_trait;
use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    models::auth::{AuthResponse, AuthUser, Claims, Session},
    services::session::SessionStore,
};

/// Id fixo do usuário de demonstração; todas as linhas do banco usam este id.
pub const DEMO_USER_ID: &str = "test-user";

const TOKEN_TTL_DAYS: i64 = 7;

/// Capacidade de autenticação. Um login real seria outra implementação.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthUser, AppError>;
}

/// Compara com as credenciais vindas da configuração.
/// A senha fica em memória apenas como hash bcrypt.
pub struct StaticCredentialAuthenticator {
    user: AuthUser,
    password_hash: String,
}

impl StaticCredentialAuthenticator {
    pub fn new(email: &str, password: &str, name: &str, bcrypt_cost: u32) -> Result<Self, AppError> {
        let password_hash = hash(password, bcrypt_cost)?;
        Ok(Self {
            user: AuthUser {
                id: DEMO_USER_ID.to_string(),
                email: email.to_string(),
                name: name.to_string(),
            },
            password_hash,
        })
    }
}

#[async_trait]
impl Authenticator for StaticCredentialAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        if !email.trim().eq_ignore_ascii_case(&self.user.email) {
            return Err(AppError::InvalidCredentials);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = self.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(self.user.clone())
    }
}

#[derive(Clone)]
pub struct AuthService {
    authenticator: Arc<dyn Authenticator>,
    sessions: Arc<dyn SessionStore>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        sessions: Arc<dyn SessionStore>,
        jwt_secret: String,
    ) -> Self {
        Self { authenticator, sessions, jwt_secret }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = match self.authenticator.authenticate(email, password).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("🔒 Tentativa de login recusada para {}", email);
                return Err(e);
            }
        };

        let token = self.create_token(&user.id)?;
        let session = Session {
            user: user.clone(),
            token: token.clone(),
            created_at: Utc::now(),
        };
        // Um novo login substitui a sessão anterior
        self.sessions.save(&session).await?;

        tracing::info!("🔑 Login de {}", user.email);
        Ok(AuthResponse { token, user })
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.sessions.clear().await?;
        tracing::info!("👋 Sessão encerrada");
        Ok(())
    }

    pub async fn current_session(&self) -> Result<Option<Session>, AppError> {
        self.sessions.load().await
    }

    /// O token precisa ser válido e ser o da sessão ativa.
    pub async fn validate_token(&self, token: &str) -> Result<AuthUser, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        let session = self
            .sessions
            .load()
            .await?
            .filter(|s| s.token == token && s.user.id == token_data.claims.sub)
            .ok_or(AppError::InvalidToken)?;

        Ok(session.user)
    }

    fn create_token(&self, user_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session::MemorySessionStore;

    fn service() -> AuthService {
        let authenticator =
            StaticCredentialAuthenticator::new("demo@sistemamr.com", "123456", "Usuário Demo", 4)
                .unwrap();
        AuthService::new(
            Arc::new(authenticator),
            Arc::new(MemorySessionStore::default()),
            "segredo-de-teste".into(),
        )
    }

    #[tokio::test]
    async fn login_with_configured_credentials() {
        let auth = service();
        let response = auth.login_user("demo@sistemamr.com", "123456").await.unwrap();

        assert_eq!(response.user.id, DEMO_USER_ID);
        assert_eq!(response.user.name, "Usuário Demo");

        let session = auth.current_session().await.unwrap().unwrap();
        assert_eq!(session.token, response.token);
    }

    #[tokio::test]
    async fn wrong_password_or_email_is_rejected() {
        let auth = service();
        assert!(matches!(
            auth.login_user("demo@sistemamr.com", "654321").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login_user("outro@sistemamr.com", "123456").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(auth.current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn token_is_valid_only_while_session_exists() {
        let auth = service();
        let response = auth.login_user("demo@sistemamr.com", "123456").await.unwrap();

        let user = auth.validate_token(&response.token).await.unwrap();
        assert_eq!(user.email, "demo@sistemamr.com");

        auth.logout().await.unwrap();
        assert!(matches!(
            auth.validate_token(&response.token).await,
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let auth = service();
        auth.login_user("demo@sistemamr.com", "123456").await.unwrap();
        assert!(matches!(auth.validate_token("nao.e.jwt").await, Err(AppError::InvalidToken)));
    }
}
