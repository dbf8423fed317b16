// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Usuário autenticado (hoje só existe o usuário de demonstração).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthUser {
    #[schema(example = "test-user")]
    pub id: String,
    #[schema(example = "demo@sistemamr.com")]
    pub email: String,
    #[schema(example = "Usuário Demo")]
    pub name: String,
}

/// Sessão persistida entre reinícios do servidor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: AuthUser,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Cópia sem o token, para devolver ao cliente.
    pub fn redacted(&self) -> Self {
        Self {
            user: self.user.clone(),
            token: String::new(),
            created_at: self.created_at,
        }
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "demo@sistemamr.com")]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    #[schema(example = "123456")]
    pub password: String,
}

// Dados para registro (aceitos, mas o cadastro está desabilitado)
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUserPayload {
    pub email: String,
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (ID do usuário)
    pub exp: usize,  // Expiration time (quando o token expira)
    pub iat: usize,  // Issued At (quando o token foi criado)
}
