// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erros de domínio. Handlers convertem para `ApiError` (já traduzido)
// através de `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Mês inválido: {0}")]
    InvalidMonth(String),

    #[error("Parâmetro month é obrigatório")]
    MissingMonth,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Cadastro desabilitado")]
    RegistrationDisabled,

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // `anyhow::Error` carrega o contexto do erro (I/O da sessão, tasks, etc.)
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// Erro pronto para a resposta HTTP.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidMonth(_) | AppError::MissingMonth => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::RegistrationDisabled => StatusCode::FORBIDDEN,
            AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::InvalidMonth(_) => "invalid_month",
            AppError::MissingMonth => "missing_month",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::RegistrationDisabled => "registration_disabled",
            AppError::ResourceNotFound(_) => "resource_not_found",
            _ => "internal_error",
        }
    }

    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let mut message = store.translate(&locale.0, self.message_key());
        match self {
            AppError::InvalidMonth(raw) => message = message.replace("{0}", raw),
            AppError::ResourceNotFound(what) => message = message.replace("{0}", what),
            _ => {}
        }

        let details = match self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            _ => None,
        };

        ApiError { status, error: message, details }
    }
}

// Campo -> lista de mensagens, no formato que o frontend já consome.
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|e| match &e.message {
                Some(m) => Value::String(m.to_string()),
                None => Value::String(e.code.to_string()),
            })
            .collect();
        details.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(details)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    #[test]
    fn not_found_is_translated_with_resource_name() {
        let store = I18nStore::new();
        let api = AppError::ResourceNotFound("Custo fixo".into()).to_api_error(&pt(), &store);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "Custo fixo não encontrado.");
        assert!(api.details.is_none());
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("range");
        err.message = Some("O dia de vencimento deve estar entre 1 e 31.".into());
        errors.add("dueDay", err);

        let api = AppError::ValidationError(errors).to_api_error(&pt(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.unwrap();
        assert_eq!(
            details["dueDay"][0],
            "O dia de vencimento deve estar entre 1 e 31."
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let api = AppError::InternalServerError(anyhow::anyhow!("disco cheio"))
            .to_api_error(&Locale("en".into()), &I18nStore::new());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("disco"));
    }
}
