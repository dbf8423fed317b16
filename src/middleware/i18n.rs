// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

/// Idioma das mensagens de erro, vindo do `Accept-Language`.
/// Sem cabeçalho (ou com lixo) fica em português, como as telas.
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale("pt".to_string())
    }
}

impl Locale {
    pub fn from_header(header_str: &str) -> Self {
        accept_language::parse(header_str)
            .first() // Pega o idioma preferido (ex: "pt-BR")
            .and_then(|tag| tag.split('-').next())
            .filter(|lang| !lang.is_empty())
            .map(|lang| Locale(lang.to_ascii_lowercase()))
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default();

        Ok(locale)
    }
}
