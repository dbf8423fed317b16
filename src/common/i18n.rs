// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "pt";

// (idioma, chave, mensagem)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("pt", "validation_error", "Um ou mais campos são inválidos."),
    ("en", "validation_error", "One or more fields are invalid."),
    ("pt", "invalid_month", "Mês inválido '{0}'. Use o formato YYYY-MM."),
    ("en", "invalid_month", "Invalid month '{0}'. Use the YYYY-MM format."),
    ("pt", "missing_month", "Parâmetro month é obrigatório (YYYY-MM)."),
    ("en", "missing_month", "The month parameter is required (YYYY-MM)."),
    ("pt", "invalid_credentials", "E-mail ou senha inválidos. Use o usuário de demonstração."),
    ("en", "invalid_credentials", "Invalid e-mail or password. Use the demo user."),
    ("pt", "invalid_token", "Token de autenticação inválido ou ausente."),
    ("en", "invalid_token", "Missing or invalid authentication token."),
    (
        "pt",
        "registration_disabled",
        "Cadastro de novos usuários está desabilitado neste ambiente de teste. Use o usuário de demonstração.",
    ),
    (
        "en",
        "registration_disabled",
        "Sign-up is disabled in this test environment. Use the demo user.",
    ),
    ("pt", "resource_not_found", "{0} não encontrado."),
    ("en", "resource_not_found", "{0} not found."),
    ("pt", "internal_error", "Ocorreu um erro inesperado."),
    ("en", "internal_error", "An unexpected error occurred."),
];

/// Catálogo de mensagens de erro por idioma.
#[derive(Debug, Clone)]
pub struct I18nStore {
    // chave: "idioma.chave"
    messages: HashMap<String, &'static str>,
}

impl I18nStore {
    pub fn new() -> Self {
        let messages = MESSAGES
            .iter()
            .map(|(lang, key, text)| (format!("{lang}.{key}"), *text))
            .collect();
        Self { messages }
    }

    /// Idioma desconhecido cai para português; chave desconhecida volta como está.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(&format!("{lang}.{key}"))
            .or_else(|| self.messages.get(&format!("{DEFAULT_LANG}.{key}")))
            .map(|m| m.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
