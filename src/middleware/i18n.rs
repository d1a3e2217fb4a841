// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::format::FormatoNumerico;

// Idioma preferido do cliente (ex: "pt", "en"), usado para formatar números.
pub struct Locale(pub String);

impl Locale {
    pub fn formato(&self) -> FormatoNumerico {
        FormatoNumerico::from_idioma(&self.0)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|valor| valor.to_str().ok())
            .and_then(|texto| {
                accept_language::parse(texto)
                    .first()
                    // "pt-BR" -> "pt"
                    .map(|tag| tag.split('-').next().unwrap_or(tag).to_lowercase())
            })
            .unwrap_or_else(|| "pt".to_string());

        Ok(Locale(lang))
    }
}
