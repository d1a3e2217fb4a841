// src/services/auth.rs
//
// Login e cadastro ficam no Supabase Auth; aqui só validamos o token.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::{common::error::AppError, models::auth::Claims};

pub const AUDIENCIA_SUPABASE: &str = "authenticated";

#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUDIENCIA_SUPABASE]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::InvalidToken
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    const SEGREDO: &str = "segredo-de-teste";

    fn token(aud: &str, validade_segundos: i64, segredo: &str) -> String {
        let agora = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: (agora + validade_segundos) as usize,
            iat: agora as usize,
            aud: aud.to_string(),
            email: Some("gestor@empresa.com".into()),
            role: Some("authenticated".into()),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(segredo.as_ref())).unwrap()
    }

    #[test]
    fn accepts_supabase_session_token() {
        let servico = AuthService::new(SEGREDO.into());
        let claims = servico.validate_token(&token(AUDIENCIA_SUPABASE, 3600, SEGREDO)).unwrap();
        assert_eq!(claims.email.as_deref(), Some("gestor@empresa.com"));
    }

    #[test]
    fn rejects_wrong_audience_secret_or_expired() {
        let servico = AuthService::new(SEGREDO.into());
        for t in [
            token("anon", 3600, SEGREDO),
            token(AUDIENCIA_SUPABASE, 3600, "outro-segredo"),
            token(AUDIENCIA_SUPABASE, -3600, SEGREDO),
        ] {
            assert!(matches!(servico.validate_token(&t), Err(AppError::InvalidToken)));
        }
    }
}
