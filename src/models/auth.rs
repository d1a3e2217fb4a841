// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Claims do JWT emitido pelo Supabase Auth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // ID do usuário no Supabase
    pub exp: usize, // Expiration time
    #[serde(default)]
    pub iat: usize,
    pub aud: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}
