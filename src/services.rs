pub mod ai_service;
pub mod auth;
pub mod cadastro_service;
pub mod dashboard_service;
pub mod import_service;
