//! Shared application state
//!
//! Estado compartido que se pasa a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::payment_verifier::PaymentVerifier;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    /// Verificador de preuves de pago inyectado al protocolo de admisión
    pub verifier: Arc<dyn PaymentVerifier>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, verifier: Arc<dyn PaymentVerifier>) -> Self {
        Self {
            pool,
            config,
            verifier,
        }
    }
}
