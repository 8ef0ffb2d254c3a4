use sqlx::PgPool;

use crate::models::payment::{CompanyContact, PaymentOption};
use crate::utils::errors::AppError;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Canales de pago activos, en el orden configurado
    pub async fn find_active_options(&self) -> Result<Vec<PaymentOption>, AppError> {
        let options = sqlx::query_as::<_, PaymentOption>(
            "SELECT * FROM payment_option WHERE is_active = TRUE ORDER BY display_order, label",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    pub async fn find_contact(&self) -> Result<Option<CompanyContact>, AppError> {
        let contact = sqlx::query_as::<_, CompanyContact>(
            "SELECT * FROM company_contact ORDER BY id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }
}
