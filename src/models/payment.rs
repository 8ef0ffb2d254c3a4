//! Modelos de configuración de pago
//!
//! Canales de pago manual (labels + números de teléfono) y contacto de la
//! empresa. Configuración estática consumida en lectura por la UI móvil;
//! no forma parte del motor de inventario.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Canal de pago manual - mapea a la tabla payment_option
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentOption {
    pub id: i32,
    pub code: String,
    pub label: String,
    pub phone_number: String,
    pub is_active: bool,
    pub display_order: i32,
}

/// Contacto de la empresa - mapea a la tabla company_contact
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyContact {
    pub id: i32,
    pub whatsapp_number: String,
}
