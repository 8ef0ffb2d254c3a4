//! Modelo de Vehicule
//!
//! La capacité es el techo duro de plazas para todo voyage que use este
//! vehículo; la hace respetar el protocolo de admisión, no el storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Vehicule principal - mapea exactamente a la tabla vehicule
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicule {
    pub id_vehicule: i32,
    pub matricule: String,
    pub capacite: i32,
    pub type_vehicule: String,
    pub kilometrage_total: Decimal,
}
