//! Modelo de Trajet
//!
//! Datos de referencia inmutables: origen, destino, distancia y duración
//! prevista. Referenciado por muchos voyages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Trajet principal - mapea exactamente a la tabla trajet
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trajet {
    pub id_trajet: i32,
    pub ville_depart: String,
    pub ville_arrivee: String,
    pub distance_km: Decimal,
    pub duree_prevue_minutes: Option<i32>,
}
