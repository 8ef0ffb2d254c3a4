//! Modelo de Chauffeur

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Chauffeur principal - mapea exactamente a la tabla chauffeur.
/// `user_id` enlaza opcionalmente (1 a 1) con una cuenta utilisateur
/// para el acceso móvil del chauffeur.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Chauffeur {
    pub id_chauffeur: i32,
    pub nom: String,
    pub telephone: Option<String>,
    pub user_id: Option<i32>,
}
