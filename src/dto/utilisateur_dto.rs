//! DTOs de Utilisateur

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::utilisateur::{Role, Utilisateur};

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SearchUtilisateurQuery {
    #[validate(length(min = 1, max = 100))]
    pub q: String,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

/// Response de cuenta, sin campos sensibles
#[derive(Debug, Serialize)]
pub struct UtilisateurResponse {
    pub id: i32,
    pub username: String,
    pub nom_complet: String,
    pub telephone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub date_joined: String,
}

impl UtilisateurResponse {
    pub fn from_model(utilisateur: &Utilisateur) -> Self {
        Self {
            id: utilisateur.id,
            username: utilisateur.username.clone(),
            nom_complet: utilisateur.nom_complet(),
            telephone: utilisateur.telephone.clone(),
            role: utilisateur.role.clone(),
            is_active: utilisateur.is_active,
            date_joined: utilisateur.date_joined.to_rfc3339(),
        }
    }
}
