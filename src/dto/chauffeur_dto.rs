//! DTOs de Chauffeur

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateChauffeurRequest {
    #[validate(length(min = 2, max = 100))]
    pub nom: String,

    #[validate(length(min = 8, max = 20))]
    pub telephone: Option<String>,

    /// Cuenta utilisateur enlazada (login móvil del chauffeur)
    #[validate(range(min = 1))]
    pub user_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateChauffeurRequest {
    #[validate(length(min = 2, max = 100))]
    pub nom: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub telephone: Option<String>,

    #[validate(range(min = 1))]
    pub user_id: Option<i32>,
}
