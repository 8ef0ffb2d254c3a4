//! Controller de Chauffeur

use sqlx::PgPool;
use validator::Validate;

use crate::dto::chauffeur_dto::{CreateChauffeurRequest, UpdateChauffeurRequest};
use crate::dto::ApiResponse;
use crate::models::chauffeur::Chauffeur;
use crate::repositories::chauffeur_repository::ChauffeurRepository;
use crate::repositories::utilisateur_repository::UtilisateurRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct ChauffeurController {
    repository: ChauffeurRepository,
    utilisateurs: UtilisateurRepository,
}

impl ChauffeurController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ChauffeurRepository::new(pool.clone()),
            utilisateurs: UtilisateurRepository::new(pool),
        }
    }

    /// La cuenta enlazada debe existir; el UNIQUE de chauffeur.user_id
    /// impide enlazar la misma cuenta a dos chauffeurs.
    async fn check_user(&self, user_id: Option<i32>) -> Result<(), AppError> {
        if let Some(user_id) = user_id {
            self.utilisateurs
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| not_found_error("Utilisateur", user_id))?;
        }
        Ok(())
    }

    pub async fn create(
        &self,
        request: CreateChauffeurRequest,
    ) -> Result<ApiResponse<Chauffeur>, AppError> {
        request.validate()?;
        self.check_user(request.user_id).await?;

        let chauffeur = self
            .repository
            .create(
                request.nom.trim().to_string(),
                request.telephone,
                request.user_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            chauffeur,
            "Chauffeur ajouté avec succès".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Chauffeur, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Chauffeur", id))
    }

    pub async fn list(&self) -> Result<Vec<Chauffeur>, AppError> {
        self.repository.find_all().await
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateChauffeurRequest,
    ) -> Result<ApiResponse<Chauffeur>, AppError> {
        request.validate()?;
        self.check_user(request.user_id).await?;

        let chauffeur = self
            .repository
            .update(id, request.nom, request.telephone, request.user_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            chauffeur,
            "Chauffeur modifié avec succès".to_string(),
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
