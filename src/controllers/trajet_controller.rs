//! Controller de Trajet

use sqlx::PgPool;
use validator::Validate;

use crate::dto::trajet_dto::{CreateTrajetRequest, UpdateTrajetRequest};
use crate::dto::ApiResponse;
use crate::models::trajet::Trajet;
use crate::repositories::trajet_repository::TrajetRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct TrajetController {
    repository: TrajetRepository,
}

impl TrajetController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TrajetRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateTrajetRequest,
    ) -> Result<ApiResponse<Trajet>, AppError> {
        request.validate()?;

        if request.distance_km.is_sign_negative() || request.distance_km.is_zero() {
            return Err(AppError::BadRequest(
                "distance_km doit être strictement positive".to_string(),
            ));
        }

        let trajet = self
            .repository
            .create(
                request.ville_depart.trim().to_string(),
                request.ville_arrivee.trim().to_string(),
                request.distance_km,
                request.duree_prevue_minutes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            trajet,
            "Trajet ajouté avec succès".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Trajet, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trajet", id))
    }

    pub async fn list(&self) -> Result<Vec<Trajet>, AppError> {
        self.repository.find_all().await
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateTrajetRequest,
    ) -> Result<ApiResponse<Trajet>, AppError> {
        request.validate()?;

        if let Some(distance) = request.distance_km {
            if distance.is_sign_negative() || distance.is_zero() {
                return Err(AppError::BadRequest(
                    "distance_km doit être strictement positive".to_string(),
                ));
            }
        }

        let trajet = self
            .repository
            .update(
                id,
                request.ville_depart,
                request.ville_arrivee,
                request.distance_km,
                request.duree_prevue_minutes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            trajet,
            "Trajet modifié avec succès".to_string(),
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
