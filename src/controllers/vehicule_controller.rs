//! Controller de Vehicule
//!
//! La capacité del vehículo es el techo de plazas que el motor de
//! inventario aplica a cada voyage: capacite <= 0 se rechaza aquí y en el
//! CHECK de la tabla.

use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::vehicule_dto::{CreateVehiculeRequest, UpdateVehiculeRequest};
use crate::dto::ApiResponse;
use crate::models::vehicule::Vehicule;
use crate::repositories::vehicule_repository::VehiculeRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};

pub struct VehiculeController {
    repository: VehiculeRepository,
}

impl VehiculeController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehiculeRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehiculeRequest,
    ) -> Result<ApiResponse<Vehicule>, AppError> {
        request.validate()?;

        let matricule = request.matricule.trim().to_uppercase();
        if self.repository.matricule_exists(&matricule).await? {
            return Err(conflict_error("Vehicule", "matricule", &matricule));
        }

        let vehicule = self
            .repository
            .create(
                matricule,
                request.capacite,
                request.type_vehicule.trim().to_string(),
                request.kilometrage_total.unwrap_or(Decimal::ZERO),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicule,
            "Véhicule ajouté avec succès".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Vehicule, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicule", id))
    }

    pub async fn list(&self) -> Result<Vec<Vehicule>, AppError> {
        self.repository.find_all().await
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateVehiculeRequest,
    ) -> Result<ApiResponse<Vehicule>, AppError> {
        request.validate()?;

        let matricule = match request.matricule {
            Some(raw) => {
                let matricule = raw.trim().to_uppercase();
                let current = self
                    .repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| not_found_error("Vehicule", id))?;
                if matricule != current.matricule
                    && self.repository.matricule_exists(&matricule).await?
                {
                    return Err(conflict_error("Vehicule", "matricule", &matricule));
                }
                Some(matricule)
            }
            None => None,
        };

        let vehicule = self
            .repository
            .update(
                id,
                matricule,
                request.capacite,
                request.type_vehicule,
                request.kilometrage_total,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicule,
            "Véhicule modifié avec succès".to_string(),
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
