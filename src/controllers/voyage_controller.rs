//! Controller de Voyage
//!
//! Todas las responses pasan por el mismo cálculo de inventario
//! (services::seat_inventory); el listado web, el detalle y los feeds
//! móviles no pueden divergir en plazas ni en estado.

use chrono::Local;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::voyage_dto::{
    CreateVoyageRequest, UpdateVoyageRequest, VoyageChauffeurResponse, VoyageMobileResponse,
    VoyageResponse,
};
use crate::dto::ApiResponse;
use crate::models::voyage::VoyageDetail;
use crate::repositories::reservation_repository;
use crate::repositories::voyage_repository::VoyageRepository;
use crate::services::seat_inventory::InventaireVoyage;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{validate_date, validate_time};

pub struct VoyageController {
    repository: VoyageRepository,
    pool: PgPool,
}

impl VoyageController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VoyageRepository::new(pool.clone()),
            pool,
        }
    }

    /// Inventario en vivo de un voyage: agregado compartido + estado derivado
    async fn inventaire(&self, voyage: &VoyageDetail) -> Result<InventaireVoyage, AppError> {
        let reserves =
            reservation_repository::sieges_reserves(&self.pool, voyage.id_voyage, None).await?;
        Ok(InventaireVoyage::calculer(
            Local::now().naive_local(),
            voyage.depart(),
            reserves,
            voyage.capacite,
        ))
    }

    pub async fn create(
        &self,
        request: CreateVoyageRequest,
    ) -> Result<ApiResponse<VoyageResponse>, AppError> {
        request.validate()?;

        let date_depart = validate_date(&request.date_depart)
            .map_err(|_| AppError::BadRequest("date_depart invalide (YYYY-MM-DD)".to_string()))?;
        let heure_depart = validate_time(&request.heure_depart)
            .map_err(|_| AppError::BadRequest("heure_depart invalide (HH:MM)".to_string()))?;

        if request.prix_par_siege.is_sign_negative() {
            return Err(AppError::BadRequest("prix_par_siege doit être positif".to_string()));
        }

        let voyage = self
            .repository
            .create(
                date_depart,
                heure_depart,
                request.prix_par_siege,
                request.id_trajet,
                request.id_vehicule,
                request.id_chauffeur,
            )
            .await?;

        let detail = self
            .repository
            .find_detail(voyage.id_voyage)
            .await?
            .ok_or_else(|| not_found_error("Voyage", voyage.id_voyage))?;
        let inventaire = self.inventaire(&detail).await?;

        Ok(ApiResponse::success_with_message(
            VoyageResponse::from_detail(&detail, inventaire),
            "Voyage ajouté avec succès".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<VoyageResponse, AppError> {
        let detail = self
            .repository
            .find_detail(id)
            .await?
            .ok_or_else(|| not_found_error("Voyage", id))?;
        let inventaire = self.inventaire(&detail).await?;

        Ok(VoyageResponse::from_detail(&detail, inventaire))
    }

    pub async fn list(&self) -> Result<Vec<VoyageResponse>, AppError> {
        let voyages = self.repository.find_all_detail().await?;

        let mut response = Vec::with_capacity(voyages.len());
        for detail in &voyages {
            let inventaire = self.inventaire(detail).await?;
            response.push(VoyageResponse::from_detail(detail, inventaire));
        }
        Ok(response)
    }

    /// Feed móvil: solo voyages futuros y OUVERT
    pub async fn mobile_feed(&self) -> Result<Vec<VoyageMobileResponse>, AppError> {
        let today = Local::now().date_naive();
        let voyages = self.repository.find_upcoming_detail(today).await?;

        let mut response = Vec::new();
        for detail in &voyages {
            let inventaire = self.inventaire(detail).await?;
            if inventaire.statut.est_ouvert() {
                response.push(VoyageMobileResponse::from_detail(detail, inventaire));
            }
        }
        Ok(response)
    }

    /// Voyages asignados al chauffeur enlazado a esta cuenta
    pub async fn chauffeur_feed(
        &self,
        user_id: i32,
    ) -> Result<Vec<VoyageChauffeurResponse>, AppError> {
        let voyages = self.repository.find_by_chauffeur_user(user_id).await?;

        let mut response = Vec::with_capacity(voyages.len());
        for detail in &voyages {
            let inventaire = self.inventaire(detail).await?;
            response.push(VoyageChauffeurResponse::from_detail(detail, inventaire));
        }
        Ok(response)
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateVoyageRequest,
    ) -> Result<ApiResponse<VoyageResponse>, AppError> {
        request.validate()?;

        let date_depart = match &request.date_depart {
            Some(raw) => Some(validate_date(raw).map_err(|_| {
                AppError::BadRequest("date_depart invalide (YYYY-MM-DD)".to_string())
            })?),
            None => None,
        };
        let heure_depart = match &request.heure_depart {
            Some(raw) => Some(validate_time(raw).map_err(|_| {
                AppError::BadRequest("heure_depart invalide (HH:MM)".to_string())
            })?),
            None => None,
        };

        let voyage = self
            .repository
            .update(
                id,
                date_depart,
                heure_depart,
                request.prix_par_siege,
                request.id_trajet,
                request.id_vehicule,
                request.id_chauffeur,
            )
            .await?;

        let detail = self
            .repository
            .find_detail(voyage.id_voyage)
            .await?
            .ok_or_else(|| not_found_error("Voyage", voyage.id_voyage))?;
        let inventaire = self.inventaire(&detail).await?;

        Ok(ApiResponse::success_with_message(
            VoyageResponse::from_detail(&detail, inventaire),
            "Voyage modifié avec succès".to_string(),
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
