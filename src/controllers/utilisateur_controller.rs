//! Controller de Utilisateur
//!
//! Gestión de cuentas por el staff: listados, búsqueda, rol y activación.
//! El cambio de rol mantiene la tabla chauffeur sincronizada: dar el rol
//! CHAUFFEUR crea (o re-enlaza) la ficha, quitarlo la desenlaza sin
//! borrarla (conserva el historial de voyages conducidos).

use sqlx::PgPool;
use validator::Validate;

use crate::dto::utilisateur_dto::{SearchUtilisateurQuery, SetActiveRequest, UpdateRoleRequest, UtilisateurResponse};
use crate::dto::ApiResponse;
use crate::models::utilisateur::Role;
use crate::repositories::chauffeur_repository::ChauffeurRepository;
use crate::repositories::utilisateur_repository::UtilisateurRepository;
use crate::utils::errors::{not_found_error, AppError};

const SEARCH_LIMIT_DEFAULT: i64 = 20;

pub struct UtilisateurController {
    repository: UtilisateurRepository,
    chauffeurs: ChauffeurRepository,
}

impl UtilisateurController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UtilisateurRepository::new(pool.clone()),
            chauffeurs: ChauffeurRepository::new(pool),
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<UtilisateurResponse, AppError> {
        let utilisateur = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Utilisateur", id))?;

        Ok(UtilisateurResponse::from_model(&utilisateur))
    }

    /// Clientes registrados (selector del formulario de reserva web)
    pub async fn list_clients(&self) -> Result<Vec<UtilisateurResponse>, AppError> {
        let clients = self.repository.find_clients().await?;
        Ok(clients.iter().map(UtilisateurResponse::from_model).collect())
    }

    pub async fn search(
        &self,
        query: SearchUtilisateurQuery,
    ) -> Result<Vec<UtilisateurResponse>, AppError> {
        query.validate()?;

        let limit = query.limit.unwrap_or(SEARCH_LIMIT_DEFAULT);
        let utilisateurs = self.repository.search_by_username(&query.q, limit).await?;
        Ok(utilisateurs
            .iter()
            .map(UtilisateurResponse::from_model)
            .collect())
    }

    pub async fn update_role(
        &self,
        id: i32,
        request: UpdateRoleRequest,
    ) -> Result<ApiResponse<UtilisateurResponse>, AppError> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Utilisateur", id))?;

        let utilisateur = self.repository.update_role(id, request.role).await?;

        match request.role {
            Role::Chauffeur => {
                if self.chauffeurs.find_by_user(id).await?.is_none() {
                    self.chauffeurs
                        .create(
                            current.nom_complet(),
                            current.telephone.clone(),
                            Some(id),
                        )
                        .await?;
                    tracing::info!("🚌 Ficha chauffeur creada para la cuenta #{}", id);
                }
            }
            _ => {
                if current.role() == Some(Role::Chauffeur) {
                    self.chauffeurs.unlink_user(id).await?;
                }
            }
        }

        Ok(ApiResponse::success_with_message(
            UtilisateurResponse::from_model(&utilisateur),
            "Rôle mis à jour".to_string(),
        ))
    }

    pub async fn set_active(
        &self,
        id: i32,
        request: SetActiveRequest,
    ) -> Result<ApiResponse<UtilisateurResponse>, AppError> {
        let utilisateur = self.repository.set_active(id, request.is_active).await?;

        Ok(ApiResponse::success_with_message(
            UtilisateurResponse::from_model(&utilisateur),
            if request.is_active {
                "Compte activé".to_string()
            } else {
                "Compte désactivé".to_string()
            },
        ))
    }
}
