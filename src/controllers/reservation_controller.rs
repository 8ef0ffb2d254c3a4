//! Controller de Reservation
//!
//! Traduce los requests HTTP (web staff y móvil) al protocolo de admisión
//! y enriquece las filas persistidas con los datos del voyage para las
//! responses. Toda decisión de plazas/estado vive en services::admission.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::reservation_dto::{
    CreateReservationMobileRequest, CreateReservationWebRequest, PaymentOptionItem,
    PaymentOptionsResponse, ReservationResponse, TicketResponse, UpdateSiegesRequest,
};
use crate::dto::ApiResponse;
use crate::models::reservation::{Demandeur, Reservation};
use crate::services::admission::{
    AdmissionService, CanalReservation, DemandeReservation, PreuvePaiement,
};
use crate::services::payment_verifier::PaymentVerifier;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::repositories::utilisateur_repository::UtilisateurRepository;
use crate::repositories::voyage_repository::VoyageRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::validate_phone;

pub struct ReservationController {
    admission: AdmissionService,
    reservations: ReservationRepository,
    voyages: VoyageRepository,
    utilisateurs: UtilisateurRepository,
    payments: PaymentRepository,
}

impl ReservationController {
    pub fn new(pool: PgPool, verifier: Arc<dyn PaymentVerifier>) -> Self {
        Self {
            admission: AdmissionService::new(pool.clone(), verifier),
            reservations: ReservationRepository::new(pool.clone()),
            voyages: VoyageRepository::new(pool.clone()),
            utilisateurs: UtilisateurRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool),
        }
    }

    /// Response enriquecida con los datos del voyage de la reserva
    async fn enrich(&self, reservation: &Reservation) -> Result<ReservationResponse, AppError> {
        let voyage = self
            .voyages
            .find_detail(reservation.id_voyage)
            .await?
            .ok_or_else(|| not_found_error("Voyage", reservation.id_voyage))?;

        Ok(ReservationResponse::from_models(reservation, &voyage))
    }

    /// Reserva creada por el staff web: confirmada y pagada de entrada
    /// (cobro en taquilla), a nombre de un cliente o de un invitado.
    pub async fn create_web(
        &self,
        request: CreateReservationWebRequest,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        request.validate()?;

        let demandeur = match (request.id_client, &request.autre_nom, &request.autre_tel) {
            (Some(id_client), _, _) => {
                self.utilisateurs
                    .find_by_id(id_client)
                    .await?
                    .ok_or_else(|| not_found_error("Utilisateur", id_client))?;
                Demandeur::Client { id_client }
            }
            (None, Some(nom), Some(tel)) => {
                validate_phone(tel).map_err(|_| {
                    AppError::BadRequest("autre_tel invalide (8 à 15 chiffres)".to_string())
                })?;
                Demandeur::Invite {
                    nom: nom.trim().to_string(),
                    telephone: tel.trim().to_string(),
                }
            }
            _ => {
                return Err(AppError::BadRequest(
                    "id_client ou (autre_nom + autre_tel) requis".to_string(),
                ));
            }
        };

        let reservation = self
            .admission
            .submit_reservation(DemandeReservation {
                id_voyage: request.id_voyage,
                nb_sieges: request.nb_sieges,
                demandeur,
                canal: CanalReservation::Web,
                preuve: None,
            })
            .await?;

        let response = self.enrich(&reservation).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Réservation enregistrée avec succès".to_string(),
        ))
    }

    /// Reserva creada desde la app móvil: entra en_attente, salvo que la
    /// preuve de pago adjunta quede verificada por el OCR.
    pub async fn create_mobile(
        &self,
        request: CreateReservationMobileRequest,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        request.validate()?;

        let utilisateur = self
            .utilisateurs
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| not_found_error("Utilisateur", request.user_id))?;
        if !utilisateur.is_active {
            return Err(AppError::Forbidden("Compte désactivé".to_string()));
        }

        let preuve = match &request.preuve_paiement_base64 {
            Some(raw) => {
                // acepta data-url ("data:image/jpeg;base64,....") o base64 pelado
                let payload = raw.rsplit(',').next().unwrap_or(raw);
                let image = BASE64.decode(payload.trim()).map_err(|_| {
                    AppError::BadRequest("preuve_paiement_base64 invalide".to_string())
                })?;
                Some(PreuvePaiement {
                    image,
                    reference: format!("preuves/{}.jpg", Uuid::new_v4().simple()),
                })
            }
            None => None,
        };

        let reservation = self
            .admission
            .submit_reservation(DemandeReservation {
                id_voyage: request.id_voyage,
                nb_sieges: request.nb_sieges,
                demandeur: Demandeur::Client {
                    id_client: request.user_id,
                },
                canal: CanalReservation::Mobile,
                preuve,
            })
            .await?;

        let response = self.enrich(&reservation).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Réservation enregistrée, en attente de confirmation".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ReservationResponse, AppError> {
        let reservation = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Reservation", id))?;

        self.enrich(&reservation).await
    }

    pub async fn list(&self) -> Result<Vec<ReservationResponse>, AppError> {
        let reservations = self.reservations.find_all().await?;

        let mut response = Vec::with_capacity(reservations.len());
        for reservation in &reservations {
            response.push(self.enrich(reservation).await?);
        }
        Ok(response)
    }

    /// Historial de reservas de un cliente (app móvil)
    pub async fn list_by_client(&self, id_client: i32) -> Result<Vec<ReservationResponse>, AppError> {
        let reservations = self.reservations.find_by_client(id_client).await?;

        let mut response = Vec::with_capacity(reservations.len());
        for reservation in &reservations {
            response.push(self.enrich(reservation).await?);
        }
        Ok(response)
    }

    pub async fn modifier_sieges(
        &self,
        id: i32,
        request: UpdateSiegesRequest,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        request.validate()?;

        let reservation = self.admission.modifier_sieges(id, request.nb_sieges).await?;
        let response = self.enrich(&reservation).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Nombre de sièges modifié".to_string(),
        ))
    }

    pub async fn confirmer_paiement(
        &self,
        id: i32,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        let reservation = self.admission.confirmer_paiement(id).await?;
        let response = self.enrich(&reservation).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Paiement confirmé".to_string(),
        ))
    }

    pub async fn annuler(&self, id: i32) -> Result<ApiResponse<ReservationResponse>, AppError> {
        let reservation = self.admission.annuler(id).await?;
        let response = self.enrich(&reservation).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Réservation annulée".to_string(),
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.reservations.delete(id).await
    }

    /// Datos del ticket imprimible. Solo existe para reservas confirmadas
    /// y pagadas; para el resto responde 403.
    pub async fn ticket(&self, id: i32) -> Result<TicketResponse, AppError> {
        let reservation = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Reservation", id))?;

        if !reservation.ticket_disponible() {
            return Err(AppError::Forbidden(
                "Ticket disponible uniquement pour les réservations confirmées et payées"
                    .to_string(),
            ));
        }

        let voyage = self
            .voyages
            .find_detail(reservation.id_voyage)
            .await?
            .ok_or_else(|| not_found_error("Voyage", reservation.id_voyage))?;

        let passager = match reservation.demandeur() {
            Some(Demandeur::Client { id_client }) => self
                .utilisateurs
                .find_by_id(id_client)
                .await?
                .map(|u| u.nom_complet())
                .unwrap_or_else(|| "-".to_string()),
            Some(Demandeur::Invite { nom, .. }) => nom,
            None => "-".to_string(),
        };

        Ok(TicketResponse::from_models(&reservation, &voyage, passager))
    }

    /// Canales de pago manual + contacto WhatsApp para la app móvil
    pub async fn payment_options(&self) -> Result<PaymentOptionsResponse, AppError> {
        let options = self.payments.find_active_options().await?;
        let contact = self.payments.find_contact().await?;

        Ok(PaymentOptionsResponse {
            whatsapp_number: contact.map(|c| c.whatsapp_number).unwrap_or_default(),
            options: options
                .into_iter()
                .map(|o| PaymentOptionItem {
                    code: o.code,
                    label: o.label,
                    phone_number: o.phone_number,
                })
                .collect(),
        })
    }
}
