//! DTOs de Reservation

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::reservation::Reservation;
use crate::models::voyage::VoyageDetail;

/// Request staff (web): o un cliente identificado o un contacto invitado
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationWebRequest {
    #[validate(range(min = 1))]
    pub id_voyage: i32,

    #[validate(range(min = 1, message = "nb_sieges doit être positif"))]
    pub nb_sieges: i32,

    /// Cliente registrado; si falta, hacen falta autre_nom + autre_tel
    pub id_client: Option<i32>,

    #[validate(length(min = 2, max = 100))]
    pub autre_nom: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub autre_tel: Option<String>,
}

/// Request móvil (cliente autenticado en la app Flutter)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationMobileRequest {
    #[validate(range(min = 1))]
    pub user_id: i32,

    #[validate(range(min = 1))]
    pub id_voyage: i32,

    #[validate(range(min = 1, message = "nb_sieges doit être positif"))]
    pub nb_sieges: i32,

    /// Preuve de pago opcional, imagen en base64 (con o sin prefijo data-url)
    pub preuve_paiement_base64: Option<String>,
}

/// Request para editar el número de plazas
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSiegesRequest {
    #[validate(range(min = 1, message = "nb_sieges doit être positif"))]
    pub nb_sieges: i32,
}

/// Response de reserva, compartida por web y móvil
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id_reservation: i32,
    pub id_voyage: i32,
    pub trajet: String,
    pub date_depart: String,
    pub heure_depart: String,
    pub id_client: Option<i32>,
    pub autre_nom: Option<String>,
    pub autre_tel: Option<String>,
    pub nb_sieges: i32,
    pub statut: String,
    pub paye: bool,
    pub prix_unitaire: String,
    pub montant_total: String,
    pub transaction_id: Option<String>,
    pub preuve_paiement: Option<String>,
    pub ticket_ready: bool,
    pub date_reservation: String,
}

impl ReservationResponse {
    pub fn from_models(reservation: &Reservation, voyage: &VoyageDetail) -> Self {
        Self {
            id_reservation: reservation.id_reservation,
            id_voyage: reservation.id_voyage,
            trajet: voyage.trajet_libelle(),
            date_depart: voyage.date_depart.format("%Y-%m-%d").to_string(),
            heure_depart: voyage.heure_depart.format("%H:%M").to_string(),
            id_client: reservation.id_client,
            autre_nom: reservation.autre_nom.clone(),
            autre_tel: reservation.autre_tel.clone(),
            nb_sieges: reservation.nb_sieges,
            statut: reservation.statut.clone(),
            paye: reservation.paye,
            prix_unitaire: voyage.prix_par_siege.to_string(),
            montant_total: reservation.montant_total(voyage.prix_par_siege).to_string(),
            transaction_id: reservation.transaction_id.clone(),
            preuve_paiement: reservation.preuve_paiement.clone(),
            ticket_ready: reservation.ticket_disponible(),
            date_reservation: reservation.date_reservation.to_rfc3339(),
        }
    }
}

/// Datos estables que consume el renderer externo de tickets PDF.
/// Solo existe para reservas confirme + paye; una vez confirmada, estos
/// campos no cambian.
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub reference: String,
    pub trajet: String,
    pub ville_depart: String,
    pub ville_arrivee: String,
    pub date_depart: String,
    pub heure_depart: String,
    pub passager: String,
    pub nb_sieges: i32,
    pub prix_unitaire: String,
    pub montant_total: String,
    pub transaction_id: Option<String>,
    pub date_reservation: String,
}

impl TicketResponse {
    pub fn from_models(reservation: &Reservation, voyage: &VoyageDetail, passager: String) -> Self {
        // referencia imprimible: #<id><fecha de salida compacta>
        let reference = format!(
            "#{}{}",
            reservation.id_reservation,
            voyage.date_depart.format("%Y%m%d")
        );
        Self {
            reference,
            trajet: voyage.trajet_libelle(),
            ville_depart: voyage.ville_depart.clone(),
            ville_arrivee: voyage.ville_arrivee.clone(),
            date_depart: voyage.date_depart.format("%Y-%m-%d").to_string(),
            heure_depart: voyage.heure_depart.format("%H:%M").to_string(),
            passager,
            nb_sieges: reservation.nb_sieges,
            prix_unitaire: voyage.prix_par_siege.to_string(),
            montant_total: reservation.montant_total(voyage.prix_par_siege).to_string(),
            transaction_id: reservation.transaction_id.clone(),
            date_reservation: reservation.date_reservation.to_rfc3339(),
        }
    }
}

/// Canales de pago manual expuestos a la app móvil
#[derive(Debug, Serialize)]
pub struct PaymentOptionsResponse {
    pub whatsapp_number: String,
    pub options: Vec<PaymentOptionItem>,
}

#[derive(Debug, Serialize)]
pub struct PaymentOptionItem {
    pub code: String,
    pub label: String,
    pub phone_number: String,
}
