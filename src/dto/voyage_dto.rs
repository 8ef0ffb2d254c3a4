//! DTOs de Voyage
//!
//! Las responses llevan siempre sieges_reserves / sieges_disponibles /
//! statut calculados por el motor de inventario: ningún consumidor
//! recalcula el agregado por su cuenta.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::voyage::VoyageDetail;
use crate::services::seat_inventory::InventaireVoyage;

/// Request para programar un voyage
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVoyageRequest {
    /// Formato YYYY-MM-DD
    pub date_depart: String,

    /// Formato HH:MM o HH:MM:SS
    pub heure_depart: String,

    pub prix_par_siege: Decimal,

    #[validate(range(min = 1))]
    pub id_trajet: i32,

    #[validate(range(min = 1))]
    pub id_vehicule: i32,

    #[validate(range(min = 1))]
    pub id_chauffeur: i32,
}

/// Request para modificar un voyage existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVoyageRequest {
    pub date_depart: Option<String>,
    pub heure_depart: Option<String>,
    pub prix_par_siege: Option<Decimal>,
    pub id_trajet: Option<i32>,
    pub id_vehicule: Option<i32>,
    pub id_chauffeur: Option<i32>,
}

/// Response de voyage para el listado web y el detalle
#[derive(Debug, Serialize)]
pub struct VoyageResponse {
    pub id_voyage: i32,
    pub trajet: String,
    pub ville_depart: String,
    pub ville_arrivee: String,
    pub date_depart: String,
    pub heure_depart: String,
    pub prix_par_siege: String,
    pub vehicule_matricule: String,
    pub chauffeur: String,
    pub capacite: i32,
    pub sieges_reserves: i32,
    pub sieges_disponibles: i32,
    pub statut: String,
}

impl VoyageResponse {
    pub fn from_detail(voyage: &VoyageDetail, inventaire: InventaireVoyage) -> Self {
        Self {
            id_voyage: voyage.id_voyage,
            trajet: voyage.trajet_libelle(),
            ville_depart: voyage.ville_depart.clone(),
            ville_arrivee: voyage.ville_arrivee.clone(),
            date_depart: voyage.date_depart.format("%Y-%m-%d").to_string(),
            heure_depart: voyage.heure_depart.format("%H:%M").to_string(),
            prix_par_siege: voyage.prix_par_siege.to_string(),
            vehicule_matricule: voyage.matricule.clone(),
            chauffeur: voyage.chauffeur_nom.clone(),
            capacite: inventaire.capacite,
            sieges_reserves: inventaire.sieges_reserves,
            sieges_disponibles: inventaire.sieges_disponibles,
            statut: inventaire.statut.as_str().to_string(),
        }
    }
}

/// Response compacta del feed móvil (wire format del cliente Flutter)
#[derive(Debug, Serialize)]
pub struct VoyageMobileResponse {
    pub id: i32,
    pub trajet: String,
    pub prix_par_siege: String,
    pub date: String,
    pub heure: String,
    pub places_dispo: i32,
    pub statut: String,
}

impl VoyageMobileResponse {
    pub fn from_detail(voyage: &VoyageDetail, inventaire: InventaireVoyage) -> Self {
        Self {
            id: voyage.id_voyage,
            trajet: voyage.trajet_libelle(),
            prix_par_siege: voyage.prix_par_siege.to_string(),
            date: voyage.date_depart.format("%Y-%m-%d").to_string(),
            heure: voyage.heure_depart.format("%H:%M").to_string(),
            places_dispo: inventaire.sieges_disponibles,
            statut: inventaire.statut.as_str().to_string(),
        }
    }
}

/// Voyage asignado, vista del chauffeur móvil
#[derive(Debug, Serialize)]
pub struct VoyageChauffeurResponse {
    pub id_voyage: i32,
    pub ville_depart: String,
    pub ville_arrivee: String,
    pub date_depart: String,
    pub heure_depart: String,
    pub vehicule_matricule: String,
    pub statut: String,
}

impl VoyageChauffeurResponse {
    pub fn from_detail(voyage: &VoyageDetail, inventaire: InventaireVoyage) -> Self {
        Self {
            id_voyage: voyage.id_voyage,
            ville_depart: voyage.ville_depart.clone(),
            ville_arrivee: voyage.ville_arrivee.clone(),
            date_depart: voyage.date_depart.format("%Y-%m-%d").to_string(),
            heure_depart: voyage.heure_depart.format("%H:%M").to_string(),
            vehicule_matricule: voyage.matricule.clone(),
            statut: inventaire.statut.as_str().to_string(),
        }
    }
}
