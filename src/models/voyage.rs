//! Modelo de Voyage
//!
//! Un voyage es una salida programada: un trajet, un vehículo y un
//! chauffeur en una fecha/hora con un precio por plaza. Las plazas
//! reservadas/disponibles y el estado NUNCA se almacenan: se derivan en
//! cada lectura con el motor de inventario (services::seat_inventory)
//! para evitar estados obsoletos.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estado derivado de un voyage. Nunca persiste en la base de datos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoyageStatut {
    #[serde(rename = "OUVERT")]
    Ouvert,
    #[serde(rename = "FERMÉ_COMPLET")]
    FermeComplet,
    #[serde(rename = "FERMÉ_TEMPS")]
    FermeTemps,
}

impl VoyageStatut {
    /// Etiqueta en el wire format que consume el cliente Flutter existente
    pub fn as_str(&self) -> &'static str {
        match self {
            VoyageStatut::Ouvert => "OUVERT",
            VoyageStatut::FermeComplet => "FERMÉ_COMPLET",
            VoyageStatut::FermeTemps => "FERMÉ_TEMPS",
        }
    }

    pub fn est_ouvert(&self) -> bool {
        matches!(self, VoyageStatut::Ouvert)
    }
}

/// Voyage principal - mapea exactamente a la tabla voyage
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Voyage {
    pub id_voyage: i32,
    pub date_depart: NaiveDate,
    pub heure_depart: NaiveTime,
    pub prix_par_siege: Decimal,
    pub id_trajet: i32,
    pub id_vehicule: i32,
    pub id_chauffeur: i32,
}

impl Voyage {
    /// Fecha y hora de salida combinadas, base de la regla de cierre
    pub fn depart(&self) -> NaiveDateTime {
        self.date_depart.and_time(self.heure_depart)
    }
}

/// Voyage con sus referencias resueltas (JOIN trajet/vehicule/chauffeur).
/// Es la fila que cargan los listados, el feed móvil y el check de admisión;
/// todos derivan plazas y estado del mismo agregado compartido.
#[derive(Debug, Clone, FromRow)]
pub struct VoyageDetail {
    pub id_voyage: i32,
    pub date_depart: NaiveDate,
    pub heure_depart: NaiveTime,
    pub prix_par_siege: Decimal,
    pub id_trajet: i32,
    pub ville_depart: String,
    pub ville_arrivee: String,
    pub id_vehicule: i32,
    pub matricule: String,
    pub capacite: i32,
    pub id_chauffeur: i32,
    pub chauffeur_nom: String,
}

impl VoyageDetail {
    pub fn depart(&self) -> NaiveDateTime {
        self.date_depart.and_time(self.heure_depart)
    }

    pub fn trajet_libelle(&self) -> String {
        format!("{} -> {}", self.ville_depart, self.ville_arrivee)
    }
}
