//! DTOs de Vehicule

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehiculeRequest {
    #[validate(length(min = 2, max = 20))]
    pub matricule: String,

    /// La capacité fija el techo de plazas de cada voyage del vehículo
    #[validate(range(min = 1, message = "capacite doit être positive"))]
    pub capacite: i32,

    #[validate(length(min = 2, max = 50))]
    pub type_vehicule: String,

    pub kilometrage_total: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehiculeRequest {
    #[validate(length(min = 2, max = 20))]
    pub matricule: Option<String>,

    #[validate(range(min = 1, message = "capacite doit être positive"))]
    pub capacite: Option<i32>,

    #[validate(length(min = 2, max = 50))]
    pub type_vehicule: Option<String>,

    pub kilometrage_total: Option<Decimal>,
}
