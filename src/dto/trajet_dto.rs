//! DTOs de Trajet

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrajetRequest {
    #[validate(length(min = 2, max = 100))]
    pub ville_depart: String,

    #[validate(length(min = 2, max = 100))]
    pub ville_arrivee: String,

    pub distance_km: Decimal,

    #[validate(range(min = 1))]
    pub duree_prevue_minutes: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTrajetRequest {
    #[validate(length(min = 2, max = 100))]
    pub ville_depart: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub ville_arrivee: Option<String>,

    pub distance_km: Option<Decimal>,

    #[validate(range(min = 1))]
    pub duree_prevue_minutes: Option<i32>,
}
