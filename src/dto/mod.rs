//! DTOs de la API
//!
//! Requests validadas con `validator` y responses serializadas con serde.

pub mod chauffeur_dto;
pub mod reservation_dto;
pub mod trajet_dto;
pub mod utilisateur_dto;
pub mod vehicule_dto;
pub mod voyage_dto;

use serde::Serialize;

/// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
