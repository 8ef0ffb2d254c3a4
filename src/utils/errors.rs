//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.
//!
//! Los errores de admisión (voyage cerrado, completo, pago no verificado,
//! transacción duplicada) son condiciones esperadas: se devuelven tal cual
//! al cliente con un código estable, nunca se degradan en silencio.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// El voyage sale en menos de 30 minutos (o ya salió)
    #[error("Voyage fermé (temps écoulé)")]
    VoyageFermeTemps,

    /// No quedan suficientes plazas; lleva las plazas restantes reales
    #[error("Voyage complet, places restantes: {restantes}")]
    VoyageComplet { restantes: i32 },

    /// Reserva móvil con preuve de pago no verificada por el OCR externo
    #[error("Preuve de paiement non vérifiée")]
    PaymentUnverified,

    /// transaction_id ya usado por otra reserva
    #[error("Transaction déjà utilisée: {transaction_id}")]
    TransactionDupliquee { transaction_id: String },

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                tracing::warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        error: "Forbidden".to_string(),
                        message: msg,
                        details: None,
                        code: Some("FORBIDDEN".to_string()),
                    },
                )
            }

            AppError::VoyageFermeTemps => {
                tracing::info!("Reserva rechazada: voyage cerrado por tiempo");
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Voyage Fermé".to_string(),
                        message: "Voyage fermé (moins de 30 minutes restantes)".to_string(),
                        details: None,
                        code: Some("VOYAGE_CLOSED_TIME".to_string()),
                    },
                )
            }

            AppError::VoyageComplet { restantes } => {
                tracing::info!("Reserva rechazada: voyage completo, restantes={}", restantes);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Voyage Complet".to_string(),
                        message: format!("Complet! Places restantes: {}", restantes),
                        details: Some(json!({ "places_restantes": restantes })),
                        code: Some("VOYAGE_FULL".to_string()),
                    },
                )
            }

            AppError::PaymentUnverified => {
                tracing::info!("Reserva rechazada: preuve de pago no verificada");
                (
                    StatusCode::PAYMENT_REQUIRED,
                    ErrorResponse {
                        error: "Payment Unverified".to_string(),
                        message: "La preuve de paiement n'a pas pu être vérifiée".to_string(),
                        details: None,
                        code: Some("PAYMENT_UNVERIFIED".to_string()),
                    },
                )
            }

            AppError::TransactionDupliquee { transaction_id } => {
                tracing::warn!("Transaction duplicada: {}", transaction_id);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Duplicate Transaction".to_string(),
                        message: "Cette transaction est déjà associée à une autre réservation"
                            .to_string(),
                        details: Some(json!({ "transaction_id": transaction_id })),
                        code: Some("DUPLICATE_TRANSACTION".to_string()),
                    },
                )
            }

            AppError::ExternalApi(msg) => {
                tracing::error!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "External API Error".to_string(),
                        message: "An error occurred while communicating with external service"
                            .to_string(),
                        details: Some(json!({ "external_api_error": msg })),
                        code: Some("EXTERNAL_API_ERROR".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}
