//! Rutas móviles (app Flutter)
//!
//! Wire format estable consumido por el cliente móvil: los nombres de
//! campos (places_dispo, statut OUVERT/FERMÉ_*) no se cambian sin
//! coordinar con la app.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::reservation_controller::ReservationController;
use crate::controllers::voyage_controller::VoyageController;
use crate::dto::reservation_dto::{
    CreateReservationMobileRequest, PaymentOptionsResponse, ReservationResponse,
};
use crate::dto::voyage_dto::{VoyageChauffeurResponse, VoyageMobileResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_mobile_router() -> Router<AppState> {
    Router::new()
        .route("/voyages", get(list_voyages_mobile))
        .route("/reservations", post(create_reservation_mobile))
        .route("/reservations/:user_id", get(list_reservations_client))
        .route("/payment-options", get(get_payment_options))
        .route("/chauffeur/:user_id/voyages", get(list_voyages_chauffeur))
}

/// Voyages futuros y abiertos a reserva
async fn list_voyages_mobile(
    State(state): State<AppState>,
) -> Result<Json<Vec<VoyageMobileResponse>>, AppError> {
    let controller = VoyageController::new(state.pool.clone());
    let response = controller.mobile_feed().await?;
    Ok(Json(response))
}

async fn create_reservation_mobile(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationMobileRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    let response = controller.create_mobile(request).await?;
    Ok(Json(response))
}

/// Historial de reservas del cliente autenticado
async fn list_reservations_client(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    let response = controller.list_by_client(user_id).await?;
    Ok(Json(response))
}

async fn get_payment_options(
    State(state): State<AppState>,
) -> Result<Json<PaymentOptionsResponse>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    let response = controller.payment_options().await?;
    Ok(Json(response))
}

/// Voyages asignados al chauffeur enlazado a esta cuenta
async fn list_voyages_chauffeur(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<VoyageChauffeurResponse>>, AppError> {
    let controller = VoyageController::new(state.pool.clone());
    let response = controller.chauffeur_feed(user_id).await?;
    Ok(Json(response))
}
