use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::reservation_dto::{
    CreateReservationWebRequest, ReservationResponse, TicketResponse, UpdateSiegesRequest,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reservation_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_reservation))
        .route("/", get(list_reservations))
        .route("/:id", get(get_reservation))
        .route("/:id", delete(delete_reservation))
        .route("/:id/sieges", put(update_sieges))
        .route("/:id/confirmer-paiement", post(confirmer_paiement))
        .route("/:id/annuler", post(annuler_reservation))
        .route("/:id/ticket", get(get_ticket))
}

async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationWebRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    let response = controller.create_web(request).await?;
    Ok(Json(response))
}

async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ReservationResponse>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_reservations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_sieges(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateSiegesRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    let response = controller.modifier_sieges(id, request).await?;
    Ok(Json(response))
}

async fn confirmer_paiement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    let response = controller.confirmer_paiement(id).await?;
    Ok(Json(response))
}

async fn annuler_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    let response = controller.annuler(id).await?;
    Ok(Json(response))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Réservation supprimée avec succès"
    })))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TicketResponse>, AppError> {
    let controller = ReservationController::new(state.pool.clone(), state.verifier.clone());
    let response = controller.ticket(id).await?;
    Ok(Json(response))
}
