use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::vehicule_controller::VehiculeController;
use crate::dto::vehicule_dto::{CreateVehiculeRequest, UpdateVehiculeRequest};
use crate::dto::ApiResponse;
use crate::models::vehicule::Vehicule;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicule_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicule))
        .route("/", get(list_vehicules))
        .route("/:id", get(get_vehicule))
        .route("/:id", put(update_vehicule))
        .route("/:id", delete(delete_vehicule))
}

async fn create_vehicule(
    State(state): State<AppState>,
    Json(request): Json<CreateVehiculeRequest>,
) -> Result<Json<ApiResponse<Vehicule>>, AppError> {
    let controller = VehiculeController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_vehicule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vehicule>, AppError> {
    let controller = VehiculeController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_vehicules(State(state): State<AppState>) -> Result<Json<Vec<Vehicule>>, AppError> {
    let controller = VehiculeController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_vehicule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateVehiculeRequest>,
) -> Result<Json<ApiResponse<Vehicule>>, AppError> {
    let controller = VehiculeController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehiculeController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Véhicule supprimé avec succès"
    })))
}
