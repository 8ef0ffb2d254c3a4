use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::voyage_controller::VoyageController;
use crate::dto::voyage_dto::{CreateVoyageRequest, UpdateVoyageRequest, VoyageResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_voyage_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_voyage))
        .route("/", get(list_voyages))
        .route("/:id", get(get_voyage))
        .route("/:id", put(update_voyage))
        .route("/:id", delete(delete_voyage))
}

async fn create_voyage(
    State(state): State<AppState>,
    Json(request): Json<CreateVoyageRequest>,
) -> Result<Json<ApiResponse<VoyageResponse>>, AppError> {
    let controller = VoyageController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_voyage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VoyageResponse>, AppError> {
    let controller = VoyageController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_voyages(
    State(state): State<AppState>,
) -> Result<Json<Vec<VoyageResponse>>, AppError> {
    let controller = VoyageController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_voyage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateVoyageRequest>,
) -> Result<Json<ApiResponse<VoyageResponse>>, AppError> {
    let controller = VoyageController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_voyage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VoyageController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Voyage supprimé avec succès"
    })))
}
