use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::trajet_controller::TrajetController;
use crate::dto::trajet_dto::{CreateTrajetRequest, UpdateTrajetRequest};
use crate::dto::ApiResponse;
use crate::models::trajet::Trajet;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trajet_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trajet))
        .route("/", get(list_trajets))
        .route("/:id", get(get_trajet))
        .route("/:id", put(update_trajet))
        .route("/:id", delete(delete_trajet))
}

async fn create_trajet(
    State(state): State<AppState>,
    Json(request): Json<CreateTrajetRequest>,
) -> Result<Json<ApiResponse<Trajet>>, AppError> {
    let controller = TrajetController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_trajet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Trajet>, AppError> {
    let controller = TrajetController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_trajets(State(state): State<AppState>) -> Result<Json<Vec<Trajet>>, AppError> {
    let controller = TrajetController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_trajet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateTrajetRequest>,
) -> Result<Json<ApiResponse<Trajet>>, AppError> {
    let controller = TrajetController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_trajet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TrajetController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Trajet supprimé avec succès"
    })))
}
