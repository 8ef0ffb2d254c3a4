use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::chauffeur_controller::ChauffeurController;
use crate::dto::chauffeur_dto::{CreateChauffeurRequest, UpdateChauffeurRequest};
use crate::dto::ApiResponse;
use crate::models::chauffeur::Chauffeur;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_chauffeur_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_chauffeur))
        .route("/", get(list_chauffeurs))
        .route("/:id", get(get_chauffeur))
        .route("/:id", put(update_chauffeur))
        .route("/:id", delete(delete_chauffeur))
}

async fn create_chauffeur(
    State(state): State<AppState>,
    Json(request): Json<CreateChauffeurRequest>,
) -> Result<Json<ApiResponse<Chauffeur>>, AppError> {
    let controller = ChauffeurController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_chauffeur(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Chauffeur>, AppError> {
    let controller = ChauffeurController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_chauffeurs(State(state): State<AppState>) -> Result<Json<Vec<Chauffeur>>, AppError> {
    let controller = ChauffeurController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_chauffeur(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateChauffeurRequest>,
) -> Result<Json<ApiResponse<Chauffeur>>, AppError> {
    let controller = ChauffeurController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_chauffeur(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ChauffeurController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Chauffeur supprimé avec succès"
    })))
}
