use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};

use crate::controllers::utilisateur_controller::UtilisateurController;
use crate::dto::utilisateur_dto::{
    SearchUtilisateurQuery, SetActiveRequest, UpdateRoleRequest, UtilisateurResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_utilisateur_router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/search", get(search_utilisateurs))
        .route("/:id", get(get_utilisateur))
        .route("/:id/role", put(update_role))
        .route("/:id/active", put(set_active))
}

async fn get_utilisateur(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UtilisateurResponse>, AppError> {
    let controller = UtilisateurController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<UtilisateurResponse>>, AppError> {
    let controller = UtilisateurController::new(state.pool.clone());
    let response = controller.list_clients().await?;
    Ok(Json(response))
}

async fn search_utilisateurs(
    State(state): State<AppState>,
    Query(query): Query<SearchUtilisateurQuery>,
) -> Result<Json<Vec<UtilisateurResponse>>, AppError> {
    let controller = UtilisateurController::new(state.pool.clone());
    let response = controller.search(query).await?;
    Ok(Json(response))
}

async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<UtilisateurResponse>>, AppError> {
    let controller = UtilisateurController::new(state.pool.clone());
    let response = controller.update_role(id, request).await?;
    Ok(Json(response))
}

async fn set_active(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<ApiResponse<UtilisateurResponse>>, AppError> {
    let controller = UtilisateurController::new(state.pool.clone());
    let response = controller.set_active(id, request).await?;
    Ok(Json(response))
}
