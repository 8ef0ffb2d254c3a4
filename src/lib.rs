//! SGT Backend - Gestion des voyages et réservations de places
//!
//! Backend MVC de la société de transport: registro de trajets, véhicules
//! y chauffeurs, programación de voyages y el motor de inventario de
//! plazas con su protocolo de admisión de reservas. Sirve el panel web
//! del staff y la app móvil Flutter.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

/// Ensamblar el router completo de la aplicación
pub fn build_router(state: AppState) -> Router {
    let cors = if state.config.is_production() && !state.config.cors_origins.is_empty() {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/trajet", routes::trajet_routes::create_trajet_router())
        .nest("/api/vehicule", routes::vehicule_routes::create_vehicule_router())
        .nest("/api/chauffeur", routes::chauffeur_routes::create_chauffeur_router())
        .nest("/api/voyage", routes::voyage_routes::create_voyage_router())
        .nest("/api/reservation", routes::reservation_routes::create_reservation_router())
        .nest("/api/utilisateur", routes::utilisateur_routes::create_utilisateur_router())
        .nest("/api/mobile", routes::mobile_routes::create_mobile_router())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "SGT Backend opérationnel",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
