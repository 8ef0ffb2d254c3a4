//! Routers de la API
//!
//! Un router por recurso, anidados bajo /api en main. Las rutas móviles
//! (wire format del cliente Flutter) viven en mobile_routes.

pub mod chauffeur_routes;
pub mod mobile_routes;
pub mod reservation_routes;
pub mod trajet_routes;
pub mod utilisateur_routes;
pub mod vehicule_routes;
pub mod voyage_routes;
