//! Controllers del patrón MVC
//!
//! Orquestan repositorios y servicios por recurso; la lógica de admisión
//! vive en services::admission, no aquí.

pub mod chauffeur_controller;
pub mod reservation_controller;
pub mod trajet_controller;
pub mod utilisateur_controller;
pub mod vehicule_controller;
pub mod voyage_controller;
