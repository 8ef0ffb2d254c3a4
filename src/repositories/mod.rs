//! Repositorios de acceso a datos
//!
//! Un repositorio por agregado. El agregado de plazas reservadas vive en
//! `reservation_repository::sieges_reserves` y es la única consulta que
//! lo calcula en todo el sistema.

pub mod chauffeur_repository;
pub mod payment_repository;
pub mod reservation_repository;
pub mod trajet_repository;
pub mod utilisateur_repository;
pub mod vehicule_repository;
pub mod voyage_repository;
