//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod chauffeur;
pub mod payment;
pub mod reservation;
pub mod trajet;
pub mod utilisateur;
pub mod vehicule;
pub mod voyage;
