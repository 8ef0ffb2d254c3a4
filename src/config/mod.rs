//! Configuración del proyecto
//!
//! Variables de entorno y configuración del sistema.

pub mod environment;

pub use environment::*;
