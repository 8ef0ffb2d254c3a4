//! Servicios de dominio
//!
//! El motor de inventario de plazas (seat_inventory), el protocolo de
//! admisión de reservas (admission) y el verificador externo de pagos
//! (payment_verifier). La lógica de decisión es pura y se testea sin
//! base de datos; la persistencia atómica la aporta admission.

pub mod admission;
pub mod payment_verifier;
pub mod seat_inventory;
