//! Modelo de Utilisateur
//!
//! Identidad mínima consumida por las reservas y los chauffeurs.
//! La autenticación (passwords, tokens) es un colaborador externo:
//! aquí solo se gestionan identidad, rol y estado de la cuenta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Roles de cuenta. El conjunto incluye CHAUFFEUR: el login móvil ya
/// admite chauffeurs, así que el cambio de rol también debe admitirlo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Agent,
    Client,
    Superviseur,
    Chauffeur,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Agent => "AGENT",
            Role::Client => "CLIENT",
            Role::Superviseur => "SUPERVISEUR",
            Role::Chauffeur => "CHAUFFEUR",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "AGENT" => Some(Role::Agent),
            "CLIENT" => Some(Role::Client),
            "SUPERVISEUR" => Some(Role::Superviseur),
            "CHAUFFEUR" => Some(Role::Chauffeur),
            _ => None,
        }
    }
}

/// Utilisateur principal - mapea exactamente a la tabla utilisateur
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Utilisateur {
    pub id: i32,
    pub username: String,
    pub nom: String,
    pub prenom: String,
    pub telephone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl Utilisateur {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// Nombre mostrado en tickets y listados
    pub fn nom_complet(&self) -> String {
        let complet = format!("{} {}", self.prenom, self.nom);
        let complet = complet.trim();
        if complet.is_empty() {
            self.username.clone()
        } else {
            complet.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in ["ADMIN", "AGENT", "CLIENT", "SUPERVISEUR", "CHAUFFEUR"] {
            assert_eq!(Role::parse(role).unwrap().as_str(), role);
        }
        assert!(Role::parse("STAFF").is_none());
    }
}
