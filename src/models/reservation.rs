//! Modelo de Reservation
//!
//! Estado explícito en tres valores (en_attente / confirme / annule) más
//! un booleano `paye` ortogonal. El "payé" del sistema legacy era un
//! sinónimo redundante de confirme+paye y queda colapsado aquí.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estado del ciclo de vida de una reserva.
///
/// Transiciones permitidas:
/// - en_attente -> confirme (staff confirma el pago, o el OCR verifica)
/// - en_attente -> annule
/// - confirme   -> annule
/// - annule es terminal: no hay vuelta atrás.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatut {
    EnAttente,
    Confirme,
    Annule,
}

impl ReservationStatut {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatut::EnAttente => "en_attente",
            ReservationStatut::Confirme => "confirme",
            ReservationStatut::Annule => "annule",
        }
    }

    pub fn parse(value: &str) -> Option<ReservationStatut> {
        match value {
            "en_attente" => Some(ReservationStatut::EnAttente),
            "confirme" => Some(ReservationStatut::Confirme),
            "annule" => Some(ReservationStatut::Annule),
            _ => None,
        }
    }
}

/// Quién reserva: un cliente identificado o un invitado con contacto
/// libre. Union etiquetada, no dos columnas nullable que mantener
/// coherentes a mano en el código.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Demandeur {
    Client { id_client: i32 },
    Invite { nom: String, telephone: String },
}

impl Demandeur {
    /// Reconstruir desde las columnas nullable de la tabla reservation
    pub fn from_colonnes(
        id_client: Option<i32>,
        autre_nom: Option<String>,
        autre_tel: Option<String>,
    ) -> Option<Demandeur> {
        match (id_client, autre_nom, autre_tel) {
            (Some(id), _, _) => Some(Demandeur::Client { id_client: id }),
            (None, Some(nom), Some(tel)) => Some(Demandeur::Invite { nom, telephone: tel }),
            _ => None,
        }
    }

    pub fn id_client(&self) -> Option<i32> {
        match self {
            Demandeur::Client { id_client } => Some(*id_client),
            Demandeur::Invite { .. } => None,
        }
    }
}

/// Reservation principal - mapea exactamente a la tabla reservation
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id_reservation: i32,
    pub id_voyage: i32,
    pub id_client: Option<i32>,
    pub autre_nom: Option<String>,
    pub autre_tel: Option<String>,
    pub nb_sieges: i32,
    pub statut: String,
    pub paye: bool,
    pub preuve_paiement: Option<String>,
    pub transaction_id: Option<String>,
    pub date_reservation: DateTime<Utc>,
}

impl Reservation {
    pub fn statut(&self) -> ReservationStatut {
        // el CHECK constraint de la tabla garantiza uno de los tres valores
        ReservationStatut::parse(&self.statut).unwrap_or(ReservationStatut::EnAttente)
    }

    pub fn demandeur(&self) -> Option<Demandeur> {
        Demandeur::from_colonnes(
            self.id_client,
            self.autre_nom.clone(),
            self.autre_tel.clone(),
        )
    }

    pub fn est_annulee(&self) -> bool {
        self.statut() == ReservationStatut::Annule
    }

    /// El ticket solo existe para reservas confirmadas y pagadas
    pub fn ticket_disponible(&self) -> bool {
        self.statut() == ReservationStatut::Confirme && self.paye
    }

    /// Total = prix unitaire x plazas, redondeado a céntimos
    pub fn montant_total(&self, prix_unitaire: Decimal) -> Decimal {
        (prix_unitaire * Decimal::from(self.nb_sieges)).round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn reservation(statut: &str, paye: bool) -> Reservation {
        Reservation {
            id_reservation: 1,
            id_voyage: 1,
            id_client: Some(7),
            autre_nom: None,
            autre_tel: None,
            nb_sieges: 3,
            statut: statut.to_string(),
            paye,
            preuve_paiement: None,
            transaction_id: None,
            date_reservation: Utc::now(),
        }
    }

    #[test]
    fn test_statut_parse() {
        assert_eq!(reservation("confirme", true).statut(), ReservationStatut::Confirme);
        assert_eq!(reservation("annule", false).statut(), ReservationStatut::Annule);
        assert_eq!(reservation("en_attente", false).statut(), ReservationStatut::EnAttente);
    }

    #[test]
    fn test_ticket_disponible_requiere_confirme_y_paye() {
        assert!(reservation("confirme", true).ticket_disponible());
        assert!(!reservation("confirme", false).ticket_disponible());
        assert!(!reservation("en_attente", true).ticket_disponible());
    }

    #[test]
    fn test_montant_total() {
        let r = reservation("confirme", true);
        assert_eq!(r.montant_total(dec("1.50")), dec("4.50"));
    }

    #[test]
    fn test_demandeur_union() {
        let d = Demandeur::from_colonnes(Some(5), None, None).unwrap();
        assert_eq!(d.id_client(), Some(5));

        let g = Demandeur::from_colonnes(None, Some("Ahmed".into()), Some("37614881".into()))
            .unwrap();
        assert_eq!(g.id_client(), None);

        // ni cliente ni contacto completo => inválido
        assert!(Demandeur::from_colonnes(None, Some("Ahmed".into()), None).is_none());
    }
}
