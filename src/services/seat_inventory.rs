//! Motor de inventario de plazas
//!
//! Única fuente de verdad para plazas reservadas/disponibles y para el
//! estado de un voyage. El sistema legacy recalculaba este agregado en
//! varios sitios con filtros de exclusión distintos (agregación cruda,
//! funciones almacenadas, parsing del texto de display); aquí TODOS los
//! consumidores — listados web, feed móvil, ticket y check de admisión —
//! pasan por estas mismas funciones puras, parametrizadas solo por `now`.
//!
//! El agregado `reserves` que reciben estas funciones sale siempre de
//! `reservation_repository::sieges_reserves` (SUM de nb_sieges excluyendo
//! únicamente las reservas anuladas).

use chrono::{Duration, NaiveDateTime};

use crate::models::voyage::VoyageStatut;

/// Ventana de cierre: un voyage deja de aceptar reservas 30 minutos antes
/// de la salida. Constante de negocio fija.
pub const FENETRE_FERMETURE_MINUTES: i64 = 30;

/// Derivar el estado de un voyage a partir del instante actual y del
/// agregado de plazas. Se recalcula en cada lectura, nunca se almacena.
///
/// Límite exacto: salida a `now + 30:00` => cerrado; a `now + 30:01` =>
/// abierto (si quedan plazas).
pub fn derive_statut(
    now: NaiveDateTime,
    depart: NaiveDateTime,
    reserves: i32,
    capacite: i32,
) -> VoyageStatut {
    let seuil_fermeture = now + Duration::minutes(FENETRE_FERMETURE_MINUTES);
    if depart <= seuil_fermeture {
        return VoyageStatut::FermeTemps;
    }
    if reserves >= capacite {
        return VoyageStatut::FermeComplet;
    }
    VoyageStatut::Ouvert
}

/// Plazas disponibles, con suelo en 0 (nunca negativo aunque un dato
/// legacy hubiera dejado el agregado por encima de la capacidad)
pub fn sieges_disponibles(capacite: i32, reserves: i32) -> i32 {
    (capacite - reserves).max(0)
}

/// Snapshot del inventario de un voyage, tal como lo exponen el listado
/// web, el feed móvil y la respuesta de admisión.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventaireVoyage {
    pub capacite: i32,
    pub sieges_reserves: i32,
    pub sieges_disponibles: i32,
    pub statut: VoyageStatut,
}

impl InventaireVoyage {
    pub fn calculer(
        now: NaiveDateTime,
        depart: NaiveDateTime,
        reserves: i32,
        capacite: i32,
    ) -> InventaireVoyage {
        InventaireVoyage {
            capacite,
            sieges_reserves: reserves,
            sieges_disponibles: sieges_disponibles(capacite, reserves),
            statut: derive_statut(now, depart, reserves, capacite),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Duration};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_statut_ouvert_con_plazas() {
        let depart = now() + Duration::hours(2);
        assert_eq!(derive_statut(now(), depart, 2, 4), VoyageStatut::Ouvert);
    }

    #[test]
    fn test_limite_exacto_30_minutos() {
        // exactamente 30:00 => cerrado por tiempo
        let depart = now() + Duration::minutes(30);
        assert_eq!(derive_statut(now(), depart, 0, 4), VoyageStatut::FermeTemps);

        // 30:01 => abierto
        let depart = now() + Duration::minutes(30) + Duration::seconds(1);
        assert_eq!(derive_statut(now(), depart, 0, 4), VoyageStatut::Ouvert);
    }

    #[test]
    fn test_voyage_ya_salido() {
        let depart = now() - Duration::hours(1);
        assert_eq!(derive_statut(now(), depart, 0, 4), VoyageStatut::FermeTemps);
    }

    #[test]
    fn test_completo_gana_solo_si_queda_tiempo() {
        let depart = now() + Duration::hours(2);
        assert_eq!(derive_statut(now(), depart, 4, 4), VoyageStatut::FermeComplet);
        assert_eq!(derive_statut(now(), depart, 5, 4), VoyageStatut::FermeComplet);

        // cerrado por tiempo tiene prioridad sobre completo
        let depart = now() + Duration::minutes(10);
        assert_eq!(derive_statut(now(), depart, 4, 4), VoyageStatut::FermeTemps);
    }

    #[test]
    fn test_disponibles_con_suelo_en_cero() {
        assert_eq!(sieges_disponibles(4, 1), 3);
        assert_eq!(sieges_disponibles(4, 4), 0);
        // dato legacy por encima de la capacidad: nunca negativo
        assert_eq!(sieges_disponibles(4, 6), 0);
    }

    #[test]
    fn test_inventaire_snapshot() {
        let depart = now() + Duration::hours(3);
        let inv = InventaireVoyage::calculer(now(), depart, 3, 4);
        assert_eq!(inv.sieges_reserves, 3);
        assert_eq!(inv.sieges_disponibles, 1);
        assert_eq!(inv.statut, VoyageStatut::Ouvert);

        let inv = InventaireVoyage::calculer(now(), depart, 4, 4);
        assert_eq!(inv.sieges_disponibles, 0);
        assert_eq!(inv.statut, VoyageStatut::FermeComplet);
    }
}
