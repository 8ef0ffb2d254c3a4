//! Protocolo de admisión de reservas
//!
//! Valida y persiste una petición de reserva contra el motor de
//! inventario de forma atómica. La secuencia leer-agregado / escribir-fila
//! corre entera dentro de una transacción con lock de fila sobre el
//! voyage (`FOR UPDATE`), de modo que dos sumisiones concurrentes sobre el
//! mismo voyage se serializan y ninguna puede empujar el agregado por
//! encima de la capacidad (race check-then-act clásico).
//!
//! La verificación OCR de la preuve de pago es lenta: se ejecuta SIEMPRE
//! antes de entrar en la sección crítica; dentro de la transacción solo se
//! usa su resultado (ok / transaction_id).

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use sqlx::PgPool;

use crate::models::reservation::{Demandeur, Reservation, ReservationStatut};
use crate::models::voyage::VoyageStatut;
use crate::repositories::{reservation_repository, voyage_repository};
use crate::services::payment_verifier::PaymentVerifier;
use crate::services::seat_inventory;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Canal de entrada de la reserva. Decide el estado inicial:
/// - Web (staff): confirmada y pagada de inmediato (cobro manual ya hecho)
/// - Mobile (cliente): pendiente hasta confirmación manual u OCR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanalReservation {
    Web,
    Mobile,
}

/// Preuve de pago adjunta a una sumisión móvil
#[derive(Debug, Clone)]
pub struct PreuvePaiement {
    /// Imagen decodificada que se envía al verificador externo
    pub image: Vec<u8>,
    /// Referencia bajo la que el colaborador de storage guardó el archivo
    pub reference: String,
}

/// Petición de reserva ya validada sintácticamente por el DTO
#[derive(Debug, Clone)]
pub struct DemandeReservation {
    pub id_voyage: i32,
    pub nb_sieges: i32,
    pub demandeur: Demandeur,
    pub canal: CanalReservation,
    pub preuve: Option<PreuvePaiement>,
}

/// Decisión pura de admisión: mismo orden de checks que ejecuta la
/// transacción. `reserves` es el agregado actual (pendientes + confirmadas,
/// excluyendo anuladas y, en ediciones, la propia reserva).
pub fn verifier_admission(
    now: NaiveDateTime,
    depart: NaiveDateTime,
    capacite: i32,
    reserves: i32,
    nb_sieges: i32,
) -> AppResult<()> {
    if seat_inventory::derive_statut(now, depart, reserves, capacite) == VoyageStatut::FermeTemps {
        return Err(AppError::VoyageFermeTemps);
    }

    if reserves + nb_sieges > capacite {
        return Err(AppError::VoyageComplet {
            restantes: seat_inventory::sieges_disponibles(capacite, reserves),
        });
    }

    Ok(())
}

/// Estado inicial de una reserva nueva: según canal, elevado a
/// confirme+paye cuando la preuve viene verificada con un transaction_id
/// que ninguna otra reserva usa. Un transaction_id repetido se rechaza
/// aunque queden plazas de sobra.
pub fn statut_initial(
    canal: CanalReservation,
    transaction_verifiee: Option<&str>,
    transaction_deja_utilisee: bool,
) -> AppResult<(ReservationStatut, bool)> {
    match transaction_verifiee {
        Some(tid) if transaction_deja_utilisee => Err(AppError::TransactionDupliquee {
            transaction_id: tid.to_string(),
        }),
        Some(_) => Ok((ReservationStatut::Confirme, true)),
        None => match canal {
            CanalReservation::Web => Ok((ReservationStatut::Confirme, true)),
            CanalReservation::Mobile => Ok((ReservationStatut::EnAttente, false)),
        },
    }
}

/// Decisión pura de anulación: None cuando la reserva ya está anulada
/// (no-op, las plazas no se liberan dos veces).
pub fn decision_annulation(statut: ReservationStatut) -> Option<ReservationStatut> {
    match statut {
        ReservationStatut::Annule => None,
        _ => Some(ReservationStatut::Annule),
    }
}

pub struct AdmissionService {
    pool: PgPool,
    verifier: Arc<dyn PaymentVerifier>,
}

impl AdmissionService {
    pub fn new(pool: PgPool, verifier: Arc<dyn PaymentVerifier>) -> Self {
        Self { pool, verifier }
    }

    /// Someter una reserva nueva. Devuelve la fila persistida con su
    /// estado final, o el error de admisión estructurado.
    pub async fn submit_reservation(&self, demande: DemandeReservation) -> AppResult<Reservation> {
        if demande.nb_sieges <= 0 {
            return Err(AppError::BadRequest(
                "nb_sieges doit être un entier positif".to_string(),
            ));
        }

        // Verificación OCR fuera de la sección crítica. Solo en el canal
        // móvil: el staff web cobra manualmente y no adjunta preuve.
        let mut transaction_verifiee: Option<String> = None;
        let mut preuve_reference: Option<String> = None;

        if demande.canal == CanalReservation::Mobile {
            if let Some(preuve) = &demande.preuve {
                let prix = VoyageRepositoryRead::prix(&self.pool, demande.id_voyage).await?;
                let montant = (prix * rust_decimal::Decimal::from(demande.nb_sieges)).round_dp(2);

                let verification = self.verifier.verifier(&preuve.image, montant).await?;
                match (verification.verifie, verification.transaction_id) {
                    (true, Some(tid)) => {
                        transaction_verifiee = Some(tid);
                        preuve_reference = Some(preuve.reference.clone());
                    }
                    _ => return Err(AppError::PaymentUnverified),
                }
            }
        }

        let now = Local::now().naive_local();
        let mut tx = self.pool.begin().await?;

        // 1. Cargar el voyage con lock de fila
        let voyage = voyage_repository::find_detail_for_update(&mut *tx, demande.id_voyage)
            .await?
            .ok_or_else(|| not_found_error("Voyage", demande.id_voyage))?;

        // 2+3. Recomputar estado y agregado DENTRO de la transacción, nunca
        // desde una lectura cacheada
        let reserves =
            reservation_repository::sieges_reserves(&mut *tx, demande.id_voyage, None).await?;
        verifier_admission(now, voyage.depart(), voyage.capacite, reserves, demande.nb_sieges)?;

        // 4+5. Estado inicial según canal, elevado si el pago ya está verificado
        let deja_utilisee = match &transaction_verifiee {
            Some(tid) => {
                reservation_repository::transaction_id_existe(&mut *tx, tid, None).await?
            }
            None => false,
        };
        let (statut, paye) =
            statut_initial(demande.canal, transaction_verifiee.as_deref(), deja_utilisee)?;

        // 6. Persistir en la misma transacción que hizo el check de plazas
        let reservation = reservation_repository::inserer(
            &mut *tx,
            demande.id_voyage,
            &demande.demandeur,
            demande.nb_sieges,
            statut,
            paye,
            preuve_reference.as_deref(),
            transaction_verifiee.as_deref(),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            "✅ Reserva #{} admitida: voyage={} sieges={} statut={}",
            reservation.id_reservation,
            reservation.id_voyage,
            reservation.nb_sieges,
            reservation.statut
        );

        Ok(reservation)
    }

    /// Editar el número de plazas re-ejecutando el check de admisión
    /// completo, excluyendo la propia reserva del agregado.
    pub async fn modifier_sieges(&self, id_reservation: i32, nb_sieges: i32) -> AppResult<Reservation> {
        if nb_sieges <= 0 {
            return Err(AppError::BadRequest(
                "nb_sieges doit être un entier positif".to_string(),
            ));
        }

        let now = Local::now().naive_local();
        let mut tx = self.pool.begin().await?;

        let reservation = reservation_repository::find_for_update(&mut *tx, id_reservation)
            .await?
            .ok_or_else(|| not_found_error("Reservation", id_reservation))?;

        // annule es terminal: no se edita ni se resucita
        if reservation.est_annulee() {
            return Err(AppError::Conflict(
                "Impossible de modifier une réservation annulée".to_string(),
            ));
        }

        let voyage = voyage_repository::find_detail_for_update(&mut *tx, reservation.id_voyage)
            .await?
            .ok_or_else(|| not_found_error("Voyage", reservation.id_voyage))?;

        let reserves = reservation_repository::sieges_reserves(
            &mut *tx,
            reservation.id_voyage,
            Some(id_reservation),
        )
        .await?;
        verifier_admission(now, voyage.depart(), voyage.capacite, reserves, nb_sieges)?;

        let updated =
            reservation_repository::update_sieges(&mut *tx, id_reservation, nb_sieges).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Confirmación de pago por staff: en_attente -> confirme + paye.
    /// Idempotente sobre una reserva ya confirmada.
    pub async fn confirmer_paiement(&self, id_reservation: i32) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let reservation = reservation_repository::find_for_update(&mut *tx, id_reservation)
            .await?
            .ok_or_else(|| not_found_error("Reservation", id_reservation))?;

        let updated = match reservation.statut() {
            ReservationStatut::Annule => {
                return Err(AppError::Conflict(
                    "Impossible de confirmer une réservation annulée".to_string(),
                ));
            }
            ReservationStatut::Confirme if reservation.paye => reservation,
            _ => {
                reservation_repository::update_statut(
                    &mut *tx,
                    id_reservation,
                    ReservationStatut::Confirme,
                    true,
                )
                .await?
            }
        };

        tx.commit().await?;

        tracing::info!("💰 Paiement confirmé para la reserva #{}", id_reservation);
        Ok(updated)
    }

    /// Anulación: libera las plazas de inmediato (el agregado excluye
    /// anuladas). No-op si ya estaba anulada: nunca libera dos veces.
    pub async fn annuler(&self, id_reservation: i32) -> AppResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let reservation = reservation_repository::find_for_update(&mut *tx, id_reservation)
            .await?
            .ok_or_else(|| not_found_error("Reservation", id_reservation))?;

        let paye = reservation.paye;
        let updated = match decision_annulation(reservation.statut()) {
            None => reservation,
            Some(statut) => {
                reservation_repository::update_statut(&mut *tx, id_reservation, statut, paye)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(updated)
    }
}

/// Lectura puntual del precio por plaza, previa a la sección crítica.
/// Solo alimenta el monto esperado del verificador; el voyage se vuelve a
/// cargar (con lock) dentro de la transacción.
struct VoyageRepositoryRead;

impl VoyageRepositoryRead {
    async fn prix(pool: &PgPool, id_voyage: i32) -> AppResult<rust_decimal::Decimal> {
        let row: Option<(rust_decimal::Decimal,)> =
            sqlx::query_as("SELECT prix_par_siege FROM voyage WHERE id_voyage = $1")
                .bind(id_voyage)
                .fetch_optional(pool)
                .await?;

        row.map(|r| r.0)
            .ok_or_else(|| not_found_error("Voyage", id_voyage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn depart_lointain() -> NaiveDateTime {
        now() + Duration::hours(4)
    }

    #[test]
    fn test_admission_ok_con_plazas() {
        assert!(verifier_admission(now(), depart_lointain(), 4, 0, 2).is_ok());
        assert!(verifier_admission(now(), depart_lointain(), 4, 3, 1).is_ok());
    }

    #[test]
    fn test_rechazo_por_capacidad_con_restantes() {
        // capacidad 4, una reserva confirmada de 3: pedir 2 => rechazo con restantes=1
        let err = verifier_admission(now(), depart_lointain(), 4, 3, 2).unwrap_err();
        match err {
            AppError::VoyageComplet { restantes } => assert_eq!(restantes, 1),
            other => panic!("se esperaba VoyageComplet, fue {:?}", other),
        }

        // pedir 1 => admitida (reserves pasa a 4, voyage queda FERMÉ_COMPLET)
        assert!(verifier_admission(now(), depart_lointain(), 4, 3, 1).is_ok());
        assert_eq!(
            seat_inventory::derive_statut(now(), depart_lointain(), 4, 4),
            VoyageStatut::FermeComplet
        );
    }

    #[test]
    fn test_rechazo_por_tiempo() {
        let depart = now() + Duration::minutes(30);
        let err = verifier_admission(now(), depart, 4, 0, 1).unwrap_err();
        assert!(matches!(err, AppError::VoyageFermeTemps));

        // un segundo más allá de la ventana: abierto
        let depart = now() + Duration::minutes(30) + Duration::seconds(1);
        assert!(verifier_admission(now(), depart, 4, 0, 1).is_ok());
    }

    #[test]
    fn test_voyage_lleno_reporta_cero_restantes() {
        let err = verifier_admission(now(), depart_lointain(), 4, 4, 1).unwrap_err();
        match err {
            AppError::VoyageComplet { restantes } => assert_eq!(restantes, 0),
            other => panic!("se esperaba VoyageComplet, fue {:?}", other),
        }
    }

    #[test]
    fn test_n_sumisiones_serializadas_admiten_exactamente_una() {
        // N sumisiones pidiendo cada una la capacidad entera: el lock de
        // fila las serializa, así que el agregado que ve cada una ya
        // incluye la anterior admitida.
        let capacite = 10;
        let mut reserves = 0;
        let mut admitidas = 0;
        let mut rechazos = 0;

        for _ in 0..5 {
            match verifier_admission(now(), depart_lointain(), capacite, reserves, capacite) {
                Ok(()) => {
                    reserves += capacite;
                    admitidas += 1;
                }
                Err(AppError::VoyageComplet { .. }) => rechazos += 1,
                Err(other) => panic!("error inesperado: {:?}", other),
            }
        }

        assert_eq!(admitidas, 1);
        assert_eq!(rechazos, 4);
        assert_eq!(reserves, capacite);
    }

    #[test]
    fn test_anulacion_libera_plazas() {
        // escenario end-to-end de la spec: cap=4 con 3 plazas confirmadas
        let err = verifier_admission(now(), depart_lointain(), 4, 3, 2).unwrap_err();
        assert!(matches!(err, AppError::VoyageComplet { restantes: 1 }));

        // se anula la reserva de 3: el agregado recomputado pasa a 0
        // (quedaba 1 plaza ocupada de otra reserva en el escenario spec:
        // reserves=1) y la sumisión de 2 ahora entra
        assert!(verifier_admission(now(), depart_lointain(), 4, 1, 2).is_ok());
        assert_eq!(seat_inventory::sieges_disponibles(4, 1), 3);
    }

    #[test]
    fn test_edicion_excluye_la_propia_reserva() {
        // reserva existente de 3 plazas sobre cap=4; subirla a 4 debe
        // evaluarse contra el agregado SIN ella (reserves=0)
        assert!(verifier_admission(now(), depart_lointain(), 4, 0, 4).is_ok());
        // pero subirla a 5 no cabe
        assert!(verifier_admission(now(), depart_lointain(), 4, 0, 5).is_err());
    }

    #[test]
    fn test_statut_inicial_por_canal() {
        assert_eq!(
            statut_initial(CanalReservation::Web, None, false).unwrap(),
            (ReservationStatut::Confirme, true)
        );
        assert_eq!(
            statut_initial(CanalReservation::Mobile, None, false).unwrap(),
            (ReservationStatut::EnAttente, false)
        );
        // preuve verificada con tid nuevo: entra confirmada y pagada
        assert_eq!(
            statut_initial(CanalReservation::Mobile, Some("TX-1"), false).unwrap(),
            (ReservationStatut::Confirme, true)
        );
    }

    #[test]
    fn test_transaction_duplicada_se_rechaza_aunque_haya_plazas() {
        // el check de plazas pasaría de sobra; el tid repetido gana igual
        assert!(verifier_admission(now(), depart_lointain(), 10, 0, 1).is_ok());

        let err = statut_initial(CanalReservation::Mobile, Some("TX-77"), true).unwrap_err();
        match err {
            AppError::TransactionDupliquee { transaction_id } => {
                assert_eq!(transaction_id, "TX-77")
            }
            other => panic!("se esperaba TransactionDupliquee, fue {:?}", other),
        }
    }

    #[test]
    fn test_anulacion_doble_es_no_op() {
        // primera anulación escribe el nuevo estado; el agregado
        // recomputado libera las 3 plazas de la reserva
        assert_eq!(
            decision_annulation(ReservationStatut::Confirme),
            Some(ReservationStatut::Annule)
        );
        let reserves = 0;
        assert_eq!(seat_inventory::sieges_disponibles(4, reserves), 4);

        // segunda anulación: no-op, no hay escritura y el agregado no
        // vuelve a bajar
        assert_eq!(decision_annulation(ReservationStatut::Annule), None);
        assert_eq!(seat_inventory::sieges_disponibles(4, reserves), 4);

        // una pendiente también se anula
        assert_eq!(
            decision_annulation(ReservationStatut::EnAttente),
            Some(ReservationStatut::Annule)
        );
    }

    #[test]
    fn test_pendientes_cuentan_contra_capacidad() {
        // dos pendientes de 2 plazas ya contadas: una tercera de 1 sobre
        // cap=4 no entra
        let err = verifier_admission(now(), depart_lointain(), 4, 4, 1).unwrap_err();
        assert!(matches!(err, AppError::VoyageComplet { .. }));
    }
}
