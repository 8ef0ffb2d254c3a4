use sqlx::PgPool;

use crate::models::reservation::{Demandeur, Reservation, ReservationStatut};
use crate::utils::errors::{not_found_error, AppError};

/// Agregado de plazas reservadas de un voyage: SUM(nb_sieges) excluyendo
/// ÚNICAMENTE las reservas anuladas (las pendientes cuentan contra la
/// capacidad). `exclure` descarta además una reserva concreta cuando se
/// está editando.
///
/// Esta es la única consulta del sistema que calcula este agregado; el
/// listado web, el feed móvil y el check de admisión pasan todos por aquí.
pub async fn sieges_reserves(
    executor: impl sqlx::PgExecutor<'_>,
    id_voyage: i32,
    exclure: Option<i32>,
) -> Result<i32, AppError> {
    let total: (i64,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(nb_sieges), 0)
        FROM reservation
        WHERE id_voyage = $1
          AND statut <> 'annule'
          AND ($2::int IS NULL OR id_reservation <> $2)
        "#,
    )
    .bind(id_voyage)
    .bind(exclure)
    .fetch_one(executor)
    .await?;

    Ok(total.0 as i32)
}

/// ¿Existe ya este transaction_id en otra reserva? Se comprueba dentro de
/// la transacción de admisión; el índice UNIQUE de la tabla es la red de
/// seguridad final.
pub async fn transaction_id_existe(
    executor: impl sqlx::PgExecutor<'_>,
    transaction_id: &str,
    exclure: Option<i32>,
) -> Result<bool, AppError> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM reservation
            WHERE transaction_id = $1
              AND ($2::int IS NULL OR id_reservation <> $2)
        )
        "#,
    )
    .bind(transaction_id)
    .bind(exclure)
    .fetch_one(executor)
    .await?;

    Ok(result.0)
}

/// Mapear el error del INSERT de una reserva. Dos sumisiones concurrentes
/// con el mismo transaction_id sobre voyages DISTINTOS no comparten lock de
/// fila: ambas pasan el check de existencia y la perdedora choca con el
/// índice UNIQUE. Esa violación se devuelve estructurada, no como error
/// genérico de base de datos.
fn erreur_insertion(e: sqlx::Error, transaction_id: Option<&str>) -> AppError {
    if let (sqlx::Error::Database(db), Some(tid)) = (&e, transaction_id) {
        if db.constraint() == Some("reservation_transaction_id_key") {
            return AppError::TransactionDupliquee {
                transaction_id: tid.to_string(),
            };
        }
    }
    AppError::from(e)
}

/// Insertar una reserva dentro de la transacción de admisión (misma
/// transacción que produjo el check de plazas)
pub async fn inserer(
    executor: impl sqlx::PgExecutor<'_>,
    id_voyage: i32,
    demandeur: &Demandeur,
    nb_sieges: i32,
    statut: ReservationStatut,
    paye: bool,
    preuve_paiement: Option<&str>,
    transaction_id: Option<&str>,
) -> Result<Reservation, AppError> {
    let (id_client, autre_nom, autre_tel) = match demandeur {
        Demandeur::Client { id_client } => (Some(*id_client), None, None),
        Demandeur::Invite { nom, telephone } => {
            (None, Some(nom.as_str()), Some(telephone.as_str()))
        }
    };

    let reservation = sqlx::query_as::<_, Reservation>(
        r#"
        INSERT INTO reservation
            (id_voyage, id_client, autre_nom, autre_tel, nb_sieges, statut, paye,
             preuve_paiement, transaction_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(id_voyage)
    .bind(id_client)
    .bind(autre_nom)
    .bind(autre_tel)
    .bind(nb_sieges)
    .bind(statut.as_str())
    .bind(paye)
    .bind(preuve_paiement)
    .bind(transaction_id)
    .fetch_one(executor)
    .await
    .map_err(|e| erreur_insertion(e, transaction_id))?;

    Ok(reservation)
}

/// Cargar una reserva con lock de fila dentro de una transacción (ediciones
/// de plazas y cambios de estado)
pub async fn find_for_update(
    tx: &mut sqlx::PgConnection,
    id: i32,
) -> Result<Option<Reservation>, AppError> {
    let reservation = sqlx::query_as::<_, Reservation>(
        "SELECT * FROM reservation WHERE id_reservation = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(tx)
    .await?;

    Ok(reservation)
}

/// Actualizar nb_sieges dentro de la transacción que re-validó la admisión
pub async fn update_sieges(
    executor: impl sqlx::PgExecutor<'_>,
    id: i32,
    nb_sieges: i32,
) -> Result<Reservation, AppError> {
    let reservation = sqlx::query_as::<_, Reservation>(
        "UPDATE reservation SET nb_sieges = $2 WHERE id_reservation = $1 RETURNING *",
    )
    .bind(id)
    .bind(nb_sieges)
    .fetch_one(executor)
    .await?;

    Ok(reservation)
}

/// Cambiar estado y flag de pago (confirmación / anulación)
pub async fn update_statut(
    executor: impl sqlx::PgExecutor<'_>,
    id: i32,
    statut: ReservationStatut,
    paye: bool,
) -> Result<Reservation, AppError> {
    let reservation = sqlx::query_as::<_, Reservation>(
        "UPDATE reservation SET statut = $2, paye = $3 WHERE id_reservation = $1 RETURNING *",
    )
    .bind(id)
    .bind(statut.as_str())
    .bind(paye)
    .fetch_one(executor)
    .await?;

    Ok(reservation)
}

pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Reservation>, AppError> {
        let reservation =
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservation WHERE id_reservation = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(reservation)
    }

    /// Listado staff: pendientes primero, después las más recientes
    pub async fn find_all(&self) -> Result<Vec<Reservation>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservation
            ORDER BY (statut = 'en_attente') DESC, date_reservation DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    pub async fn find_by_client(&self, id_client: i32) -> Result<Vec<Reservation>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservation WHERE id_client = $1 ORDER BY date_reservation DESC",
        )
        .bind(id_client)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    /// Borrado físico por staff: la fila y sus plazas desaparecen de todos
    /// los agregados
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reservation WHERE id_reservation = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Reservation", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    /// Violación de constraint tal como la reporta el driver de Postgres
    #[derive(Debug)]
    struct ViolationUnique(&'static str);

    impl std::fmt::Display for ViolationUnique {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "duplicate key value violates unique constraint \"{}\"",
                self.0
            )
        }
    }

    impl StdError for ViolationUnique {}

    impl sqlx::error::DatabaseError for ViolationUnique {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.0)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    fn violation(constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ViolationUnique(constraint)))
    }

    #[test]
    fn test_violacion_unique_de_transaction_id_es_error_estructurado() {
        // dos sumisiones con el mismo tid sobre voyages distintos: la
        // perdedora choca con el índice y debe salir como 409, no 500
        let err = erreur_insertion(violation("reservation_transaction_id_key"), Some("TX-9"));
        match err {
            AppError::TransactionDupliquee { transaction_id } => {
                assert_eq!(transaction_id, "TX-9")
            }
            other => panic!("se esperaba TransactionDupliquee, fue {:?}", other),
        }
    }

    #[test]
    fn test_otras_violaciones_siguen_siendo_error_de_base_de_datos() {
        // otra constraint cualquiera no se disfraza de duplicado
        let err = erreur_insertion(violation("reservation_statut_check"), Some("TX-9"));
        assert!(matches!(err, AppError::Database(_)));

        // sin transaction_id en la sumisión el mapeo no aplica
        let err = erreur_insertion(violation("reservation_transaction_id_key"), None);
        assert!(matches!(err, AppError::Database(_)));

        let err = erreur_insertion(sqlx::Error::RowNotFound, Some("TX-9"));
        assert!(matches!(err, AppError::Database(_)));
    }
}
