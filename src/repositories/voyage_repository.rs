use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::voyage::{Voyage, VoyageDetail};
use crate::utils::errors::{not_found_error, AppError};

/// Columnas del JOIN voyage/trajet/vehicule/chauffeur compartidas por
/// todas las consultas de detalle
const SELECT_DETAIL: &str = r#"
    SELECT v.id_voyage, v.date_depart, v.heure_depart, v.prix_par_siege,
           v.id_trajet, t.ville_depart, t.ville_arrivee,
           v.id_vehicule, ve.matricule, ve.capacite,
           v.id_chauffeur, c.nom AS chauffeur_nom
    FROM voyage v
    JOIN trajet t ON t.id_trajet = v.id_trajet
    JOIN vehicule ve ON ve.id_vehicule = v.id_vehicule
    JOIN chauffeur c ON c.id_chauffeur = v.id_chauffeur
"#;

/// Cargar un voyage con lock de fila (`FOR UPDATE OF v`) dentro de una
/// transacción de admisión. Serializa las sumisiones concurrentes sobre el
/// mismo voyage; voyages distintos nunca compiten por este lock.
pub async fn find_detail_for_update(
    tx: &mut sqlx::PgConnection,
    id_voyage: i32,
) -> Result<Option<VoyageDetail>, AppError> {
    let sql = format!("{} WHERE v.id_voyage = $1 FOR UPDATE OF v", SELECT_DETAIL);
    let voyage = sqlx::query_as::<_, VoyageDetail>(&sql)
        .bind(id_voyage)
        .fetch_optional(tx)
        .await?;

    Ok(voyage)
}

pub struct VoyageRepository {
    pool: PgPool,
}

impl VoyageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        date_depart: NaiveDate,
        heure_depart: NaiveTime,
        prix_par_siege: Decimal,
        id_trajet: i32,
        id_vehicule: i32,
        id_chauffeur: i32,
    ) -> Result<Voyage, AppError> {
        let voyage = sqlx::query_as::<_, Voyage>(
            r#"
            INSERT INTO voyage (date_depart, heure_depart, prix_par_siege, id_trajet, id_vehicule, id_chauffeur)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(date_depart)
        .bind(heure_depart)
        .bind(prix_par_siege)
        .bind(id_trajet)
        .bind(id_vehicule)
        .bind(id_chauffeur)
        .fetch_one(&self.pool)
        .await?;

        Ok(voyage)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Voyage>, AppError> {
        let voyage = sqlx::query_as::<_, Voyage>("SELECT * FROM voyage WHERE id_voyage = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(voyage)
    }

    pub async fn find_detail(&self, id: i32) -> Result<Option<VoyageDetail>, AppError> {
        let sql = format!("{} WHERE v.id_voyage = $1", SELECT_DETAIL);
        let voyage = sqlx::query_as::<_, VoyageDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(voyage)
    }

    /// Listado web: todos los voyages, los más recientes primero
    pub async fn find_all_detail(&self) -> Result<Vec<VoyageDetail>, AppError> {
        let sql = format!("{} ORDER BY v.date_depart DESC, v.heure_depart DESC", SELECT_DETAIL);
        let voyages = sqlx::query_as::<_, VoyageDetail>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(voyages)
    }

    /// Feed móvil: voyages a partir de hoy, los más próximos primero
    pub async fn find_upcoming_detail(
        &self,
        from: NaiveDate,
    ) -> Result<Vec<VoyageDetail>, AppError> {
        let sql = format!(
            "{} WHERE v.date_depart >= $1 ORDER BY v.date_depart, v.heure_depart",
            SELECT_DETAIL
        );
        let voyages = sqlx::query_as::<_, VoyageDetail>(&sql)
            .bind(from)
            .fetch_all(&self.pool)
            .await?;

        Ok(voyages)
    }

    /// Voyages asignados al chauffeur enlazado a esta cuenta utilisateur
    pub async fn find_by_chauffeur_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<VoyageDetail>, AppError> {
        let sql = format!(
            "{} WHERE c.user_id = $1 ORDER BY v.date_depart DESC, v.heure_depart DESC",
            SELECT_DETAIL
        );
        let voyages = sqlx::query_as::<_, VoyageDetail>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(voyages)
    }

    pub async fn update(
        &self,
        id: i32,
        date_depart: Option<NaiveDate>,
        heure_depart: Option<NaiveTime>,
        prix_par_siege: Option<Decimal>,
        id_trajet: Option<i32>,
        id_vehicule: Option<i32>,
        id_chauffeur: Option<i32>,
    ) -> Result<Voyage, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Voyage", id))?;

        let voyage = sqlx::query_as::<_, Voyage>(
            r#"
            UPDATE voyage
            SET date_depart = $2, heure_depart = $3, prix_par_siege = $4,
                id_trajet = $5, id_vehicule = $6, id_chauffeur = $7
            WHERE id_voyage = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(date_depart.unwrap_or(current.date_depart))
        .bind(heure_depart.unwrap_or(current.heure_depart))
        .bind(prix_par_siege.unwrap_or(current.prix_par_siege))
        .bind(id_trajet.unwrap_or(current.id_trajet))
        .bind(id_vehicule.unwrap_or(current.id_vehicule))
        .bind(id_chauffeur.unwrap_or(current.id_chauffeur))
        .fetch_one(&self.pool)
        .await?;

        Ok(voyage)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM voyage WHERE id_voyage = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Voyage", id));
        }
        Ok(())
    }
}
