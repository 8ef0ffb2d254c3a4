use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::trajet::Trajet;
use crate::utils::errors::{not_found_error, AppError};

pub struct TrajetRepository {
    pool: PgPool,
}

impl TrajetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        ville_depart: String,
        ville_arrivee: String,
        distance_km: Decimal,
        duree_prevue_minutes: Option<i32>,
    ) -> Result<Trajet, AppError> {
        let trajet = sqlx::query_as::<_, Trajet>(
            r#"
            INSERT INTO trajet (ville_depart, ville_arrivee, distance_km, duree_prevue_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(ville_depart)
        .bind(ville_arrivee)
        .bind(distance_km)
        .bind(duree_prevue_minutes)
        .fetch_one(&self.pool)
        .await?;

        Ok(trajet)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Trajet>, AppError> {
        let trajet = sqlx::query_as::<_, Trajet>("SELECT * FROM trajet WHERE id_trajet = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trajet)
    }

    pub async fn find_all(&self) -> Result<Vec<Trajet>, AppError> {
        let trajets = sqlx::query_as::<_, Trajet>(
            "SELECT * FROM trajet ORDER BY ville_depart, ville_arrivee",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trajets)
    }

    pub async fn update(
        &self,
        id: i32,
        ville_depart: Option<String>,
        ville_arrivee: Option<String>,
        distance_km: Option<Decimal>,
        duree_prevue_minutes: Option<i32>,
    ) -> Result<Trajet, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trajet", id))?;

        let trajet = sqlx::query_as::<_, Trajet>(
            r#"
            UPDATE trajet
            SET ville_depart = $2, ville_arrivee = $3, distance_km = $4, duree_prevue_minutes = $5
            WHERE id_trajet = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ville_depart.unwrap_or(current.ville_depart))
        .bind(ville_arrivee.unwrap_or(current.ville_arrivee))
        .bind(distance_km.unwrap_or(current.distance_km))
        .bind(duree_prevue_minutes.or(current.duree_prevue_minutes))
        .fetch_one(&self.pool)
        .await?;

        Ok(trajet)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM trajet WHERE id_trajet = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Trajet", id));
        }
        Ok(())
    }
}
