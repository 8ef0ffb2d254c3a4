use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::vehicule::Vehicule;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehiculeRepository {
    pool: PgPool,
}

impl VehiculeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        matricule: String,
        capacite: i32,
        type_vehicule: String,
        kilometrage_total: Decimal,
    ) -> Result<Vehicule, AppError> {
        let vehicule = sqlx::query_as::<_, Vehicule>(
            r#"
            INSERT INTO vehicule (matricule, capacite, type_vehicule, kilometrage_total)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(matricule)
        .bind(capacite)
        .bind(type_vehicule)
        .bind(kilometrage_total)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicule)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Vehicule>, AppError> {
        let vehicule =
            sqlx::query_as::<_, Vehicule>("SELECT * FROM vehicule WHERE id_vehicule = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(vehicule)
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicule>, AppError> {
        let vehicules =
            sqlx::query_as::<_, Vehicule>("SELECT * FROM vehicule ORDER BY matricule")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicules)
    }

    pub async fn matricule_exists(&self, matricule: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicule WHERE matricule = $1)")
                .bind(matricule)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: i32,
        matricule: Option<String>,
        capacite: Option<i32>,
        type_vehicule: Option<String>,
        kilometrage_total: Option<Decimal>,
    ) -> Result<Vehicule, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicule", id))?;

        let vehicule = sqlx::query_as::<_, Vehicule>(
            r#"
            UPDATE vehicule
            SET matricule = $2, capacite = $3, type_vehicule = $4, kilometrage_total = $5
            WHERE id_vehicule = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(matricule.unwrap_or(current.matricule))
        .bind(capacite.unwrap_or(current.capacite))
        .bind(type_vehicule.unwrap_or(current.type_vehicule))
        .bind(kilometrage_total.unwrap_or(current.kilometrage_total))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicule)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicule WHERE id_vehicule = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicule", id));
        }
        Ok(())
    }
}
