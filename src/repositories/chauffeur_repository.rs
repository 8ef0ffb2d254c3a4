use sqlx::PgPool;

use crate::models::chauffeur::Chauffeur;
use crate::utils::errors::{not_found_error, AppError};

pub struct ChauffeurRepository {
    pool: PgPool,
}

impl ChauffeurRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nom: String,
        telephone: Option<String>,
        user_id: Option<i32>,
    ) -> Result<Chauffeur, AppError> {
        let chauffeur = sqlx::query_as::<_, Chauffeur>(
            r#"
            INSERT INTO chauffeur (nom, telephone, user_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(nom)
        .bind(telephone)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(chauffeur)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Chauffeur>, AppError> {
        let chauffeur =
            sqlx::query_as::<_, Chauffeur>("SELECT * FROM chauffeur WHERE id_chauffeur = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(chauffeur)
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<Chauffeur>, AppError> {
        let chauffeur =
            sqlx::query_as::<_, Chauffeur>("SELECT * FROM chauffeur WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(chauffeur)
    }

    pub async fn find_all(&self) -> Result<Vec<Chauffeur>, AppError> {
        let chauffeurs = sqlx::query_as::<_, Chauffeur>("SELECT * FROM chauffeur ORDER BY nom")
            .fetch_all(&self.pool)
            .await?;

        Ok(chauffeurs)
    }

    pub async fn update(
        &self,
        id: i32,
        nom: Option<String>,
        telephone: Option<String>,
        user_id: Option<i32>,
    ) -> Result<Chauffeur, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Chauffeur", id))?;

        let chauffeur = sqlx::query_as::<_, Chauffeur>(
            r#"
            UPDATE chauffeur
            SET nom = $2, telephone = $3, user_id = $4
            WHERE id_chauffeur = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nom.unwrap_or(current.nom))
        .bind(telephone.or(current.telephone))
        .bind(user_id.or(current.user_id))
        .fetch_one(&self.pool)
        .await?;

        Ok(chauffeur)
    }

    /// Desenlazar la cuenta utilisateur (al quitar el rol CHAUFFEUR)
    pub async fn unlink_user(&self, user_id: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE chauffeur SET user_id = NULL WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM chauffeur WHERE id_chauffeur = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Chauffeur", id));
        }
        Ok(())
    }
}
