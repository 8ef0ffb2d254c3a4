use sqlx::PgPool;

use crate::models::utilisateur::{Role, Utilisateur};
use crate::utils::errors::{not_found_error, AppError};

pub struct UtilisateurRepository {
    pool: PgPool,
}

impl UtilisateurRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Utilisateur>, AppError> {
        let utilisateur =
            sqlx::query_as::<_, Utilisateur>("SELECT * FROM utilisateur WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(utilisateur)
    }

    pub async fn find_clients(&self) -> Result<Vec<Utilisateur>, AppError> {
        let clients = sqlx::query_as::<_, Utilisateur>(
            "SELECT * FROM utilisateur WHERE role = 'CLIENT' ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Búsqueda por username para el selector de clientes del formulario web
    pub async fn search_by_username(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Utilisateur>, AppError> {
        let utilisateurs = sqlx::query_as::<_, Utilisateur>(
            r#"
            SELECT * FROM utilisateur
            WHERE username ILIKE '%' || $1 || '%'
            ORDER BY username
            LIMIT $2
            "#,
        )
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(utilisateurs)
    }

    pub async fn update_role(&self, id: i32, role: Role) -> Result<Utilisateur, AppError> {
        let utilisateur = sqlx::query_as::<_, Utilisateur>(
            "UPDATE utilisateur SET role = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Utilisateur", id))?;

        Ok(utilisateur)
    }

    pub async fn set_active(&self, id: i32, active: bool) -> Result<Utilisateur, AppError> {
        let utilisateur = sqlx::query_as::<_, Utilisateur>(
            "UPDATE utilisateur SET is_active = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Utilisateur", id))?;

        Ok(utilisateur)
    }
}
