use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Pool, Postgres, Row};

use inkpress_core::{
    Email, NewUser, Password, User, UserId, UserStore, UserStoreError, UserUpdate, Username,
};

use super::password::{compute_password_hash, verify_password_hash};

const USER_COLUMNS: &str = "id, username, full_name, email, is_active";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

fn unexpected(e: impl std::fmt::Display) -> UserStoreError {
    UserStoreError::Unexpected(e.to_string())
}

fn row_to_user(row: &PgRow) -> Result<User, UserStoreError> {
    let username: String = row.try_get("username").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    Ok(User {
        id: UserId(row.try_get("id").map_err(unexpected)?),
        username: Username::try_from(username).map_err(unexpected)?,
        full_name: row.try_get("full_name").map_err(unexpected)?,
        email: Email::try_from(email).map_err(unexpected)?,
        is_active: row.try_get("is_active").map_err(unexpected)?,
    })
}

/// Map a constraint violation onto the uniqueness it guards.
fn map_constraint(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        match db_err.constraint() {
            Some(name) if name.contains("username") => return UserStoreError::UsernameTaken,
            Some(name) if name.contains("email") => return UserStoreError::EmailTaken,
            _ => {}
        }
    }
    unexpected(e)
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all, fields(username = %new_user.username))]
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password.clone())
            .await
            .map_err(unexpected)?;

        let row = sqlx::query(&format!(
            r#"
                INSERT INTO users (username, full_name, email, password_hash, is_active)
                VALUES ($1, $2, $3, $4, TRUE)
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_user.username.as_str())
        .bind(&new_user.full_name)
        .bind(new_user.email.as_str())
        .bind(password_hash.expose_secret())
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint)?;

        row_to_user(&row)
    }

    #[tracing::instrument(name = "Retrieving user by username from PostgreSQL", skip_all)]
    async fn get_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row_to_user(&row)
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn get_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row_to_user(&row)
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn authenticate(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE username = $1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        let password_hash: String = row.try_get("password_hash").map_err(unexpected)?;
        verify_password_hash(Secret::from(password_hash), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        row_to_user(&row)
    }

    #[tracing::instrument(name = "Updating user profile in PostgreSQL", skip_all)]
    async fn update_user(
        &self,
        username: &Username,
        update: UserUpdate,
    ) -> Result<User, UserStoreError> {
        if update.is_empty() {
            return self.get_by_username(username).await;
        }

        let mut builder =
            sqlx::QueryBuilder::<Postgres>::new("UPDATE users SET ");
        let mut fields = builder.separated(", ");
        if let Some(full_name) = &update.full_name {
            fields.push("full_name = ").push_bind_unseparated(full_name);
        }
        if let Some(email) = &update.email {
            fields.push("email = ").push_bind_unseparated(email.as_str());
        }
        if let Some(is_active) = update.is_active {
            fields.push("is_active = ").push_bind_unseparated(is_active);
        }
        builder
            .push(" WHERE username = ")
            .push_bind(username.as_str())
            .push(format!(" RETURNING {USER_COLUMNS}"));

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_constraint)?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row_to_user(&row)
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_password(
        &self,
        username: &Username,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(unexpected)?;

        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE username = $2")
            .bind(password_hash.expose_secret())
            .bind(username.as_str())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Delete user from user store", skip_all)]
    async fn delete_user(&self, username: &Username) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username.as_str())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}
