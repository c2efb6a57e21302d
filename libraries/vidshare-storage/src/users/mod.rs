//! User management and authentication queries

use crate::{from_millis, now_millis};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use vidshare_core::{
    error::Result,
    types::{CreateUser, User, UserId, UserProfile},
};

const USER_COLUMNS: &str = "id, username, full_name, avatar, created_at";

/// Create a user and store its credentials in one transaction
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `user` - Profile fields for the new account
/// * `password_hash` - Hashed password (should already be hashed with bcrypt)
///
/// A taken username surfaces as `CoreError::Duplicate`.
pub async fn create(pool: &SqlitePool, user: CreateUser, password_hash: &str) -> Result<User> {
    let id = UserId::generate();
    let created_at = now_millis();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO users (id, username, full_name, avatar, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&user.username)
    .bind(&user.full_name)
    .bind(&user.avatar)
    .bind(created_at)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO user_credentials (user_id, password_hash, updated_at) VALUES (?, ?, ?)",
    )
    .bind(&id)
    .bind(password_hash)
    .bind(created_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(User {
        id,
        username: user.username,
        full_name: user.full_name,
        avatar: user.avatar,
        created_at: from_millis(created_at)?,
    })
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get user by login name
pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
        .bind(username)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get user's password hash for authentication
///
/// Returns `None` if the user has no credentials
pub async fn get_password_hash(pool: &SqlitePool, user_id: &UserId) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM user_credentials WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.try_get("password_hash")).transpose()?)
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY username"))
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        full_name: row.try_get("full_name")?,
        avatar: row.try_get("avatar")?,
        created_at: from_millis(row.try_get("created_at")?)?,
    })
}

/// Read a populated author from the `owner_*` aliases used by joined queries
pub(crate) fn profile_from_row(row: &SqliteRow) -> Result<UserProfile> {
    Ok(UserProfile {
        id: row.try_get("owner_id")?,
        username: row.try_get("owner_username")?,
        full_name: row.try_get("owner_full_name")?,
        avatar: row.try_get("owner_avatar")?,
    })
}
