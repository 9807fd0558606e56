use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, Row};

use islands_types::User;

use crate::db::DbPool;

const USER_COLUMNS: &str = "user_id, user_name, real_name, age, gender, job, location";

pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get every user in insertion order
    pub fn get_all(&self) -> Result<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY user_id",
            USER_COLUMNS
        ))?;

        let users = stmt
            .query_map([], map_user)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load users")?;

        Ok(users)
    }

    /// Get user by ID
    pub fn get_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users WHERE user_id = ?",
            USER_COLUMNS
        ))?;

        let user = stmt.query_row([user_id], map_user).optional()?;
        Ok(user)
    }
}

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        user_id: row.get(0)?,
        user_name: row.get(1)?,
        real_name: row.get(2)?,
        age: row.get(3)?,
        gender: row.get(4)?,
        job: row.get(5)?,
        location: row.get(6)?,
    })
}
