use anyhow::{Context, Result};

use islands_types::View;

use crate::db::DbPool;

pub struct ViewRepository {
    pool: DbPool,
}

impl ViewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get every view in insertion order
    pub fn get_all(&self) -> Result<Vec<View>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT post_id, user_id, view_time FROM views ORDER BY view_id",
        )?;

        let views = stmt
            .query_map([], |row| {
                Ok(View {
                    post_id: row.get(0)?,
                    user_id: row.get(1)?,
                    view_time: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load views")?;

        Ok(views)
    }

    /// Number of times a post was viewed
    pub fn count_for_post(&self, post_id: i64) -> Result<i64> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM views WHERE post_id = ?",
            [post_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
