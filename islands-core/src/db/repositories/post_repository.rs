use anyhow::{Context, Result};
use rusqlite::Row;

use islands_types::Post;

use crate::db::DbPool;

pub struct PostRepository {
    pool: DbPool,
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get every post in insertion order
    pub fn get_all(&self) -> Result<Vec<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT post_id, user_id, content, post_date FROM posts ORDER BY post_id",
        )?;

        let posts = stmt
            .query_map([], map_post)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load posts")?;

        Ok(posts)
    }
}

fn map_post(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        post_id: row.get(0)?,
        user_id: row.get(1)?,
        content: row.get(2)?,
        post_date: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}
