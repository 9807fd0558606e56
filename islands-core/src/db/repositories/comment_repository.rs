use anyhow::{Context, Result};
use rusqlite::Row;

use islands_types::Comment;

use crate::db::DbPool;

pub struct CommentRepository {
    pool: DbPool,
}

impl CommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get every comment in insertion order
    pub fn get_all(&self) -> Result<Vec<Comment>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT comment_id, user_id, post_id, content, comment_date
             FROM comments
             ORDER BY comment_id",
        )?;

        let comments = stmt
            .query_map([], map_comment)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load comments")?;

        Ok(comments)
    }
}

fn map_comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        comment_id: row.get(0)?,
        user_id: row.get(1)?,
        post_id: row.get(2)?,
        content: row.get(3)?,
        comment_date: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}
