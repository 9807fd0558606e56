use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::Row;

use islands_types::{Connection, ConnectionType};

use crate::db::DbPool;

pub struct ConnectionRepository {
    pool: DbPool,
}

impl ConnectionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get every connection in insertion order, duplicates included
    pub fn get_all(&self) -> Result<Vec<Connection>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT connection_id, user_id, target_user_id, connection_type
             FROM connections
             ORDER BY connection_id",
        )?;

        let connections = stmt
            .query_map([], map_connection)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to load connections")?;

        Ok(connections)
    }

    /// Count connections grouped by type, in [`ConnectionType::ALL`] order
    pub fn count_by_type(&self) -> Result<Vec<(ConnectionType, i64)>> {
        let conn = self.pool.get()?;
        ConnectionType::ALL
            .iter()
            .map(|kind| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM connections WHERE connection_type = ?",
                    [kind.as_str()],
                    |row| row.get(0),
                )?;
                Ok((*kind, count))
            })
            .collect()
    }
}

fn map_connection(row: &Row<'_>) -> rusqlite::Result<Connection> {
    let raw: String = row.get(3)?;
    let connection_type = ConnectionType::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            format!("unknown connection type '{}'", raw).into(),
        )
    })?;

    Ok(Connection {
        connection_id: row.get(0)?,
        user_id: row.get(1)?,
        target_user_id: row.get(2)?,
        connection_type,
    })
}
