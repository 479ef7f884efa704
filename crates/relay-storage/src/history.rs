//! Entered-query history

use chrono::Utc;

use crate::Database;
use crate::Result;

/// Store of previously entered queries, counted per entry.
pub struct QueryHistory {
    db: Database,
}

impl QueryHistory {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record one use of a query, creating the entry on first use.
    pub fn record(&self, query: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO query_history (query, hits, last_used_at) VALUES (?1, 1, ?2)
                 ON CONFLICT(query) DO UPDATE SET hits = hits + 1, last_used_at = ?2",
                rusqlite::params![query, now],
            )?;
            Ok(())
        })
    }

    /// Queries containing `fragment`, most used first, recency breaking ties.
    pub fn matching(&self, fragment: &str, limit: usize) -> Result<Vec<String>> {
        self.db.with_connection(|conn| {
            let pattern = format!("%{}%", fragment);

            let mut stmt = conn.prepare(
                "SELECT query FROM query_history
                 WHERE query LIKE ?1
                 ORDER BY hits DESC, last_used_at DESC
                 LIMIT ?2",
            )?;

            let queries: Vec<String> = stmt
                .query_map(rusqlite::params![pattern, limit as i64], |row| row.get(0))?
                .filter_map(|r| r.ok())
                .collect();

            Ok(queries)
        })
    }

    /// Number of times a query has been entered.
    pub fn hits(&self, query: &str) -> Result<i64> {
        self.db.with_connection(|conn| {
            let hits = conn
                .query_row(
                    "SELECT hits FROM query_history WHERE query = ?1",
                    [query],
                    |row| row.get(0),
                )
                .unwrap_or(0);
            Ok(hits)
        })
    }

    /// Forget everything.
    pub fn clear(&self) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute("DELETE FROM query_history", [])?;
            Ok(())
        })
    }
}

impl Clone for QueryHistory {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
