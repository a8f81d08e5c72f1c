use async_trait::async_trait;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::storage::FavoritesStore;

const FAVORITES_KEY: &str = "favorite_clubs";

pub struct SqliteFavoritesStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFavoritesStore {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).context("Failed to open SQLite database")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn read_raw(&self) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();

        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![FAVORITES_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }
}

#[async_trait]
impl FavoritesStore for SqliteFavoritesStore {
    async fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        info!("Database migration completed");
        Ok(())
    }

    async fn load(&self) -> Vec<String> {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read stored favorites, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(clubs) => clubs,
            Err(e) => {
                warn!("Stored favorites are not valid JSON, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    async fn save(&self, clubs: &[String]) -> Result<()> {
        let value = serde_json::to_string(clubs)?;
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![FAVORITES_KEY, value],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn in_memory_store() -> SqliteFavoritesStore {
        SqliteFavoritesStore {
            conn: Arc::new(Mutex::new(Connection::open_in_memory().unwrap())),
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = in_memory_store();
        store.migrate().await.unwrap();

        let clubs = vec!["남촌".to_string(), "레이크힐스".to_string()];
        store.save(&clubs).await.unwrap();

        assert_eq!(store.load().await, clubs);
    }

    #[tokio::test]
    async fn save_overwrites_previous_value() {
        let store = in_memory_store();
        store.migrate().await.unwrap();

        store.save(&["남촌".to_string()]).await.unwrap();
        store.save(&["발안".to_string()]).await.unwrap();

        assert_eq!(store.load().await, vec!["발안".to_string()]);
    }

    #[tokio::test]
    async fn load_is_empty_when_nothing_stored() {
        let store = in_memory_store();
        store.migrate().await.unwrap();

        assert_eq!(store.load().await, Vec::<String>::new());
    }

    #[tokio::test]
    async fn load_degrades_to_empty_on_corrupted_value() {
        let store = in_memory_store();
        store.migrate().await.unwrap();

        {
            let conn = store.conn.lock().unwrap();
            conn.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)",
                params![FAVORITES_KEY, "{not json"],
            )
            .unwrap();
        }

        assert_eq!(store.load().await, Vec::<String>::new());
    }

    #[tokio::test]
    async fn load_degrades_to_empty_before_migration() {
        let store = in_memory_store();

        // No preferences table yet; the read error must stay internal.
        assert_eq!(store.load().await, Vec::<String>::new());
    }
}
