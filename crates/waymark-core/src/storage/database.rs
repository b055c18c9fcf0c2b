//! SQLite-backed section store.
//!
//! Provides persistent storage for:
//! - Saved section answer documents, keyed by (user, section)
//! - A key-value store for host state (e.g. a serialized engine snapshot)

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreError;

use super::{data_dir, SectionAnswers, SectionStore};

/// SQLite database holding answer documents.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/waymark/waymark.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|e| StoreError::OpenFailed {
            path: std::path::PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Self::open_at(&dir.join("waymark.db"))
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::OpenFailed {
            path: std::path::PathBuf::from(":memory:"),
            message: e.to_string(),
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS section_answers (
                    user_id    TEXT NOT NULL,
                    section_id TEXT NOT NULL,
                    document   TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    PRIMARY KEY (user_id, section_id)
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_section_answers_user
                    ON section_answers(user_id);",
            )
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))
    }

    /// Delete one stored section document.
    pub fn clear(&self, user_id: &str, section_id: &str) -> Result<bool, StoreError> {
        let affected = self.conn.execute(
            "DELETE FROM section_answers WHERE user_id = ?1 AND section_id = ?2",
            params![user_id, section_id],
        )?;
        Ok(affected > 0)
    }

    /// Delete every stored section document for a user. Returns the count.
    pub fn clear_all(&self, user_id: &str) -> Result<usize, StoreError> {
        let affected = self.conn.execute(
            "DELETE FROM section_answers WHERE user_id = ?1",
            params![user_id],
        )?;
        Ok(affected)
    }

    /// Section ids a user has saved, in save order.
    pub fn saved_sections(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT section_id FROM section_answers WHERE user_id = ?1 ORDER BY updated_at",
        )?;
        let rows = stmt.query_map(params![user_id], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(result)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl SectionStore for Database {
    fn load(
        &self,
        user_id: &str,
        section_id: &str,
    ) -> Result<Option<SectionAnswers>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT document FROM section_answers WHERE user_id = ?1 AND section_id = ?2",
        )?;
        let json = stmt
            .query_row(params![user_id, section_id], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        match json {
            Some(json) => {
                let doc = serde_json::from_str(&json)
                    .map_err(|e| StoreError::SerializeFailed(e.to_string()))?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    fn save(
        &self,
        user_id: &str,
        section_id: &str,
        answers: &SectionAnswers,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(answers)
            .map_err(|e| StoreError::SerializeFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO section_answers (user_id, section_id, document, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, section_id, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::AnswerValue;

    fn sample_doc() -> SectionAnswers {
        let mut doc = SectionAnswers::new();
        doc.insert("story", AnswerValue::Text("a story".into()));
        doc.insert(
            "motivations",
            AnswerValue::List(vec!["Problem solving".into(), "User impact".into()]),
        );
        doc.insert("clarity", AnswerValue::Number(60));
        doc
    }

    #[test]
    fn save_load_round_trip() {
        let db = Database::open_memory().unwrap();
        assert!(db.load("u", "identity").unwrap().is_none());

        let doc = sample_doc();
        db.save("u", "identity", &doc).unwrap();
        assert_eq!(db.load("u", "identity").unwrap().unwrap(), doc);
    }

    #[test]
    fn save_overwrites_previous_document() {
        let db = Database::open_memory().unwrap();
        db.save("u", "identity", &sample_doc()).unwrap();

        let mut updated = sample_doc();
        updated.insert("story", AnswerValue::Text("a different story".into()));
        db.save("u", "identity", &updated).unwrap();

        assert_eq!(db.load("u", "identity").unwrap().unwrap(), updated);
    }

    #[test]
    fn documents_are_keyed_per_user_and_section() {
        let db = Database::open_memory().unwrap();
        db.save("alice", "identity", &sample_doc()).unwrap();

        assert!(db.load("bob", "identity").unwrap().is_none());
        assert!(db.load("alice", "technical").unwrap().is_none());
    }

    #[test]
    fn clear_removes_documents() {
        let db = Database::open_memory().unwrap();
        db.save("u", "identity", &sample_doc()).unwrap();
        db.save("u", "technical", &sample_doc()).unwrap();

        assert!(db.clear("u", "identity").unwrap());
        assert!(!db.clear("u", "identity").unwrap());
        assert_eq!(db.clear_all("u").unwrap(), 1);
        assert!(db.saved_sections("u").unwrap().is_empty());
    }

    #[test]
    fn on_disk_documents_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waymark.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.save("u", "identity", &sample_doc()).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.load("u", "identity").unwrap().unwrap(), sample_doc());
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }
}
