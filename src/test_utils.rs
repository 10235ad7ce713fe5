/// # Test Utilities Module
///
/// Fixtures shared by the unit tests:
/// - A sink recorder that captures every session notification
/// - A sample database file with a small schema and data

use crate::core::db::{DatabaseSession, SessionEvent};
use rusqlite::Connection;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Records every message delivered to a session's sinks, in order
#[derive(Debug, Clone, Default)]
pub struct SinkRecorder {
    events: Rc<RefCell<Vec<(SessionEvent, String)>>>,
}

impl SinkRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers all three sinks on `session`
    pub fn attach(&self, session: &mut DatabaseSession) {
        let connected = Rc::clone(&self.events);
        session.set_on_connected(move |m| {
            connected.borrow_mut().push((SessionEvent::Connected, m.to_string()))
        });
        let executed = Rc::clone(&self.events);
        session.set_on_query_executed(move |m| {
            executed.borrow_mut().push((SessionEvent::QueryExecuted, m.to_string()))
        });
        let errors = Rc::clone(&self.events);
        session.set_on_error(move |m| errors.borrow_mut().push((SessionEvent::Error, m.to_string())));
    }

    /// Messages received for one event kind
    pub fn messages(&self, event: SessionEvent) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == event)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

/// Creates `sample.db` in `dir` with users and posts, returning its path.
///
/// User 1 (alice) owns two posts, user 2 (bob) owns one.
pub fn sample_database(dir: &Path) -> PathBuf {
    let path = dir.join("sample.db");
    let conn = Connection::open(&path).expect("Failed to create sample database");
    conn.execute_batch(
        "
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE
        );

        CREATE TABLE posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
        );

        INSERT INTO users (username, email) VALUES ('alice', 'alice@example.com');
        INSERT INTO users (username, email) VALUES ('bob', 'bob@example.com');
        INSERT INTO users (username, email) VALUES ('charlie', 'charlie@example.com');

        INSERT INTO posts (user_id, title) VALUES (1, 'Welcome to Rust');
        INSERT INTO posts (user_id, title) VALUES (2, 'My Trip to Paris');
        INSERT INTO posts (user_id, title) VALUES (1, 'Building Terminal UIs');
    ",
    )
    .expect("Failed to populate sample database");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_database_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample_database(dir.path());

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }
}
