//! Shared fixtures for integration tests
//!
//! A seeded SQLite file in a temp directory, plus a provider wrapper that
//! counts how many connections were opened.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sqlexport::db::SqliteProvider;
use sqlexport::export::{Connection, ConnectionProvider, Dialect, ExportResult, ResultSet};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection as _, Executor};
use tempfile::TempDir;

/// Rows of `wp_posts`: (id, title, body)
pub const POSTS: [(i64, &str, Option<&str>); 7] = [
    (1, "Hello", Some("First post")),
    (2, "It's here", None),
    (3, "Literal null", Some("NULL")),
    (4, r"C:\path\to", Some(r#"say "hi""#)),
    (5, "Mixed 'q' \\ \"d\"", Some("line\nbreak")),
    (6, "Unicode and NUL", Some("héllo\0wörld")),
    (7, "Last", Some("")),
];

/// Seeded database file and the directory that owns it
pub struct Fixture {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn provider(&self) -> SqliteProvider {
        SqliteProvider::new(&self.path)
    }
}

/// Open (creating if missing) a writable SQLite connection
pub async fn open_writable(path: &Path) -> SqliteConnection {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    SqliteConnection::connect_with(&options)
        .await
        .expect("Failed to open sqlite database")
}

/// Create `name` in `dir` from `statements`
pub async fn database_from(dir: &TempDir, name: &str, statements: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut conn = open_writable(&path).await;
    for statement in statements {
        conn.execute(*statement).await.unwrap();
    }
    conn.close().await.unwrap();
    path
}

/// Create `site.sqlite` with three tables: `wp_posts` (7 rows),
/// `wp_options` (2 rows) and `wp_empty` (no rows)
pub async fn seeded_database() -> Fixture {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("site.sqlite");

    let mut conn = open_writable(&path).await;
    conn.execute("CREATE TABLE wp_posts (id INTEGER PRIMARY KEY, title TEXT NOT NULL, body TEXT)")
        .await
        .unwrap();
    conn.execute("CREATE TABLE wp_options (option_id INTEGER PRIMARY KEY, option_name TEXT)")
        .await
        .unwrap();
    conn.execute("CREATE TABLE wp_empty (id INTEGER)").await.unwrap();

    for (id, title, body) in POSTS {
        sqlx::query("INSERT INTO wp_posts (id, title, body) VALUES (?, ?, ?)")
            .bind(id)
            .bind(title)
            .bind(body)
            .execute(&mut conn)
            .await
            .unwrap();
    }
    conn.execute("INSERT INTO wp_options (option_id, option_name) VALUES (1, 'siteurl'), (2, 'home')")
        .await
        .unwrap();

    conn.close().await.unwrap();
    Fixture { dir, path }
}

/// Connections opened and closed through a [`CountingProvider`]
#[derive(Default)]
pub struct ConnectionCounts {
    connects: AtomicUsize,
    closes: AtomicUsize,
}

impl ConnectionCounts {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// Wraps a provider and counts `connect` and `close` calls
pub struct CountingProvider<P> {
    inner: P,
    counts: Arc<ConnectionCounts>,
}

impl<P> CountingProvider<P> {
    pub fn new(inner: P) -> (Self, Arc<ConnectionCounts>) {
        let counts = Arc::new(ConnectionCounts::default());
        (
            Self {
                inner,
                counts: Arc::clone(&counts),
            },
            counts,
        )
    }
}

#[async_trait]
impl<P: ConnectionProvider> ConnectionProvider for CountingProvider<P> {
    async fn connect(&self) -> ExportResult<Box<dyn Connection>> {
        self.counts.connects.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.connect().await?;
        Ok(Box::new(CountingConnection {
            inner,
            counts: Arc::clone(&self.counts),
        }))
    }
}

struct CountingConnection {
    inner: Box<dyn Connection>,
    counts: Arc<ConnectionCounts>,
}

#[async_trait]
impl Connection for CountingConnection {
    fn dialect(&self) -> Dialect {
        self.inner.dialect()
    }

    async fn query(&mut self, sql: &str) -> ExportResult<ResultSet> {
        self.inner.query(sql).await
    }

    async fn close(&mut self) {
        self.counts.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await;
    }
}
