//! SQLite-backed persistence gateway.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};
use tracing::debug;

use crate::error::StoreError;

use super::{ExecResult, Row, Store, Value};

/// A [`Store`] backed by a single SQLite connection.
///
/// The connection is shared process-wide behind a mutex; statements run on
/// tokio's blocking pool so request handlers never block the runtime.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open an existing database file (or create an empty one).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn =
            Connection::open(path.as_ref()).map_err(|e| StoreError::Connection(e.to_string()))?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self::from_connection(conn))
    }

    /// Create an in-memory database. Useful for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Execute a batch of semicolon-separated statements without parameters.
    pub async fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        let sql = sql.to_string();
        self.with_connection(move |conn| {
            conn.execute_batch(&sql)
                .map_err(|e| StoreError::Query(e.to_string()))
        })
        .await
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

fn to_sql(value: Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Integer(i),
        Value::Real(f) => SqlValue::Real(f),
        Value::Text(s) => SqlValue::Text(s),
        Value::Blob(b) => SqlValue::Blob(b),
    }
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>, StoreError> {
        debug!(sql = sql, params = params.len(), "query");

        let sql = sql.to_string();
        self.with_connection(move |conn| {
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| StoreError::Query(e.to_string()))?;

            let column_names: Vec<String> = stmt
                .column_names()
                .iter()
                .map(|name| name.to_string())
                .collect();

            let bound: Vec<SqlValue> = params.into_iter().map(to_sql).collect();
            let mut rows = stmt
                .query(params_from_iter(bound.iter()))
                .map_err(|e| StoreError::Query(e.to_string()))?;

            let mut result = Vec::new();
            while let Some(row) = rows.next().map_err(|e| StoreError::Query(e.to_string()))? {
                let mut columns = Vec::with_capacity(column_names.len());
                for (i, name) in column_names.iter().enumerate() {
                    let value = row
                        .get_ref(i)
                        .map_err(|e| StoreError::Query(e.to_string()))?;
                    columns.push((name.clone(), from_sql(value)));
                }
                result.push(Row { columns });
            }

            Ok(result)
        })
        .await
    }

    async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<ExecResult, StoreError> {
        debug!(sql = sql, params = params.len(), "execute");

        let sql = sql.to_string();
        self.with_connection(move |conn| {
            let bound: Vec<SqlValue> = params.into_iter().map(to_sql).collect();
            let affected = conn
                .execute(&sql, params_from_iter(bound.iter()))
                .map_err(|e| StoreError::Query(e.to_string()))?;

            Ok(ExecResult {
                affected_rows: affected as u64,
                last_insert_id: conn.last_insert_rowid(),
            })
        })
        .await
    }
}
