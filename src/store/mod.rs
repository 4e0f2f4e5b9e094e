//! Persistence gateway.
//!
//! Repositories talk to the relational store exclusively through the [`Store`]
//! trait: a parameterized query returns rows, a parameterized statement returns
//! an [`ExecResult`]. Rows are materialized per call and never cached.
//!
//! ```text
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │ PractitionerRepository   │   │ HeadquarterRepository    │
//! └────────────┬─────────────┘   └────────────┬─────────────┘
//!              └───────────────┬──────────────┘
//!                              ▼
//!                    ┌──────────────────┐
//!                    │   Store trait    │
//!                    └────────┬─────────┘
//!                             ▼
//!                    ┌──────────────────┐
//!                    │   SqliteStore    │
//!                    └──────────────────┘
//! ```

mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::StoreError;

// =============================================================================
// Values and Rows
// =============================================================================

/// A dynamically-typed SQL parameter or column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

/// A row returned from a query: column name to value, in select order.
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub columns: Vec<(String, Value)>,
}

impl Row {
    /// Get a column value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Read an integer column, failing if it is missing or not an integer.
    pub fn get_i64(&self, name: &str) -> Result<i64, StoreError> {
        match self.get(name) {
            Some(Value::Integer(i)) => Ok(*i),
            other => Err(decode_error(name, "integer", other)),
        }
    }

    /// Read a real column. Integer values are widened.
    pub fn get_f64(&self, name: &str) -> Result<f64, StoreError> {
        match self.get(name) {
            Some(Value::Real(f)) => Ok(*f),
            Some(Value::Integer(i)) => Ok(*i as f64),
            other => Err(decode_error(name, "real", other)),
        }
    }

    /// Read a text column.
    pub fn get_string(&self, name: &str) -> Result<String, StoreError> {
        match self.get(name) {
            Some(Value::Text(s)) => Ok(s.clone()),
            other => Err(decode_error(name, "text", other)),
        }
    }

    /// Like [`Row::get_i64`], but a NULL value reads as `None`.
    pub fn get_opt_i64(&self, name: &str) -> Result<Option<i64>, StoreError> {
        match self.get(name) {
            Some(Value::Null) => Ok(None),
            _ => self.get_i64(name).map(Some),
        }
    }

    /// Like [`Row::get_f64`], but a NULL value reads as `None`.
    pub fn get_opt_f64(&self, name: &str) -> Result<Option<f64>, StoreError> {
        match self.get(name) {
            Some(Value::Null) => Ok(None),
            _ => self.get_f64(name).map(Some),
        }
    }

    /// Like [`Row::get_string`], but a NULL value reads as `None`.
    pub fn get_opt_string(&self, name: &str) -> Result<Option<String>, StoreError> {
        match self.get(name) {
            Some(Value::Null) => Ok(None),
            _ => self.get_string(name).map(Some),
        }
    }
}

fn decode_error(column: &str, expected: &str, found: Option<&Value>) -> StoreError {
    let message = match found {
        None => "column missing".to_string(),
        Some(value) => format!("expected {}, found {:?}", expected, value),
    };
    StoreError::Decode {
        column: column.to_string(),
        message,
    }
}

/// Outcome of an INSERT, UPDATE or DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Number of rows changed by the statement
    pub affected_rows: u64,

    /// Rowid of the most recent successful insert on the connection
    pub last_insert_id: i64,
}

// =============================================================================
// Store Trait
// =============================================================================

/// Executes parameterized SQL against a relational store.
///
/// Parameters are positional (`?`) and passed by value so implementations can
/// move them onto a blocking thread.
#[async_trait]
pub trait Store: Send + Sync {
    /// Run a query and return every row it yields.
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>, StoreError>;

    /// Run a statement that modifies data.
    async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<ExecResult, StoreError>;
}
