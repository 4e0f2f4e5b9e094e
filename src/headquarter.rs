//! Headquarter lookup.
//!
//! Headquarters are the only principals that can log in. They are read-only
//! from this service's point of view.

use std::sync::Arc;

use serde::Serialize;

use crate::error::StoreError;
use crate::store::{Row, Store, Value};

const SELECT_BY_NAME: &str = "SELECT id, name FROM headquarter WHERE name = ?";

/// A headquarter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headquarter {
    pub id: i64,
    pub name: String,
}

impl Headquarter {
    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.get_i64("id")?,
            name: row.get_string("name")?,
        })
    }
}

/// Reads the `headquarter` table.
pub struct HeadquarterRepository<S: Store> {
    store: Arc<S>,
}

impl<S: Store> HeadquarterRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Find the first headquarter with this name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Headquarter>, StoreError> {
        let rows = self
            .store
            .query(SELECT_BY_NAME, vec![Value::from(name)])
            .await?;
        rows.first().map(Headquarter::from_row).transpose()
    }
}
