//! SQL mapping for the `practitioners` table.

use std::sync::Arc;

use crate::error::StoreError;
use crate::store::{ExecResult, Store, Value};

use super::model::{Practitioner, PractitionerInput};

const SELECT_ALL: &str = "SELECT * FROM practitioners";

const SELECT_BY_ID: &str = "SELECT * FROM practitioners WHERE id = ?";

const INSERT: &str = "INSERT INTO practitioners \
     (first_name, last_name, birth_date, city_of_birth, age, weight, height, rank_id, grade_id) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";

const UPDATE: &str = "UPDATE practitioners SET \
     first_name = ?, last_name = ?, birth_date = ?, city_of_birth = ?, age = ?, \
     weight = ?, height = ?, rank_id = ?, grade_id = ? \
     WHERE id = ?";

const DELETE: &str = "DELETE FROM practitioners WHERE id = ?";

/// Translates practitioner CRUD intents into statements on a [`Store`].
pub struct PractitionerRepository<S: Store> {
    store: Arc<S>,
}

impl<S: Store> PractitionerRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All practitioners, in the store's default order.
    pub async fn find_all(&self) -> Result<Vec<Practitioner>, StoreError> {
        let rows = self.store.query(SELECT_ALL, Vec::new()).await?;
        rows.iter().map(Practitioner::from_row).collect()
    }

    /// The practitioner with the given id, if any.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Practitioner>, StoreError> {
        let rows = self.store.query(SELECT_BY_ID, vec![Value::Integer(id)]).await?;
        rows.first().map(Practitioner::from_row).transpose()
    }

    /// Insert a new row. The result carries the new id.
    pub async fn create(&self, input: PractitionerInput) -> Result<ExecResult, StoreError> {
        self.store.execute(INSERT, input.into_values()).await
    }

    /// Overwrite all nine mutable columns of the row with the given id.
    pub async fn update(
        &self,
        id: i64,
        input: PractitionerInput,
    ) -> Result<ExecResult, StoreError> {
        let mut params = input.into_values();
        params.push(Value::Integer(id));
        self.store.execute(UPDATE, params).await
    }

    pub async fn delete(&self, id: i64) -> Result<ExecResult, StoreError> {
        self.store.execute(DELETE, vec![Value::Integer(id)]).await
    }
}
