//! Practitioner service.
//!
//! A thin façade over [`PractitionerRepository`]. Handlers only depend on this
//! type, so business rules that later apply to practitioners have one home.

use std::sync::Arc;

use crate::error::StoreError;
use crate::store::{ExecResult, Store};

use super::model::{Practitioner, PractitionerInput};
use super::repository::PractitionerRepository;

/// Service for listing, reading and mutating practitioners.
pub struct PractitionerService<S: Store> {
    repository: PractitionerRepository<S>,
}

impl<S: Store> PractitionerService<S> {
    /// Create a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            repository: PractitionerRepository::new(store),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Practitioner>, StoreError> {
        self.repository.find_all().await
    }

    /// Returns `None` when no practitioner has this id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Practitioner>, StoreError> {
        self.repository.find_by_id(id).await
    }

    pub async fn create(&self, input: PractitionerInput) -> Result<ExecResult, StoreError> {
        self.repository.create(input).await
    }

    pub async fn update(
        &self,
        id: i64,
        input: PractitionerInput,
    ) -> Result<ExecResult, StoreError> {
        self.repository.update(id, input).await
    }

    pub async fn delete(&self, id: i64) -> Result<ExecResult, StoreError> {
        self.repository.delete(id).await
    }
}
