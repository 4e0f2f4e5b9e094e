//! Practitioner records.
//!
//! ```text
//! handlers ──▶ PractitionerService ──▶ PractitionerRepository ──▶ Store
//! ```

mod model;
mod repository;
mod service;

pub use model::{Practitioner, PractitionerInput};
pub use repository::PractitionerRepository;
pub use service::PractitionerService;
