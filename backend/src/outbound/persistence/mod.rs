//! Flat-file persistence: one JSON array document per collection.
//!
//! [`JsonStore`] owns the files and the writer discipline; the repository
//! types adapt it to the domain ports.

mod atomic_io;
mod collection;
mod error;
mod json_alert_repository;
mod json_incident_repository;
mod json_store;
mod json_user_repository;
mod seed;

pub use collection::Collection;
pub use error::StoreError;
pub use json_alert_repository::JsonAlertRepository;
pub use json_incident_repository::JsonIncidentRepository;
pub use json_store::JsonStore;
pub use json_user_repository::JsonUserRepository;
pub use seed::{SeedError, initialise_store};
