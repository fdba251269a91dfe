//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between row structs and domain records and never
//! make business decisions. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module.
//!
//! ```ignore
//! use linkbio::outbound::persistence::{DbPool, DieselLinkRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/linkbio")).await?;
//! let links = DieselLinkRepository::new(pool);
//! ```

mod diesel_customization_repository;
mod diesel_link_repository;
mod diesel_username_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_customization_repository::DieselCustomizationRepository;
pub use diesel_link_repository::DieselLinkRepository;
pub use diesel_username_repository::DieselUsernameRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
