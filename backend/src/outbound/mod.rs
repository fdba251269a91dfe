//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: process-local repositories for running without a database.
//!
//! Adapters translate between storage representations and domain types and
//! hold no business logic.

pub mod memory;
pub mod persistence;
