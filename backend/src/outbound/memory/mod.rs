//! Process-local adapters used when no database is configured.
//!
//! State lives behind a single `parking_lot::RwLock` per repository, so
//! every uniqueness check and the write it guards happen under one write
//! lock. Nothing survives a restart.

mod customization;
mod links;
mod usernames;

pub use customization::InMemoryCustomizationRepository;
pub use links::InMemoryLinkRepository;
pub use usernames::InMemoryUsernameRepository;
