//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters and
//! report failures through typed error enums. Driving ports
//! ([`RegistryQuery`], [`RegistryCommand`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod customization_repository;
mod link_repository;
mod registry_command;
mod registry_query;
mod username_repository;

#[cfg(test)]
pub use customization_repository::MockCustomizationRepository;
pub use customization_repository::{CustomizationRepository, CustomizationRepositoryError};
#[cfg(test)]
pub use link_repository::MockLinkRepository;
pub use link_repository::{LinkRepository, LinkRepositoryError};
#[cfg(test)]
pub use registry_command::MockRegistryCommand;
pub use registry_command::{CustomizationUpdate, LinkDraft, RegistryCommand};
#[cfg(test)]
pub use registry_query::MockRegistryQuery;
pub use registry_query::RegistryQuery;
#[cfg(test)]
pub use username_repository::MockUsernameRepository;
pub use username_repository::{UsernameRepository, UsernameRepositoryError};
