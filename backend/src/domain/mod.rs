//! Domain primitives, services, and ports.
//!
//! Purpose: hold the registry's business rules independent of transport and
//! storage. Value types validate on construction, so anything holding a
//! [`Handle`], [`LinkTitle`], or [`OwnerId`] holds a valid one.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `OwnerContext`: verified caller identity for one request.
//! - `RegistryService`: implementation of the driving ports in [`ports`].

pub mod customization;
pub mod error;
pub mod handle;
pub mod link;
mod link_store;
mod ordering;
pub mod owner;
pub mod ports;
mod registry_service;
pub mod trace_id;
mod username_registry;

pub use self::customization::{
    AccentColor, CustomizationValidationError, DEFAULT_ACCENT_COLOR, DESCRIPTION_MAX,
    ProfileCustomization, ProfileDescription,
};
pub use self::error::{Error, ErrorCode};
pub use self::handle::{
    AvailabilityStatus, HANDLE_MAX, HANDLE_MIN, HANDLE_TAKEN_MESSAGE, Handle, HandleAvailability,
    HandleValidationError, PublicSlug, UsernameRecord,
};
pub use self::link::{
    LINK_TITLE_MAX, LINK_URL_MAX, LinkId, LinkRecord, LinkTitle, LinkUrl, LinkValidationError,
    OrderKey, sort_for_display,
};
pub use self::link_store::LinkStore;
pub use self::ordering::{OrderingEngine, ReorderOutcome};
pub use self::owner::{OWNER_ID_MAX, OwnerContext, OwnerId, OwnerIdValidationError, is_owned_by};
pub use self::registry_service::RegistryService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::username_registry::UsernameRegistry;
