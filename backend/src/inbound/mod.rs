//! Inbound adapters translating external requests into driving-port calls.
//!
//! The HTTP adapter under [`http`] is the only transport; handlers see the
//! registry only through `RegistryQuery` and `RegistryCommand`.

pub mod http;
