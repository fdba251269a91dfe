//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised with mocks.

use std::sync::Arc;

use crate::domain::ports::{RegistryCommand, RegistryQuery};

/// Driving ports available to handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read side.
    pub query: Arc<dyn RegistryQuery>,
    /// Write side.
    pub command: Arc<dyn RegistryCommand>,
}

impl HttpState {
    /// Bundle the two ports.
    pub fn new(query: Arc<dyn RegistryQuery>, command: Arc<dyn RegistryCommand>) -> Self {
        Self { query, command }
    }

    /// State backed by one service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: RegistryQuery + RegistryCommand + 'static,
    {
        let query: Arc<dyn RegistryQuery> = service.clone();
        let command: Arc<dyn RegistryCommand> = service;
        Self { query, command }
    }
}
