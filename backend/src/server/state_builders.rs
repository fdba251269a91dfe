//! Wiring of the registry service over Diesel or in-memory adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use linkbio::domain::RegistryService;
use linkbio::inbound::http::state::HttpState;
use linkbio::outbound::memory::{
    InMemoryCustomizationRepository, InMemoryLinkRepository, InMemoryUsernameRepository,
};
use linkbio::outbound::persistence::{
    DbPool, DieselCustomizationRepository, DieselLinkRepository, DieselUsernameRepository,
};

use super::ServerConfig;

fn diesel_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_service(Arc::new(RegistryService::new(
        Arc::new(DieselUsernameRepository::new(pool.clone())),
        Arc::new(DieselLinkRepository::new(pool.clone())),
        Arc::new(DieselCustomizationRepository::new(pool.clone())),
        clock,
    )))
}

fn in_memory_state(clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_service(Arc::new(RegistryService::new(
        Arc::new(InMemoryUsernameRepository::new()),
        Arc::new(InMemoryLinkRepository::new()),
        Arc::new(InMemoryCustomizationRepository::new()),
        clock,
    )))
}

/// Build the HTTP state, preferring PostgreSQL when a pool is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => diesel_state(pool, clock),
        None => {
            info!("no database configured; using in-memory registry");
            in_memory_state(clock)
        }
    };
    web::Data::new(state)
}
