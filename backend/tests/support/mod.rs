//! Shared helpers for the registry integration suites.
//!
//! Integration tests compile as separate crates, so each suite declares
//! `mod support;` and uses whichever helpers it needs.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, TimeZone, Utc};
use linkbio::domain::{OwnerContext, OwnerId, RegistryService};
use linkbio::outbound::memory::{
    InMemoryCustomizationRepository, InMemoryLinkRepository, InMemoryUsernameRepository,
};
use mockable::Clock;

/// Registry service over the in-memory adapters.
pub type MemoryRegistry = RegistryService<
    InMemoryUsernameRepository,
    InMemoryLinkRepository,
    InMemoryCustomizationRepository,
>;

/// Clock advancing one second on every read.
///
/// Links created in sequence get strictly increasing recency keys.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl Default for SteppingClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid start time");
        Self {
            start,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + chrono::Duration::seconds(tick)
    }
}

/// Clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock(pub DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fresh in-memory registry driven by a [`SteppingClock`].
pub fn memory_registry() -> Arc<MemoryRegistry> {
    memory_registry_with_clock(Arc::new(SteppingClock::default()))
}

/// Fresh in-memory registry reading time from `clock`.
pub fn memory_registry_with_clock(clock: Arc<dyn Clock>) -> Arc<MemoryRegistry> {
    Arc::new(RegistryService::new(
        Arc::new(InMemoryUsernameRepository::new()),
        Arc::new(InMemoryLinkRepository::new()),
        Arc::new(InMemoryCustomizationRepository::new()),
        clock,
    ))
}

/// Verified context for `owner`.
pub fn owner_ctx(owner: &str) -> OwnerContext {
    OwnerContext::verified(OwnerId::new(owner).expect("valid owner id"))
}
