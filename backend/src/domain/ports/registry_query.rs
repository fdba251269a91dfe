//! Driving port for registry reads.
//!
//! Public reads take a slug that may be a claimed handle or a raw owner id.
//! Owner-scoped reads take the caller's [`OwnerContext`] and fail with
//! `unauthorized` when it carries no verified owner.

use async_trait::async_trait;

use crate::domain::{
    Error, HandleAvailability, LinkId, LinkRecord, OwnerContext, OwnerId, ProfileCustomization,
    PublicSlug,
};

/// Read operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryQuery: Send + Sync {
    /// Resolve a public slug to its owner.
    ///
    /// A claimed handle wins. Otherwise the slug is accepted as a raw owner
    /// id only if that owner has at least one link; anything else is
    /// `not_found`.
    async fn resolve_handle(&self, slug: &str) -> Result<OwnerId, Error>;

    /// Stable public identity of an owner: its handle, or the owner id itself.
    async fn public_slug(&self, owner_id: &OwnerId) -> Result<PublicSlug, Error>;

    /// Public slug of the calling owner.
    async fn current_slug(&self, ctx: &OwnerContext) -> Result<PublicSlug, Error>;

    /// Links of the owner behind `slug`, in display order.
    async fn list_links_for_handle(&self, slug: &str) -> Result<Vec<LinkRecord>, Error>;

    /// Whether `candidate` can be claimed.
    ///
    /// Identity is optional; when present, the caller's own handle is
    /// reported as current rather than taken.
    async fn check_handle_availability(
        &self,
        ctx: &OwnerContext,
        candidate: &str,
    ) -> Result<HandleAvailability, Error>;

    /// The caller's links, in display order.
    async fn list_links_for_owner(&self, ctx: &OwnerContext) -> Result<Vec<LinkRecord>, Error>;

    /// Number of links the caller holds.
    async fn count_links_for_owner(&self, ctx: &OwnerContext) -> Result<u64, Error>;

    /// One of the caller's links.
    async fn get_link(&self, ctx: &OwnerContext, id: &LinkId) -> Result<LinkRecord, Error>;

    /// Presentation settings of the owner behind `slug`.
    async fn customization_for_handle(&self, slug: &str) -> Result<ProfileCustomization, Error>;

    /// The caller's presentation settings.
    async fn customization_for_owner(
        &self,
        ctx: &OwnerContext,
    ) -> Result<ProfileCustomization, Error>;
}
