//! Driving port for registry writes.
//!
//! Every operation requires a verified owner in the [`OwnerContext`].

use async_trait::async_trait;

use crate::domain::{
    AccentColor, Error, Handle, LinkId, LinkTitle, LinkUrl, OwnerContext, ProfileCustomization,
    ProfileDescription,
};

/// Validated title and URL for creating or editing a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDraft {
    /// Display title.
    pub title: LinkTitle,
    /// Target URL.
    pub url: LinkUrl,
}

/// Replacement presentation settings.
///
/// `None` clears the field back to the presentation default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomizationUpdate {
    /// New description.
    pub description: Option<ProfileDescription>,
    /// New accent colour.
    pub accent_color: Option<AccentColor>,
}

/// Write operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryCommand: Send + Sync {
    /// Claim `candidate` as the caller's handle.
    ///
    /// Failures carry display-ready messages: validation problems as
    /// `invalid_request`, a handle held by another owner as `conflict`.
    /// Re-claiming the caller's current handle succeeds without writing.
    async fn claim_handle(&self, ctx: &OwnerContext, candidate: &str) -> Result<Handle, Error>;

    /// Create a link for the caller and return its id.
    async fn create_link(&self, ctx: &OwnerContext, draft: LinkDraft) -> Result<LinkId, Error>;

    /// Edit one of the caller's links.
    async fn update_link(
        &self,
        ctx: &OwnerContext,
        id: &LinkId,
        draft: LinkDraft,
    ) -> Result<(), Error>;

    /// Delete one of the caller's links.
    async fn delete_link(&self, ctx: &OwnerContext, id: &LinkId) -> Result<(), Error>;

    /// Apply a client-proposed display order.
    ///
    /// Unknown ids and ids owned by someone else are dropped silently.
    async fn reorder_links(&self, ctx: &OwnerContext, proposed: Vec<LinkId>) -> Result<(), Error>;

    /// Replace the caller's presentation settings.
    async fn update_customization(
        &self,
        ctx: &OwnerContext,
        update: CustomizationUpdate,
    ) -> Result<ProfileCustomization, Error>;
}
