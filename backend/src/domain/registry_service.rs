//! Registry façade implementing the driving ports.
//!
//! Composes the username registry, link store, and ordering engine, and
//! owns customization storage. Every owner-scoped operation starts from
//! [`OwnerContext::require`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use super::link_store::LinkStore;
use super::ordering::OrderingEngine;
use super::username_registry::UsernameRegistry;
use crate::domain::ports::{
    CustomizationRepository, CustomizationRepositoryError, CustomizationUpdate, LinkDraft,
    LinkRepository, RegistryCommand, RegistryQuery, UsernameRepository,
};
use crate::domain::{
    Error, Handle, HandleAvailability, LinkId, LinkRecord, OwnerContext, OwnerId,
    ProfileCustomization, PublicSlug,
};

const PROFILE_NOT_FOUND: &str = "profile not found";

/// Link-in-bio registry service.
#[derive(Clone)]
pub struct RegistryService<U, L, C> {
    usernames: UsernameRegistry<U>,
    links: LinkStore<L>,
    ordering: OrderingEngine<L>,
    customizations: Arc<C>,
}

impl<U, L, C> RegistryService<U, L, C> {
    /// Wire the service over its repositories.
    pub fn new(
        usernames: Arc<U>,
        links: Arc<L>,
        customizations: Arc<C>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            usernames: UsernameRegistry::new(usernames),
            links: LinkStore::new(Arc::clone(&links), clock),
            ordering: OrderingEngine::new(links),
            customizations,
        }
    }
}

fn map_customization_error(error: CustomizationRepositoryError) -> Error {
    match error {
        CustomizationRepositoryError::Connection { message } => Error::service_unavailable(
            format!("customization repository unavailable: {message}"),
        ),
        CustomizationRepositoryError::Query { message } => {
            Error::internal(format!("customization repository error: {message}"))
        }
    }
}

impl<U, L, C> RegistryService<U, L, C>
where
    U: UsernameRepository,
    L: LinkRepository,
    C: CustomizationRepository,
{
    async fn resolve_slug(&self, slug: &str) -> Result<OwnerId, Error> {
        if let Ok(handle) = Handle::new(slug) {
            if let Some(owner_id) = self.usernames.resolve(&handle).await? {
                return Ok(owner_id);
            }
        }

        // Profiles shared before a handle was claimed stay reachable by owner
        // id, but only once the owner has something to show.
        let Ok(owner_id) = OwnerId::new(slug) else {
            return Err(Error::not_found(PROFILE_NOT_FOUND));
        };
        if !self.links.has_links(&owner_id).await? {
            return Err(Error::not_found(PROFILE_NOT_FOUND));
        }
        debug!(owner_id = %owner_id, "slug resolved as raw owner id");
        Ok(owner_id)
    }

    async fn load_customization(&self, owner_id: &OwnerId) -> Result<ProfileCustomization, Error> {
        Ok(self
            .customizations
            .find_by_owner(owner_id)
            .await
            .map_err(map_customization_error)?
            .unwrap_or_else(|| ProfileCustomization::empty(owner_id.clone())))
    }
}

#[async_trait]
impl<U, L, C> RegistryQuery for RegistryService<U, L, C>
where
    U: UsernameRepository,
    L: LinkRepository,
    C: CustomizationRepository,
{
    async fn resolve_handle(&self, slug: &str) -> Result<OwnerId, Error> {
        self.resolve_slug(slug).await
    }

    async fn public_slug(&self, owner_id: &OwnerId) -> Result<PublicSlug, Error> {
        self.usernames.get_handle(owner_id).await
    }

    async fn current_slug(&self, ctx: &OwnerContext) -> Result<PublicSlug, Error> {
        let owner_id = ctx.require()?;
        self.usernames.get_handle(owner_id).await
    }

    async fn list_links_for_handle(&self, slug: &str) -> Result<Vec<LinkRecord>, Error> {
        let owner_id = self.resolve_slug(slug).await?;
        self.links.list_by_owner(&owner_id).await
    }

    async fn check_handle_availability(
        &self,
        ctx: &OwnerContext,
        candidate: &str,
    ) -> Result<HandleAvailability, Error> {
        self.usernames
            .check_availability(candidate, ctx.owner_id())
            .await
    }

    async fn list_links_for_owner(&self, ctx: &OwnerContext) -> Result<Vec<LinkRecord>, Error> {
        let owner_id = ctx.require()?;
        self.links.list_by_owner(owner_id).await
    }

    async fn count_links_for_owner(&self, ctx: &OwnerContext) -> Result<u64, Error> {
        let owner_id = ctx.require()?;
        self.links.count_by_owner(owner_id).await
    }

    async fn get_link(&self, ctx: &OwnerContext, id: &LinkId) -> Result<LinkRecord, Error> {
        let owner_id = ctx.require()?;
        self.links.get(owner_id, id).await
    }

    async fn customization_for_handle(&self, slug: &str) -> Result<ProfileCustomization, Error> {
        let owner_id = self.resolve_slug(slug).await?;
        self.load_customization(&owner_id).await
    }

    async fn customization_for_owner(
        &self,
        ctx: &OwnerContext,
    ) -> Result<ProfileCustomization, Error> {
        let owner_id = ctx.require()?;
        self.load_customization(owner_id).await
    }
}

#[async_trait]
impl<U, L, C> RegistryCommand for RegistryService<U, L, C>
where
    U: UsernameRepository,
    L: LinkRepository,
    C: CustomizationRepository,
{
    async fn claim_handle(&self, ctx: &OwnerContext, candidate: &str) -> Result<Handle, Error> {
        let owner_id = ctx.require()?;
        self.usernames.claim(owner_id, candidate).await
    }

    async fn create_link(&self, ctx: &OwnerContext, draft: LinkDraft) -> Result<LinkId, Error> {
        let owner_id = ctx.require()?;
        Ok(self.links.create(owner_id, draft).await?.id)
    }

    async fn update_link(
        &self,
        ctx: &OwnerContext,
        id: &LinkId,
        draft: LinkDraft,
    ) -> Result<(), Error> {
        let owner_id = ctx.require()?;
        self.links.update(owner_id, id, draft).await
    }

    async fn delete_link(&self, ctx: &OwnerContext, id: &LinkId) -> Result<(), Error> {
        let owner_id = ctx.require()?;
        self.links.delete(owner_id, id).await
    }

    async fn reorder_links(&self, ctx: &OwnerContext, proposed: Vec<LinkId>) -> Result<(), Error> {
        let owner_id = ctx.require()?;
        self.ordering.reorder(owner_id, proposed).await.map(|_| ())
    }

    async fn update_customization(
        &self,
        ctx: &OwnerContext,
        update: CustomizationUpdate,
    ) -> Result<ProfileCustomization, Error> {
        let owner_id = ctx.require()?;
        let customization = ProfileCustomization {
            owner_id: owner_id.clone(),
            description: update.description,
            accent_color: update.accent_color,
        };
        self.customizations
            .upsert(&customization)
            .await
            .map_err(map_customization_error)?;
        debug!(owner_id = %owner_id, "customization updated");
        Ok(customization)
    }
}
