//! Handle lookup and claim handlers.
//!
//! ```text
//! GET /api/v1/handles/{handle}/owner
//! GET /api/v1/handles/{handle}/availability
//! GET /api/v1/owners/{ownerId}/slug
//! GET /api/v1/me/handle
//! PUT /api/v1/me/handle
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AvailabilityStatus, Error, HandleAvailability, OwnerId, PublicSlug};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{HANDLE, require};

/// Owner behind a public slug.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    #[schema(example = "user_2abc")]
    pub owner_id: String,
}

/// Result of an availability check.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Whether the candidate can be claimed.
    pub available: bool,
    /// `available`, `taken`, `current` or `invalid`.
    #[schema(example = "taken")]
    pub status: String,
    /// Display-ready explanation when not available.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Username is already taken")]
    pub reason: Option<String>,
}

fn status_label(status: AvailabilityStatus) -> &'static str {
    match status {
        AvailabilityStatus::Available => "available",
        AvailabilityStatus::Taken => "taken",
        AvailabilityStatus::Current => "current",
        AvailabilityStatus::Invalid => "invalid",
    }
}

impl From<HandleAvailability> for AvailabilityResponse {
    fn from(value: HandleAvailability) -> Self {
        Self {
            available: value.is_available(),
            status: status_label(value.status).to_owned(),
            reason: value.reason,
        }
    }
}

/// Public identity of an owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlugResponse {
    /// The handle, or the owner id when no handle is claimed.
    #[schema(example = "ada")]
    pub slug: String,
    /// Whether `slug` is a claimed handle.
    pub is_handle: bool,
}

impl From<PublicSlug> for SlugResponse {
    fn from(value: PublicSlug) -> Self {
        Self {
            is_handle: value.is_handle(),
            slug: value.as_str().to_owned(),
        }
    }
}

/// Handle claim payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimHandleRequest {
    #[schema(example = "ada")]
    pub handle: Option<String>,
}

/// Claimed handle.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandleResponse {
    #[schema(example = "ada")]
    pub handle: String,
}

/// Resolve a handle, or a raw owner id with links, to its owner.
#[utoipa::path(
    get,
    path = "/api/v1/handles/{handle}/owner",
    params(("handle" = String, Path, description = "Handle or raw owner id")),
    responses(
        (status = 200, description = "Owner found", body = OwnerResponse),
        (status = 404, description = "No such profile", body = ErrorSchema)
    ),
    tags = ["handles"],
    security([]),
    operation_id = "resolveHandle"
)]
#[get("/handles/{handle}/owner")]
pub async fn resolve_handle(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OwnerResponse>> {
    let owner_id = state.query.resolve_handle(&path.into_inner()).await?;
    Ok(web::Json(OwnerResponse {
        owner_id: owner_id.into(),
    }))
}

/// Check whether a handle can be claimed.
#[utoipa::path(
    get,
    path = "/api/v1/handles/{handle}/availability",
    params(("handle" = String, Path, description = "Candidate handle")),
    responses(
        (status = 200, description = "Availability verdict", body = AvailabilityResponse),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["handles"],
    operation_id = "checkHandleAvailability"
)]
#[get("/handles/{handle}/availability")]
pub async fn check_availability(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<AvailabilityResponse>> {
    let verdict = state
        .query
        .check_handle_availability(caller.context(), &path.into_inner())
        .await?;
    Ok(web::Json(verdict.into()))
}

/// Public slug for an owner id.
#[utoipa::path(
    get,
    path = "/api/v1/owners/{ownerId}/slug",
    params(("ownerId" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Public slug", body = SlugResponse),
        (status = 400, description = "Malformed owner id", body = ErrorSchema)
    ),
    tags = ["handles"],
    security([]),
    operation_id = "publicSlug"
)]
#[get("/owners/{owner_id}/slug")]
pub async fn public_slug(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SlugResponse>> {
    let owner_id = OwnerId::new(path.into_inner()).map_err(|error| {
        Error::invalid_request(error.to_string())
            .with_details(serde_json::json!({"field": "ownerId", "code": "invalid_owner_id"}))
    })?;
    let slug = state.query.public_slug(&owner_id).await?;
    Ok(web::Json(slug.into()))
}

/// The caller's public slug.
#[utoipa::path(
    get,
    path = "/api/v1/me/handle",
    responses(
        (status = 200, description = "Caller's slug", body = SlugResponse),
        (status = 401, description = "No verified identity", body = ErrorSchema)
    ),
    tags = ["handles"],
    operation_id = "currentSlug"
)]
#[get("/me/handle")]
pub async fn current_slug(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<SlugResponse>> {
    let slug = state.query.current_slug(caller.context()).await?;
    Ok(web::Json(slug.into()))
}

/// Claim or change the caller's handle.
#[utoipa::path(
    put,
    path = "/api/v1/me/handle",
    request_body = ClaimHandleRequest,
    responses(
        (status = 200, description = "Handle claimed", body = HandleResponse),
        (status = 400, description = "Invalid handle", body = ErrorSchema),
        (status = 401, description = "No verified identity", body = ErrorSchema),
        (status = 409, description = "Handle taken", body = ErrorSchema)
    ),
    tags = ["handles"],
    operation_id = "claimHandle"
)]
#[put("/me/handle")]
pub async fn claim_handle(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<ClaimHandleRequest>,
) -> ApiResult<HttpResponse> {
    let ctx = caller.context();
    ctx.require()?;
    let candidate = require(payload.into_inner().handle, HANDLE)?;
    let handle = state.command.claim_handle(ctx, &candidate).await?;
    Ok(HttpResponse::Ok().json(HandleResponse {
        handle: handle.into(),
    }))
}
