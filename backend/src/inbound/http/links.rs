//! Link handlers.
//!
//! ```text
//! GET    /api/v1/profiles/{slug}/links
//! GET    /api/v1/me/links
//! POST   /api/v1/me/links
//! GET    /api/v1/me/links/count
//! PUT    /api/v1/me/links/order
//! GET    /api/v1/me/links/{id}
//! PUT    /api/v1/me/links/{id}
//! DELETE /api/v1/me/links/{id}
//! ```
//!
//! `count` and `order` must be registered before the `{id}` routes.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::LinkRecord;
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    LINK_IDS, parse_link_draft, parse_link_id, parse_link_ids, require,
};

/// A link as shown on a profile or dashboard.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    /// Immutable link identifier.
    #[schema(example = "0b6f5c1e-0d8f-4a51-9a6e-0c1d2e3f4a5b")]
    pub id: String,
    /// Display title.
    #[schema(example = "My blog")]
    pub title: String,
    /// Absolute http(s) target.
    #[schema(example = "https://example.com")]
    pub url: String,
    /// Sort key; ascending keys give display order.
    pub order: i64,
}

impl From<LinkRecord> for LinkResponse {
    fn from(value: LinkRecord) -> Self {
        Self {
            id: value.id.into(),
            title: value.title.into(),
            url: value.url.into(),
            order: value.order.value(),
        }
    }
}

fn to_responses(records: Vec<LinkRecord>) -> Vec<LinkResponse> {
    records.into_iter().map(LinkResponse::from).collect()
}

/// Create or edit payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    #[schema(example = "My blog")]
    pub title: Option<String>,
    #[schema(example = "https://example.com")]
    pub url: Option<String>,
}

/// Identifier of a created link.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLinkResponse {
    pub id: String,
}

/// Proposed display order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    /// Link ids, first shown first. Unknown or foreign ids are ignored.
    pub link_ids: Option<Vec<String>>,
}

/// Number of links held by the caller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkCountResponse {
    pub count: u64,
}

/// Public links for a handle or raw owner id.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{slug}/links",
    params(("slug" = String, Path, description = "Handle or raw owner id")),
    responses(
        (status = 200, description = "Links in display order", body = [LinkResponse]),
        (status = 404, description = "No such profile", body = ErrorSchema)
    ),
    tags = ["links"],
    security([]),
    operation_id = "listLinksForHandle"
)]
#[get("/profiles/{slug}/links")]
pub async fn list_links_for_handle(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LinkResponse>>> {
    let records = state.query.list_links_for_handle(&path.into_inner()).await?;
    Ok(web::Json(to_responses(records)))
}

/// The caller's links.
#[utoipa::path(
    get,
    path = "/api/v1/me/links",
    responses(
        (status = 200, description = "Links in display order", body = [LinkResponse]),
        (status = 401, description = "No verified identity", body = ErrorSchema)
    ),
    tags = ["links"],
    operation_id = "listLinksForOwner"
)]
#[get("/me/links")]
pub async fn list_my_links(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<HttpResponse> {
    let records = state.query.list_links_for_owner(caller.context()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, no-cache"))
        .json(to_responses(records)))
}

/// Create a link at the end of the caller's list.
#[utoipa::path(
    post,
    path = "/api/v1/me/links",
    request_body = LinkRequest,
    responses(
        (status = 201, description = "Link created", body = CreatedLinkResponse),
        (status = 400, description = "Invalid title or URL", body = ErrorSchema),
        (status = 401, description = "No verified identity", body = ErrorSchema)
    ),
    tags = ["links"],
    operation_id = "createLink"
)]
#[post("/me/links")]
pub async fn create_link(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<LinkRequest>,
) -> ApiResult<HttpResponse> {
    let ctx = caller.context();
    ctx.require()?;
    let LinkRequest { title, url } = payload.into_inner();
    let draft = parse_link_draft(title, url)?;
    let id = state.command.create_link(ctx, draft).await?;
    Ok(HttpResponse::Created().json(CreatedLinkResponse { id: id.into() }))
}

/// Number of links the caller holds.
#[utoipa::path(
    get,
    path = "/api/v1/me/links/count",
    responses(
        (status = 200, description = "Link count", body = LinkCountResponse),
        (status = 401, description = "No verified identity", body = ErrorSchema)
    ),
    tags = ["links"],
    operation_id = "countLinksForOwner"
)]
#[get("/me/links/count")]
pub async fn count_my_links(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<LinkCountResponse>> {
    let count = state.query.count_links_for_owner(caller.context()).await?;
    Ok(web::Json(LinkCountResponse { count }))
}

/// Apply a new display order.
#[utoipa::path(
    put,
    path = "/api/v1/me/links/order",
    request_body = ReorderRequest,
    responses(
        (status = 204, description = "Order applied"),
        (status = 400, description = "Malformed id list", body = ErrorSchema),
        (status = 401, description = "No verified identity", body = ErrorSchema)
    ),
    tags = ["links"],
    operation_id = "reorderLinks"
)]
#[put("/me/links/order")]
pub async fn reorder_links(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<ReorderRequest>,
) -> ApiResult<HttpResponse> {
    let ctx = caller.context();
    ctx.require()?;
    let ids = parse_link_ids(require(payload.into_inner().link_ids, LINK_IDS)?)?;
    state.command.reorder_links(ctx, ids).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// One of the caller's links.
#[utoipa::path(
    get,
    path = "/api/v1/me/links/{id}",
    params(("id" = String, Path, description = "Link id")),
    responses(
        (status = 200, description = "The link", body = LinkResponse),
        (status = 403, description = "Owned by someone else", body = ErrorSchema),
        (status = 404, description = "No such link", body = ErrorSchema)
    ),
    tags = ["links"],
    operation_id = "getLink"
)]
#[get("/me/links/{id}")]
pub async fn get_link(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<LinkResponse>> {
    let id = parse_link_id(path.into_inner())?;
    let record = state.query.get_link(caller.context(), &id).await?;
    Ok(web::Json(record.into()))
}

/// Edit a link's title and URL; its position is kept.
#[utoipa::path(
    put,
    path = "/api/v1/me/links/{id}",
    params(("id" = String, Path, description = "Link id")),
    request_body = LinkRequest,
    responses(
        (status = 204, description = "Link updated"),
        (status = 400, description = "Invalid title or URL", body = ErrorSchema),
        (status = 403, description = "Owned by someone else", body = ErrorSchema),
        (status = 404, description = "No such link", body = ErrorSchema)
    ),
    tags = ["links"],
    operation_id = "updateLink"
)]
#[put("/me/links/{id}")]
pub async fn update_link(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<LinkRequest>,
) -> ApiResult<HttpResponse> {
    let ctx = caller.context();
    ctx.require()?;
    let id = parse_link_id(path.into_inner())?;
    let LinkRequest { title, url } = payload.into_inner();
    let draft = parse_link_draft(title, url)?;
    state.command.update_link(ctx, &id, draft).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a link permanently.
#[utoipa::path(
    delete,
    path = "/api/v1/me/links/{id}",
    params(("id" = String, Path, description = "Link id")),
    responses(
        (status = 204, description = "Link deleted"),
        (status = 403, description = "Owned by someone else", body = ErrorSchema),
        (status = 404, description = "No such link", body = ErrorSchema)
    ),
    tags = ["links"],
    operation_id = "deleteLink"
)]
#[delete("/me/links/{id}")]
pub async fn delete_link(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_link_id(path.into_inner())?;
    state.command.delete_link(caller.context(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
