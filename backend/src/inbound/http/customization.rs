//! Profile customization handlers.
//!
//! ```text
//! GET /api/v1/profiles/{slug}/customization
//! GET /api/v1/me/customization
//! PUT /api/v1/me/customization
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CustomizationUpdate;
use crate::domain::{AccentColor, ProfileCustomization, ProfileDescription};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::customization_error;

/// Presentation settings with defaults filled in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationResponse {
    #[schema(example = "Designer and occasional writer.")]
    pub description: Option<String>,
    #[schema(example = "#6366f1")]
    pub accent_color: String,
}

impl From<ProfileCustomization> for CustomizationResponse {
    fn from(value: ProfileCustomization) -> Self {
        let accent_color = value.accent_color_or_default().to_owned();
        Self {
            description: value.description.map(String::from),
            accent_color,
        }
    }
}

/// Replacement settings; omitted fields reset to the default.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationRequest {
    pub description: Option<String>,
    #[schema(example = "#0f172a")]
    pub accent_color: Option<String>,
}

impl TryFrom<CustomizationRequest> for CustomizationUpdate {
    type Error = crate::domain::Error;

    fn try_from(value: CustomizationRequest) -> Result<Self, Self::Error> {
        let description = value
            .description
            .filter(|text| !text.trim().is_empty())
            .map(ProfileDescription::new)
            .transpose()
            .map_err(customization_error)?;
        let accent_color = value
            .accent_color
            .map(AccentColor::new)
            .transpose()
            .map_err(customization_error)?;
        Ok(Self {
            description,
            accent_color,
        })
    }
}

/// Public presentation settings for a handle or raw owner id.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{slug}/customization",
    params(("slug" = String, Path, description = "Handle or raw owner id")),
    responses(
        (status = 200, description = "Presentation settings", body = CustomizationResponse),
        (status = 404, description = "No such profile", body = ErrorSchema)
    ),
    tags = ["customization"],
    security([]),
    operation_id = "customizationForHandle"
)]
#[get("/profiles/{slug}/customization")]
pub async fn customization_for_handle(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CustomizationResponse>> {
    let settings = state
        .query
        .customization_for_handle(&path.into_inner())
        .await?;
    Ok(web::Json(settings.into()))
}

/// The caller's presentation settings.
#[utoipa::path(
    get,
    path = "/api/v1/me/customization",
    responses(
        (status = 200, description = "Presentation settings", body = CustomizationResponse),
        (status = 401, description = "No verified identity", body = ErrorSchema)
    ),
    tags = ["customization"],
    operation_id = "customizationForOwner"
)]
#[get("/me/customization")]
pub async fn my_customization(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<CustomizationResponse>> {
    let settings = state.query.customization_for_owner(caller.context()).await?;
    Ok(web::Json(settings.into()))
}

/// Replace the caller's presentation settings.
#[utoipa::path(
    put,
    path = "/api/v1/me/customization",
    request_body = CustomizationRequest,
    responses(
        (status = 200, description = "Stored settings", body = CustomizationResponse),
        (status = 400, description = "Invalid description or colour", body = ErrorSchema),
        (status = 401, description = "No verified identity", body = ErrorSchema)
    ),
    tags = ["customization"],
    operation_id = "updateCustomization"
)]
#[put("/me/customization")]
pub async fn update_customization(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CustomizationRequest>,
) -> ApiResult<web::Json<CustomizationResponse>> {
    let ctx = caller.context();
    ctx.require()?;
    let update = CustomizationUpdate::try_from(payload.into_inner())?;
    let stored = state.command.update_customization(ctx, update).await?;
    Ok(web::Json(stored.into()))
}
