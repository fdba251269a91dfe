//! OpenAPI schemas for domain types.
//!
//! Domain types do not derive `ToSchema`; these mirrors register them under
//! their domain names so the document matches the JSON actually produced.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No verified owner identity accompanied the request.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The caller does not own the target record.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested record or profile does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The handle is held by another owner.
    #[schema(rename = "conflict")]
    Conflict,
    /// Storage is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Unexpected server failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Display-ready message.
    #[schema(example = "Username is already taken")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(rename = "traceId", example = "6f1c9a52-3b1e-4f0a-9c59-0d3f5d1e2a77")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "title", "code": "title_too_long"}`.
    details: Option<serde_json::Value>,
}
