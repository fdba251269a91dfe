//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler in the inbound HTTP layer plus the error
//! schema mirrors from [`crate::inbound::http::schemas`]. Owner endpoints are
//! marked with the `OwnerHeader` scheme; public lookups opt out per path.
//!
//! Swagger UI serves the document in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::customization::{CustomizationRequest, CustomizationResponse};
use crate::inbound::http::handles::{
    AvailabilityResponse, ClaimHandleRequest, HandleResponse, OwnerResponse, SlugResponse,
};
use crate::inbound::http::identity::DEFAULT_IDENTITY_HEADER;
use crate::inbound::http::links::{
    CreatedLinkResponse, LinkCountResponse, LinkRequest, LinkResponse, ReorderRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the owner identity security scheme.
pub const OWNER_SECURITY_SCHEME: &str = "OwnerHeader";

/// Register the verified-owner header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            OWNER_SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                DEFAULT_IDENTITY_HEADER,
                "Owner id set by the authenticating gateway.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Link-in-bio registry API",
        description = "Handles, ordered link lists and profile presentation settings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("OwnerHeader" = [])),
    paths(
        crate::inbound::http::handles::resolve_handle,
        crate::inbound::http::handles::check_availability,
        crate::inbound::http::handles::public_slug,
        crate::inbound::http::handles::current_slug,
        crate::inbound::http::handles::claim_handle,
        crate::inbound::http::links::list_links_for_handle,
        crate::inbound::http::links::list_my_links,
        crate::inbound::http::links::create_link,
        crate::inbound::http::links::count_my_links,
        crate::inbound::http::links::reorder_links,
        crate::inbound::http::links::get_link,
        crate::inbound::http::links::update_link,
        crate::inbound::http::links::delete_link,
        crate::inbound::http::customization::customization_for_handle,
        crate::inbound::http::customization::my_customization,
        crate::inbound::http::customization::update_customization,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        OwnerResponse,
        AvailabilityResponse,
        SlugResponse,
        ClaimHandleRequest,
        HandleResponse,
        LinkResponse,
        LinkRequest,
        CreatedLinkResponse,
        LinkCountResponse,
        ReorderRequest,
        CustomizationRequest,
        CustomizationResponse,
    )),
    tags(
        (name = "handles", description = "Public handle lookup and claims"),
        (name = "links", description = "Ordered link lists"),
        (name = "customization", description = "Profile presentation settings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_exposes_code_message_and_trace_id() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn link_response_fields_are_described() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let Some(RefOr::T(Schema::Object(link))) = schemas.get("LinkResponse") else {
            panic!("expected LinkResponse object schema");
        };
        for field in ["id", "title", "url", "order"] {
            let Some(RefOr::T(Schema::Object(property))) = link.properties.get(field) else {
                panic!("expected inline schema for '{field}'");
            };
            assert!(
                property.description.is_some(),
                "field '{field}' should be described"
            );
        }
    }

    #[rstest]
    #[case("/api/v1/handles/{handle}/owner")]
    #[case("/api/v1/me/links/order")]
    #[case("/api/v1/me/links/{id}")]
    #[case("/api/v1/profiles/{slug}/customization")]
    #[case("/health/ready")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn owner_header_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(OWNER_SECURITY_SCHEME));
    }
}
