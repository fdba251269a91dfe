//! Helpers for handler tests.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use crate::domain::ports::{MockRegistryCommand, MockRegistryQuery};
use crate::inbound::http::identity::DEFAULT_IDENTITY_HEADER;
use crate::inbound::http::state::HttpState;

/// Attach a verified owner id to `req`.
pub fn with_owner(req: TestRequest, owner_id: &str) -> TestRequest {
    req.insert_header((DEFAULT_IDENTITY_HEADER, owner_id))
}

/// Serve `req` through `routes` backed by the given mocks.
///
/// Returns the status and the JSON body, or `Value::Null` for an empty body.
pub async fn call_json(
    query: MockRegistryQuery,
    command: MockRegistryCommand,
    routes: fn(&mut web::ServiceConfig),
    req: TestRequest,
) -> (StatusCode, Value) {
    let state = HttpState::new(Arc::new(query), Arc::new(command));
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(routes)).await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, body)
}
