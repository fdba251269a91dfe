//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod customization;
pub mod error;
pub mod handles;
pub mod health;
pub mod identity;
pub mod links;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every registry endpoint; mount under `/api/v1`.
///
/// The literal `/me/links/count` and `/me/links/order` routes are registered
/// ahead of `/me/links/{id}` so they are not captured as ids.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handles::resolve_handle)
        .service(handles::check_availability)
        .service(handles::public_slug)
        .service(handles::current_slug)
        .service(handles::claim_handle)
        .service(links::list_links_for_handle)
        .service(links::list_my_links)
        .service(links::create_link)
        .service(links::count_my_links)
        .service(links::reorder_links)
        .service(links::get_link)
        .service(links::update_link)
        .service(links::delete_link)
        .service(customization::customization_for_handle)
        .service(customization::my_customization)
        .service(customization::update_customization);
}
