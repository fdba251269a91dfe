//! Caller identity extraction.
//!
//! The registry trusts a gateway in front of it to authenticate the caller
//! and forward the verified owner id in a header (`x-owner-id` unless
//! configured otherwise). Requests without the header are anonymous; a value
//! that is not a valid owner id is logged and also treated as anonymous.

use actix_web::http::header::HeaderName;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::{OwnerContext, OwnerId};

/// Default header carrying the verified owner id.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-owner-id";

/// Header name read by the [`Caller`] extractor, registered as app data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHeader(HeaderName);

impl IdentityHeader {
    /// Wrap a header name.
    pub fn new(name: HeaderName) -> Self {
        Self(name)
    }

    /// Header name.
    pub fn name(&self) -> &HeaderName {
        &self.0
    }
}

impl Default for IdentityHeader {
    fn default() -> Self {
        Self(HeaderName::from_static(DEFAULT_IDENTITY_HEADER))
    }
}

/// Extractor producing the request's [`OwnerContext`].
#[derive(Debug, Clone, Default)]
pub struct Caller(pub OwnerContext);

impl Caller {
    /// The extracted context.
    pub fn context(&self) -> &OwnerContext {
        &self.0
    }
}

fn owner_context(req: &HttpRequest) -> OwnerContext {
    let configured = req.app_data::<web::Data<IdentityHeader>>();
    let fallback = IdentityHeader::default();
    let header = configured.map_or(&fallback, |data| data.get_ref());

    let Some(value) = req.headers().get(header.name()) else {
        return OwnerContext::anonymous();
    };
    let raw = match value.to_str() {
        Ok(raw) => raw,
        Err(_) => {
            warn!(header = %header.name(), "identity header is not valid text");
            return OwnerContext::anonymous();
        }
    };
    match OwnerId::new(raw) {
        Ok(owner_id) => OwnerContext::verified(owner_id),
        Err(error) => {
            warn!(header = %header.name(), %error, "rejecting malformed owner id");
            OwnerContext::anonymous()
        }
    }
}

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(owner_context(req))))
    }
}
