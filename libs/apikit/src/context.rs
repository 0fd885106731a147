//! Request-scoped context handed to business functions.

use http::request::Parts;
use http::{Extensions, HeaderMap, Method, Uri};

/// The request head, minus the already-consumed body. Gives business
/// functions access to method, URI, headers and anything middleware stored
/// in the request extensions (shared services, auth principals, ...).
///
/// Cancellation rides on the future itself: when the connection goes away
/// the whole request future is dropped, business function included.
#[derive(Debug)]
pub struct RequestContext {
    parts: Parts,
}

impl RequestContext {
    pub(crate) fn new(parts: Parts) -> Self {
        Self { parts }
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn extensions(&self) -> &Extensions {
        &self.parts.extensions
    }

    /// Clones a typed value out of the request extensions.
    pub fn extension<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        self.parts.extensions.get::<T>().cloned()
    }
}
