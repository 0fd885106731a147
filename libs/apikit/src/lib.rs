//! # apikit: typed request/response adaptation for axum
//!
//! Wraps a plain business function `async fn(RequestContext, Req) ->
//! Result<Resp, anyhow::Error>` into an axum handler that owns the
//! repetitive edge work:
//!
//! - body/query/form decoding via serde, rule validation via `validator`,
//! - path-parameter binding declared per field with `#[path_param("...")]`,
//! - localized messages for binding failures (zh default, en alternate),
//! - a uniform `{"code", "data"}` / `{"code", "message", "errors"}`
//!   envelope, with [`BizError`] carrying business failures verbatim.
//!
//! ## Example
//!
//! ```rust,ignore
//! use apikit::{handler, BindPath, BizError, RequestContext};
//! use serde::Deserialize;
//! use validator::Validate;
//!
//! #[derive(Debug, Default, Deserialize, Validate, BindPath)]
//! struct GetUserReq {
//!     #[serde(default)]
//!     #[path_param("id")]
//!     id: u64,
//! }
//!
//! async fn get_user(_ctx: RequestContext, req: GetUserReq) -> Result<UserDto, anyhow::Error> {
//!     find(req.id).ok_or_else(|| BizError::not_found(40401, "no such user").into())
//! }
//!
//! let app = axum::Router::new().route("/users/{id}", axum::routing::get(handler(get_user)));
//! ```

pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod i18n;
pub mod path;

mod validation;

pub use config::{HandlerConfig, LocaleFn, RequestLogger};
pub use context::RequestContext;
pub use envelope::{Code, ErrorBody, SuccessBody};
pub use error::{BizError, FieldError};
pub use handler::{handler, handler_with};
pub use i18n::{locale_from_headers, CatalogTranslator, MessageKey, Translate, DEFAULT_LOCALE};
pub use path::{bind_path, BindPath, PathBindError, PathField, PathSlot};

// Re-export the derive from the proc-macro crate under the trait's name,
// serde-style.
pub use apikit_macros::BindPath;
