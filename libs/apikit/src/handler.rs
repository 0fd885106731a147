//! The request adapter: decode, validate, path-bind, invoke, envelope.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::{
    body,
    extract::{FromRequestParts, RawPathParams, Request},
    response::{IntoResponse, Response},
    Json,
};
use http::request::Parts;
use http::{header, HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::config::HandlerConfig;
use crate::context::RequestContext;
use crate::envelope::{Code, ErrorBody, SuccessBody};
use crate::error::BizError;
use crate::i18n::{locale_from_headers, CatalogTranslator, MessageKey, Translate};
use crate::path::{bind_path, BindPath, PathBindError};
use crate::validation::collect_field_errors;

/// Wraps a business function into an axum handler under the default
/// configuration. See [`handler_with`].
pub fn handler<T, R, F, Fut>(
    f: F,
) -> impl Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>>
       + Clone
       + Send
       + Sync
       + 'static
where
    T: DeserializeOwned + Validate + BindPath + fmt::Debug + Send + 'static,
    R: Serialize + Send + 'static,
    F: Fn(RequestContext, T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<R, anyhow::Error>> + Send + 'static,
{
    handler_with(HandlerConfig::default(), f)
}

/// Wraps a business function into an axum handler.
///
/// The produced closure drops straight into `axum::routing::{get, post,
/// ...}`. Per request it resolves a translator, decodes the request value
/// from query or body, runs rule validation, binds path captures, invokes
/// `f`, and writes exactly one success or error envelope. Any
/// [`BizError`] returned through the error surfaces with its own status
/// and code; every other error becomes a 500.
pub fn handler_with<T, R, F, Fut>(
    config: HandlerConfig,
    f: F,
) -> impl Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>>
       + Clone
       + Send
       + Sync
       + 'static
where
    T: DeserializeOwned + Validate + BindPath + fmt::Debug + Send + 'static,
    R: Serialize + Send + 'static,
    F: Fn(RequestContext, T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<R, anyhow::Error>> + Send + 'static,
{
    move |req: Request| -> Pin<Box<dyn Future<Output = Response> + Send>> {
        let config = config.clone();
        let f = f.clone();
        Box::pin(async move { run(config, f, req).await })
    }
}

async fn run<T, R, F, Fut>(config: HandlerConfig, f: F, req: Request) -> Response
where
    T: DeserializeOwned + Validate + BindPath + fmt::Debug + Send + 'static,
    R: Serialize + Send + 'static,
    F: Fn(RequestContext, T) -> Fut,
    Fut: Future<Output = Result<R, anyhow::Error>> + Send,
{
    let (mut parts, body) = req.into_parts();

    // Captures are taken before the body so the head stays borrowable; a
    // request dispatched outside a router simply has none.
    let captures = RawPathParams::from_request_parts(&mut parts, &()).await.ok();

    let translator: Arc<dyn Translate> = match config.translator.clone() {
        Some(translator) => translator,
        None => {
            let locale = match &config.locale_fn {
                Some(locale_fn) => locale_fn(&parts),
                None => locale_from_headers(&parts.headers),
            };
            Arc::new(CatalogTranslator::new(&locale))
        }
    };
    let tr = translator.as_ref();

    let bytes = match body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(error = %err, "failed to read request body");
            return bind_failure(&config, tr, MessageKey::BindFailedDetail, &[&err]);
        }
    };

    let mut value: T = match decode_request(&parts, &bytes) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, "request binding failed");
            return bind_failure(&config, tr, MessageKey::BindFailedDetail, &[&err]);
        }
    };

    if let Err(report) = value.validate() {
        let errors = collect_field_errors(&report, tr);
        tracing::debug!(count = errors.len(), "request validation failed");
        let body = ErrorBody {
            code: config.bind_error_code.clone(),
            message: tr.translate(MessageKey::BindFailed, &[]),
            errors,
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    {
        let pairs: Vec<(&str, &str)> = captures
            .as_ref()
            .map(|params| params.into_iter().collect())
            .unwrap_or_default();
        if let Err(err) = bind_path(&mut value, &pairs) {
            tracing::debug!(error = %err, "path binding failed");
            let detail = path_failure_detail(&err, tr);
            return bind_failure(&config, tr, MessageKey::PathBindFailed, &[&detail]);
        }
    }

    if let Some(logger) = &config.request_logger {
        logger(&parts, &value);
    }

    let ctx = RequestContext::new(parts);
    match f(ctx, value).await {
        Ok(data) => {
            let body = SuccessBody {
                code: config.success_code.clone(),
                data,
            };
            (config.success_status, Json(body)).into_response()
        }
        Err(err) => business_failure(err),
    }
}

#[derive(Debug, thiserror::Error)]
enum DecodeError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Query(#[from] serde_urlencoded::de::Error),
}

/// Delegates request decoding to serde: bodyless methods (and empty
/// bodies) decode from the query string, everything else from the body by
/// content type.
fn decode_request<T: DeserializeOwned>(parts: &Parts, bytes: &[u8]) -> Result<T, DecodeError> {
    if !expects_body(&parts.method) || bytes.is_empty() {
        let query = parts.uri.query().unwrap_or("");
        return Ok(serde_urlencoded::from_str(query)?);
    }
    if is_form(&parts.headers) {
        return Ok(serde_urlencoded::from_bytes(bytes)?);
    }
    Ok(serde_json::from_slice(bytes)?)
}

fn expects_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

fn bind_failure(
    config: &HandlerConfig,
    tr: &dyn Translate,
    key: MessageKey,
    args: &[&dyn fmt::Display],
) -> Response {
    let body = ErrorBody {
        code: config.bind_error_code.clone(),
        message: tr.translate(key, args),
        errors: Vec::new(),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn path_failure_detail(err: &PathBindError, tr: &dyn Translate) -> String {
    match err {
        PathBindError::Parse { field, source } => {
            tr.translate(MessageKey::FieldParseFailed, &[field, source])
        }
        PathBindError::Unsupported { field, kind } => {
            tr.translate(MessageKey::FieldTypeUnsupported, &[field, kind])
        }
    }
}

fn business_failure(err: anyhow::Error) -> Response {
    match err.downcast::<BizError>() {
        Ok(biz) => biz.into_response(),
        Err(err) => {
            tracing::error!(error = %err, "business handler failed");
            let body = ErrorBody {
                code: Code::Int(500),
                message: err.to_string(),
                errors: Vec::new(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
