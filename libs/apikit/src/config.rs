//! Per-registration adapter configuration.
//!
//! A config value is built once at route-registration time and cloned into
//! the produced handler; nothing here is shared mutable state.

use std::fmt;
use std::sync::Arc;

use http::request::Parts;
use http::StatusCode;

use crate::envelope::Code;
use crate::i18n::Translate;

/// Callback invoked with the request head and the fully bound request value.
pub type RequestLogger = dyn Fn(&Parts, &dyn fmt::Debug) + Send + Sync;

/// Callback resolving the locale for a request.
pub type LocaleFn = dyn Fn(&Parts) -> String + Send + Sync;

#[derive(Clone)]
pub struct HandlerConfig {
    pub(crate) success_code: Code,
    pub(crate) success_status: StatusCode,
    pub(crate) bind_error_code: Code,
    pub(crate) request_logger: Option<Arc<RequestLogger>>,
    pub(crate) translator: Option<Arc<dyn Translate>>,
    pub(crate) locale_fn: Option<Arc<LocaleFn>>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            success_code: Code::Int(0),
            success_status: StatusCode::OK,
            bind_error_code: Code::Int(400),
            request_logger: None,
            translator: None,
            locale_fn: None,
        }
    }
}

impl HandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Business code used in success envelopes.
    pub fn with_success_code(mut self, code: impl Into<Code>) -> Self {
        self.success_code = code.into();
        self
    }

    /// HTTP status used for success responses.
    pub fn with_success_status(mut self, status: StatusCode) -> Self {
        self.success_status = status;
        self
    }

    /// Business code used when request binding fails.
    pub fn with_bind_error_code(mut self, code: impl Into<Code>) -> Self {
        self.bind_error_code = code.into();
        self
    }

    pub fn with_request_logger(
        mut self,
        logger: impl Fn(&Parts, &dyn fmt::Debug) + Send + Sync + 'static,
    ) -> Self {
        self.request_logger = Some(Arc::new(logger));
        self
    }

    /// Fixes the translator, short-circuiting locale detection entirely.
    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    /// Custom locale resolution; only consulted when no translator is set.
    pub fn with_locale_fn(
        mut self,
        locale_fn: impl Fn(&Parts) -> String + Send + Sync + 'static,
    ) -> Self {
        self.locale_fn = Some(Arc::new(locale_fn));
        self
    }
}

impl fmt::Debug for HandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerConfig")
            .field("success_code", &self.success_code)
            .field("success_status", &self.success_status)
            .field("bind_error_code", &self.bind_error_code)
            .field("request_logger", &self.request_logger.is_some())
            .field("translator", &self.translator.is_some())
            .field("locale_fn", &self.locale_fn.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::CatalogTranslator;

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = HandlerConfig::default();
        assert_eq!(config.success_code, Code::Int(0));
        assert_eq!(config.success_status, StatusCode::OK);
        assert_eq!(config.bind_error_code, Code::Int(400));
        assert!(config.request_logger.is_none());
        assert!(config.translator.is_none());
        assert!(config.locale_fn.is_none());
    }

    #[test]
    fn builders_override_independently_and_later_wins() {
        let config = HandlerConfig::default()
            .with_success_code(1)
            .with_success_code("OK")
            .with_success_status(StatusCode::CREATED)
            .with_bind_error_code(42200)
            .with_translator(CatalogTranslator::new("en"));
        assert_eq!(config.success_code, Code::Str("OK".into()));
        assert_eq!(config.success_status, StatusCode::CREATED);
        assert_eq!(config.bind_error_code, Code::Int(42200));
        assert!(config.translator.is_some());
    }
}
