//! Localized messages for adapter-manufactured binding failures.
//!
//! Two bundled catalogs ("zh" is the default, "en" the alternate). Business
//! errors are never routed through here; only the messages the adapter
//! itself produces are locale-sensitive.

use std::fmt;

use http::{header, HeaderMap};

/// Fallback locale when detection yields nothing usable.
pub const DEFAULT_LOCALE: &str = "zh";

/// Symbolic keys for the bundled message templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    BindFailed,
    BindFailedDetail,
    PathBindFailed,
    FieldValidationFailed,
    FieldValidationFailedWithParam,
    FieldParseFailed,
    FieldTypeUnsupported,
}

const CATALOG_ZH: &[(MessageKey, &str)] = &[
    (MessageKey::BindFailed, "参数绑定失败"),
    (MessageKey::BindFailedDetail, "参数绑定失败: {0}"),
    (MessageKey::PathBindFailed, "路径参数绑定失败: {0}"),
    (MessageKey::FieldValidationFailed, "字段验证失败: {0}"),
    (MessageKey::FieldValidationFailedWithParam, "字段验证失败: {0}={1}"),
    (MessageKey::FieldParseFailed, "字段 {0} 解析失败: {1}"),
    (
        MessageKey::FieldTypeUnsupported,
        "字段 {0} 的类型 {1} 不支持路径绑定",
    ),
];

const CATALOG_EN: &[(MessageKey, &str)] = &[
    (MessageKey::BindFailed, "Parameter binding failed"),
    (MessageKey::BindFailedDetail, "Parameter binding failed: {0}"),
    (MessageKey::PathBindFailed, "Path parameter binding failed: {0}"),
    (MessageKey::FieldValidationFailed, "Field validation failed: {0}"),
    (
        MessageKey::FieldValidationFailedWithParam,
        "Field validation failed: {0}={1}",
    ),
    (MessageKey::FieldParseFailed, "Field {0} parsing failed: {1}"),
    (
        MessageKey::FieldTypeUnsupported,
        "Field {0} type {1} does not support path binding",
    ),
];

/// Resolves a message key (plus positional arguments) to display text.
pub trait Translate: Send + Sync {
    fn translate(&self, key: MessageKey, args: &[&dyn fmt::Display]) -> String;
}

impl<T: Translate + ?Sized> Translate for std::sync::Arc<T> {
    fn translate(&self, key: MessageKey, args: &[&dyn fmt::Display]) -> String {
        self.as_ref().translate(key, args)
    }
}

/// Table-backed translator over the bundled catalogs.
///
/// `"en"`, `"en-US"` and `"en_US"` select the English table; any other
/// locale string selects the default table. A key missing from the selected
/// table falls back to the default-locale entry.
pub struct CatalogTranslator {
    locale: String,
    catalog: &'static [(MessageKey, &'static str)],
}

impl CatalogTranslator {
    pub fn new(locale: &str) -> Self {
        let catalog = match locale {
            "en" | "en-US" | "en_US" => CATALOG_EN,
            _ => CATALOG_ZH,
        };
        Self {
            locale: locale.to_owned(),
            catalog,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[cfg(test)]
    fn with_catalog(locale: &str, catalog: &'static [(MessageKey, &'static str)]) -> Self {
        Self {
            locale: locale.to_owned(),
            catalog,
        }
    }
}

impl Translate for CatalogTranslator {
    fn translate(&self, key: MessageKey, args: &[&dyn fmt::Display]) -> String {
        let template = lookup(self.catalog, key)
            .or_else(|| lookup(CATALOG_ZH, key))
            .unwrap_or_default();
        if args.is_empty() {
            template.to_owned()
        } else {
            render(template, args)
        }
    }
}

fn lookup(catalog: &'static [(MessageKey, &'static str)], key: MessageKey) -> Option<&'static str> {
    catalog.iter().find(|(k, _)| *k == key).map(|(_, t)| *t)
}

/// Fills `{0}`, `{1}`, ... placeholders positionally.
fn render(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = template.to_owned();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), &arg.to_string());
    }
    out
}

/// Default locale detection: the first two bytes of `Accept-Language`,
/// or [`DEFAULT_LOCALE`] when the header is absent or too short. This is
/// deliberately a crude truncation, not language-tag negotiation.
pub fn locale_from_headers(headers: &HeaderMap) -> String {
    let value = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    match value.get(..2) {
        Some(prefix) => prefix.to_owned(),
        None => DEFAULT_LOCALE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn en_variants_select_the_english_table() {
        for locale in ["en", "en-US", "en_US"] {
            let tr = CatalogTranslator::new(locale);
            assert_eq!(
                tr.translate(MessageKey::BindFailed, &[]),
                "Parameter binding failed"
            );
        }
    }

    #[test]
    fn unknown_locale_selects_the_default_table() {
        let tr = CatalogTranslator::new("fr");
        assert_eq!(tr.translate(MessageKey::BindFailed, &[]), "参数绑定失败");
    }

    #[test]
    fn args_fill_positionally() {
        let tr = CatalogTranslator::new("en");
        assert_eq!(
            tr.translate(MessageKey::FieldParseFailed, &[&"id", &"bad digit"]),
            "Field id parsing failed: bad digit"
        );
        assert_eq!(
            tr.translate(
                MessageKey::FieldValidationFailedWithParam,
                &[&"length", &20]
            ),
            "Field validation failed: length=20"
        );
    }

    #[test]
    fn template_returned_verbatim_without_args() {
        let tr = CatalogTranslator::new("zh");
        assert_eq!(
            tr.translate(MessageKey::BindFailedDetail, &[]),
            "参数绑定失败: {0}"
        );
    }

    #[test]
    fn missing_key_falls_back_to_default_table() {
        // A sparse table: only one key present.
        static SPARSE: &[(MessageKey, &str)] =
            &[(MessageKey::BindFailed, "binding broke")];
        let tr = CatalogTranslator::with_catalog("xx", SPARSE);
        assert_eq!(tr.translate(MessageKey::BindFailed, &[]), "binding broke");
        assert_eq!(
            tr.translate(MessageKey::PathBindFailed, &[&"x"]),
            "路径参数绑定失败: x"
        );
    }

    #[test]
    fn locale_detection_truncates_accept_language() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        assert_eq!(locale_from_headers(&headers), "en");
    }

    #[test]
    fn locale_detection_defaults_when_missing_or_short() {
        assert_eq!(locale_from_headers(&HeaderMap::new()), "zh");

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("e"));
        assert_eq!(locale_from_headers(&headers), "zh");
    }
}
