//! Translates `validator` rule failures into ordered, localized sub-errors.

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::FieldError;
use crate::i18n::{MessageKey, Translate};

/// Flattens a validation report into `{field, message}` sub-errors, sorted
/// by field path so repeated identical requests produce identical
/// envelopes. Nested failures keep their position as `parent.child` and
/// `parent[index].child` paths.
pub(crate) fn collect_field_errors(
    errors: &ValidationErrors,
    tr: &dyn Translate,
) -> Vec<serde_json::Value> {
    let mut fields = Vec::new();
    flatten("", errors, tr, &mut fields);
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields.into_iter().map(serde_json::Value::from).collect()
}

fn flatten(
    prefix: &str,
    errors: &ValidationErrors,
    tr: &dyn Translate,
    out: &mut Vec<FieldError>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.push(FieldError {
                        field: path.clone(),
                        message: rule_message(err, tr),
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten(&path, nested, tr, out),
            ValidationErrorsKind::List(map) => {
                for (index, nested) in map {
                    flatten(&format!("{path}[{index}]"), nested, tr, out);
                }
            }
        }
    }
}

fn rule_message(err: &ValidationError, tr: &dyn Translate) -> String {
    let tag = err.code.as_ref();
    match rule_param(err) {
        Some(param) => tr.translate(
            MessageKey::FieldValidationFailedWithParam,
            &[&tag, &param],
        ),
        None => tr.translate(MessageKey::FieldValidationFailed, &[&tag]),
    }
}

/// The rule's own parameter, if any. The `value` entry reflects the
/// rejected input, not the rule, and is skipped; remaining keys are taken
/// smallest-first so the choice is deterministic.
fn rule_param(err: &ValidationError) -> Option<String> {
    let mut keys: Vec<&str> = err
        .params
        .keys()
        .map(|k| k.as_ref())
        .filter(|k| *k != "value")
        .collect();
    keys.sort_unstable();
    let value = err.params.get(*keys.first()?)?;
    Some(match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
