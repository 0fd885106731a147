//! Path-parameter binding over declared request fields.
//!
//! Request types expose their path-bound fields through [`BindPath`],
//! normally via `#[derive(BindPath)]` with a `#[path_param("name")]` field
//! attribute. The binder walks the fields in declaration order and converts
//! the matching router capture into the field's declared kind. Exactly
//! three kinds are supported: `String`, `i64` and `u64`; any other declared
//! type surfaces as [`PathBindError::Unsupported`] the first time a
//! non-empty capture targets it.

use std::num::ParseIntError;

/// Mutable destination for a single path-bound field.
pub enum PathSlot<'a> {
    Text(&'a mut String),
    I64(&'a mut i64),
    U64(&'a mut u64),
    Unsupported { kind: &'static str },
}

/// One declared path-bound field: capture name plus destination.
pub struct PathField<'a> {
    pub name: &'static str,
    pub slot: PathSlot<'a>,
}

/// Capability exposing a type's path-bound fields in declaration order.
pub trait BindPath {
    fn path_fields(&mut self) -> Vec<PathField<'_>>;
}

#[derive(Debug, thiserror::Error)]
pub enum PathBindError {
    #[error("invalid value for path field `{field}`: {source}")]
    Parse {
        field: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("path field `{field}` has unsupported type `{kind}`")]
    Unsupported {
        field: &'static str,
        kind: &'static str,
    },
}

/// Binds router captures into `value`, first failure wins.
///
/// A capture that is absent or empty leaves the field untouched; this is
/// not an error.
pub fn bind_path<T: BindPath>(
    value: &mut T,
    params: &[(&str, &str)],
) -> Result<(), PathBindError> {
    for field in value.path_fields() {
        let raw = params
            .iter()
            .find(|(name, _)| *name == field.name)
            .map(|(_, v)| *v)
            .unwrap_or("");
        if raw.is_empty() {
            continue;
        }
        match field.slot {
            PathSlot::Text(slot) => *slot = raw.to_owned(),
            PathSlot::I64(slot) => {
                *slot = raw.parse().map_err(|source| PathBindError::Parse {
                    field: field.name,
                    source,
                })?;
            }
            PathSlot::U64(slot) => {
                *slot = raw.parse().map_err(|source| PathBindError::Parse {
                    field: field.name,
                    source,
                })?;
            }
            PathSlot::Unsupported { kind } => {
                return Err(PathBindError::Unsupported {
                    field: field.name,
                    kind,
                })
            }
        }
    }
    Ok(())
}
