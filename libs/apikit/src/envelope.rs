//! Wire envelopes shared by every response the adapter emits.
//!
//! Success: `{"code": <int|string>, "data": <R>}`.
//! Error: `{"code": <int|string>, "message": "...", "errors": [...]}` with
//! the `errors` key omitted entirely when the list is empty.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Application-level code carried in both envelope shapes.
///
/// The wire form is either a bare JSON number or a bare JSON string; both
/// round-trip unchanged through serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Code {
    Int(i64),
    Str(String),
}

impl Default for Code {
    fn default() -> Self {
        Code::Int(0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Int(n) => n.fmt(f),
            Code::Str(s) => s.fmt(f),
        }
    }
}

impl From<i64> for Code {
    fn from(n: i64) -> Self {
        Code::Int(n)
    }
}

impl From<i32> for Code {
    fn from(n: i32) -> Self {
        Code::Int(i64::from(n))
    }
}

impl From<u32> for Code {
    fn from(n: u32) -> Self {
        Code::Int(i64::from(n))
    }
}

impl From<&str> for Code {
    fn from(s: &str) -> Self {
        Code::Str(s.to_owned())
    }
}

impl From<String> for Code {
    fn from(s: String) -> Self {
        Code::Str(s)
    }
}

/// Top-level wrapper for a successful response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessBody<R> {
    pub code: Code,
    pub data: R,
}

/// Top-level wrapper for a failed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: Code,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<serde_json::Value>,
}
