//! Extractors whose rejections answer with a `{"message": ...}` body

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::Error;

/// `axum::Json` with rejections mapped to `Error::BadRequest`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with rejections mapped to `Error::BadRequest`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct PathParam<T>(pub T);

/// Record ids are positive decimal integers written with digits only.
///
/// Anything else (`+1`, `-1`, `0`, `1.0`) names no record.
pub fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}
