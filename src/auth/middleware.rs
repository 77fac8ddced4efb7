//! Authentication middleware

use crate::auth::gate::{Gate, RequestClass, Verdict};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Credential header value, if it is present, readable and non-empty
pub fn extract_credential(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

/// Classify a request for the gate
pub fn classify(req: &Request) -> RequestClass {
    RequestClass::new(req.method().clone(), req.uri().path(), extract_credential(req))
}

/// Run every request through the gate before it reaches a handler
pub async fn require_gate(State(gate): State<Arc<Gate>>, req: Request, next: Next) -> Response {
    match gate.evaluate(&classify(&req)) {
        Verdict::Continue => next.run(req).await,
        Verdict::Reject(rejection) => rejection.into_response(),
    }
}
