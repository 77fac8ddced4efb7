//! Access gate: ordered request stages evaluated before any handler runs.
//!
//! Each stage looks at a [`RequestClass`] and either lets the request
//! continue or rejects it with a fixed status and message. The gate stops at
//! the first rejection.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::api::MessageBody;
use crate::auth::jwt::TokenService;

/// Paths under this prefix are only reachable without a credential
pub const AUTH_NAMESPACE: &str = "/api/auth/";

pub const ALREADY_LOGGED_IN: &str = "You already logged in";
pub const MUST_BE_LOGGED_IN: &str = "You must be logged in";
pub const INVALID_CREDENTIAL: &str = "Invalid or expired token";

// Any single segment, as the router binds `{id}`; `+1` and `%31` reach the handler too
static USER_CARDS_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/api/users/[^/]+/cards$").expect("Invalid regex pattern - this is a bug in the codebase")
});

/// What the gate knows about one request
#[derive(Debug, Clone)]
pub struct RequestClass {
    /// Raw credential header value, if present and non-empty
    pub credential: Option<String>,
    pub method: Method,
    pub path: String,
    pub is_auth_endpoint: bool,
    /// Path is `/api/users/{id}/cards`
    pub is_user_cards: bool,
}

impl RequestClass {
    pub fn new(method: Method, path: &str, credential: Option<&str>) -> Self {
        Self {
            credential: credential.filter(|c| !c.is_empty()).map(str::to_string),
            method,
            path: path.to_string(),
            is_auth_endpoint: path.starts_with(AUTH_NAMESPACE),
            is_user_cards: USER_CARDS_PATH.is_match(path),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Public reads pass without a credential; the cards-by-user listing does not
    pub fn requires_auth(&self) -> bool {
        !self.has_credential()
            && !self.is_auth_endpoint
            && (self.method != Method::GET || self.is_user_cards)
    }

    /// Credential with any `Bearer ` prefix removed
    pub fn bearer_token(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .map(|c| c.strip_prefix("Bearer ").unwrap_or(c).trim())
    }
}

/// A short-circuit response produced by a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub status: StatusCode,
    pub message: &'static str,
}

impl Rejection {
    pub const fn forbidden(message: &'static str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message,
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status, Json(MessageBody::new(self.message))).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Reject(Rejection),
}

pub type Stage = Box<dyn Fn(&RequestClass) -> Verdict + Send + Sync>;

/// Reject callers that already hold a credential from the auth namespace
pub fn anonymous_only(req: &RequestClass) -> Verdict {
    if req.is_auth_endpoint && req.has_credential() {
        Verdict::Reject(Rejection::forbidden(ALREADY_LOGGED_IN))
    } else {
        Verdict::Continue
    }
}

/// Reject mutations and restricted reads made without a credential
pub fn authenticated_only(req: &RequestClass) -> Verdict {
    if req.requires_auth() {
        Verdict::Reject(Rejection::forbidden(MUST_BE_LOGGED_IN))
    } else {
        Verdict::Continue
    }
}

/// How the credential verification stage treats a credential that does not verify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationMode {
    /// Only presence is enforced; the verification result is logged
    #[default]
    Presence,
    /// Unverifiable credentials are rejected with 401
    Enforce,
}

impl VerificationMode {
    pub fn from_flag(enforce: bool) -> Self {
        if enforce {
            VerificationMode::Enforce
        } else {
            VerificationMode::Presence
        }
    }
}

/// Verify any credential presented outside the auth namespace
pub fn credential_check(tokens: Arc<TokenService>, mode: VerificationMode) -> Stage {
    Box::new(move |req: &RequestClass| {
        if req.is_auth_endpoint {
            return Verdict::Continue;
        }
        let Some(token) = req.bearer_token() else {
            return Verdict::Continue;
        };

        let verified = tokens.verify(token);
        tracing::debug!(method = %req.method, path = %req.path, verified, "credential checked");

        if !verified && mode == VerificationMode::Enforce {
            Verdict::Reject(Rejection {
                status: StatusCode::UNAUTHORIZED,
                message: INVALID_CREDENTIAL,
            })
        } else {
            Verdict::Continue
        }
    })
}

/// Ordered list of stages
pub struct Gate {
    stages: Vec<Stage>,
}

impl Gate {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Anonymous guard, then authenticated guard, then credential verification
    pub fn standard(tokens: Arc<TokenService>, mode: VerificationMode) -> Self {
        Self::new(vec![
            Box::new(anonymous_only) as Stage,
            Box::new(authenticated_only),
            credential_check(tokens, mode),
        ])
    }

    pub fn evaluate(&self, req: &RequestClass) -> Verdict {
        for stage in &self.stages {
            if let Verdict::Reject(rejection) = stage(req) {
                tracing::debug!(
                    method = %req.method,
                    path = %req.path,
                    status = rejection.status.as_u16(),
                    "request rejected by gate: {}",
                    rejection.message
                );
                return Verdict::Reject(rejection);
            }
        }
        Verdict::Continue
    }
}
