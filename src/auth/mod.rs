//! Authentication, sessions and the access gate

pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod session;

pub use gate::{Gate, RequestClass, Verdict, VerificationMode};
pub use jwt::{Claims, TokenService};
pub use middleware::require_gate;
pub use models::{Identity, LoginAttempt, NewIdentity, SessionGrant, SessionOutcome};
pub use password::PasswordHasher;
pub use session::SessionService;
