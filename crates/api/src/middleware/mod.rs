//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `CatchPanicLayer` (panics become the 500 envelope)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//! 5. Authorization gate (profile header, caller identity)
//! 6. Role filter (per-route allow-list)

pub mod auth;
pub mod request_id;

pub use auth::{
    AllowedProfiles, Caller, IdentityProvider, MockIdentityProvider, PROFILE_HEADER, authorize,
    require_profiles,
};
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
