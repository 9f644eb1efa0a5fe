//! Authorization gate and role filter.
//!
//! The gate trusts the `x-user-profile` header as-is: any caller may claim any
//! profile. Identity comes from an [`IdentityProvider`]; the shipped provider
//! hands every request the same configured id.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};

use shopping_list_core::Profile;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's claimed profile.
pub const PROFILE_HEADER: &str = "x-user-profile";

/// Resolves who is calling.
///
/// Returning `None` rejects the request as unauthorized.
pub trait IdentityProvider: Send + Sync {
    fn identify(&self, headers: &HeaderMap) -> Option<String>;
}

/// Identity provider that returns one fixed user id for every request.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    user_id: String,
}

impl MockIdentityProvider {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn identify(&self, _headers: &HeaderMap) -> Option<String> {
        Some(self.user_id.clone())
    }
}

/// The authenticated caller, attached to request extensions by [`authorize`].
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(caller: Caller) -> String {
///     format!("{} as {}", caller.user_id, caller.profile)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub profile: Profile,
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Middleware that resolves the caller before any routing decision.
///
/// Fails with `unauthorized` when the profile header is absent or empty and
/// with `invalidProfile` when it names an unknown profile.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` or `AppError::InvalidProfile`.
pub async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(PROFILE_HEADER)
        .filter(|value| !value.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let profile = header
        .to_str()
        .ok()
        .and_then(|value| value.parse::<Profile>().ok())
        .ok_or(AppError::InvalidProfile)?;

    let user_id = state
        .identity()
        .identify(request.headers())
        .ok_or(AppError::Unauthorized)?;

    tracing::Span::current().record("profile", profile.as_str());
    request.extensions_mut().insert(Caller { user_id, profile });

    Ok(next.run(request).await)
}

/// Profiles allowed to call one endpoint.
#[derive(Debug, Clone, Copy)]
pub struct AllowedProfiles(pub &'static [Profile]);

/// Route-level middleware that rejects callers whose profile is not allowed.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the caller's profile is not in the list.
pub async fn require_profiles(
    State(AllowedProfiles(allowed)): State<AllowedProfiles>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let permitted = request
        .extensions()
        .get::<Caller>()
        .is_some_and(|caller| allowed.contains(&caller.profile));

    if !permitted {
        return Err(AppError::Forbidden(
            "You are not allowed to call this endpoint.".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
