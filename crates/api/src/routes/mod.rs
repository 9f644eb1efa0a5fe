//! HTTP routes for the shopping list API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                              - Liveness check
//! GET    /health/ready                        - Readiness check (store reachable)
//!
//! # Lists                                       allowed profiles
//! POST   /shoppingList/create                 - user, owner
//! GET    /shoppingList/get                    - user, owner, member
//! GET    /shoppingList/listMine               - user, owner, member
//! POST   /shoppingList/archive                - owner
//! DELETE /shoppingList/delete                 - owner
//! POST   /shoppingList/update                 - owner
//!
//! # Members
//! POST   /shoppingList/member/add             - owner
//! POST   /shoppingList/member/remove          - owner
//!
//! # Items
//! POST   /shoppingList/item/add               - owner, member
//! POST   /shoppingList/item/update            - owner, member
//! POST   /shoppingList/item/remove            - owner, member
//! POST   /shoppingList/item/setCompleted      - owner, member
//! ```
//!
//! Everything except the health checks sits behind the authorization gate,
//! including paths that match no route.

pub mod health;
pub mod items;
pub mod lists;
pub mod members;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{from_fn, from_fn_with_state},
    routing::{MethodRouter, delete, get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use shopping_list_core::{ItemId, ListId, Profile};

use crate::error::{AppError, Result, panic_response};
use crate::middleware::{AllowedProfiles, authorize, request_id_middleware, require_profiles};
use crate::models::ShoppingList;
use crate::state::AppState;

/// Mount point of the list routes.
pub const PATH_PREFIX: &str = "/shoppingList";

const ANY_PROFILE: &[Profile] = &[Profile::User, Profile::Owner, Profile::Member];
const CREATORS: &[Profile] = &[Profile::User, Profile::Owner];
const OWNERS: &[Profile] = &[Profile::Owner];
const CONTRIBUTORS: &[Profile] = &[Profile::Owner, Profile::Member];

/// Wrap a route with its profile allow-list.
///
/// Unmatched methods on a known path answer like an unknown path.
fn guarded(route: MethodRouter<AppState>, allowed: &'static [Profile]) -> MethodRouter<AppState> {
    route
        .route_layer(from_fn_with_state(AllowedProfiles(allowed), require_profiles))
        .fallback(not_found)
}

/// Create the shopping list routes router.
pub fn shopping_list_routes() -> Router<AppState> {
    Router::new()
        .route("/create", guarded(post(lists::create), CREATORS))
        .route("/get", guarded(get(lists::get), ANY_PROFILE))
        .route("/listMine", guarded(get(lists::list_mine), ANY_PROFILE))
        .route("/archive", guarded(post(lists::archive), OWNERS))
        .route("/delete", guarded(delete(lists::remove), OWNERS))
        .route("/update", guarded(post(lists::update), OWNERS))
        .route("/member/add", guarded(post(members::add), OWNERS))
        .route("/member/remove", guarded(post(members::remove), OWNERS))
        .route("/item/add", guarded(post(items::add), CONTRIBUTORS))
        .route("/item/update", guarded(post(items::update), CONTRIBUTORS))
        .route("/item/remove", guarded(post(items::remove), CONTRIBUTORS))
        .route(
            "/item/setCompleted",
            guarded(post(items::set_completed), CONTRIBUTORS),
        )
}

/// Build the complete application router.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let gated = Router::new()
        .nest(PATH_PREFIX, shopping_list_routes())
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), authorize));

    Router::new()
        .merge(health::health_routes())
        .merge(gated)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                    profile = tracing::field::Empty,
                )
            }),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::RouteNotFound
}

/// Parse a list id from input. Anything unparseable cannot name a stored list.
pub(crate) fn parse_list_id(raw: &str) -> Result<ListId> {
    raw.parse().map_err(|_| AppError::ListNotFound)
}

/// Parse an item id from input. Anything unparseable cannot name a stored item.
pub(crate) fn parse_item_id(raw: &str) -> Result<ItemId> {
    raw.parse().map_err(|_| AppError::ItemNotFound)
}

/// Fetch a list or fail with `listNotFound`.
pub(crate) async fn load_list(state: &AppState, id: ListId) -> Result<ShoppingList> {
    state
        .store()
        .find_by_id(id)
        .await?
        .ok_or(AppError::ListNotFound)
}
