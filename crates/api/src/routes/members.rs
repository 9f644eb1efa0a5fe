//! Member route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use super::parse_list_id;
use crate::dto::{DtoIn, MembersDtoOut};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Add a member. Adding someone already listed changes nothing.
///
/// POST /shoppingList/member/add
///
/// # Errors
///
/// `invalidDtoIn` for a blank `listId` or `userId`, `listNotFound`.
#[instrument(skip(state, dto))]
pub async fn add(State(state): State<AppState>, dto: DtoIn) -> Result<Json<MembersDtoOut>> {
    let raw_list_id = dto.required_str("listId")?;
    let user_id = dto.required_str("userId")?;
    let list_id = parse_list_id(raw_list_id)?;

    let list = state
        .store()
        .add_member(list_id, user_id)
        .await?
        .ok_or(AppError::ListNotFound)?;

    tracing::info!(list_id = %list.id, member = user_id, "Member added");
    Ok(Json(MembersDtoOut::from(&list)))
}

/// Remove a member. Removing someone not listed changes nothing.
///
/// POST /shoppingList/member/remove
///
/// # Errors
///
/// `invalidDtoIn` for a blank `listId` or `userId`, `listNotFound`.
#[instrument(skip(state, dto))]
pub async fn remove(State(state): State<AppState>, dto: DtoIn) -> Result<Json<MembersDtoOut>> {
    let raw_list_id = dto.required_str("listId")?;
    let user_id = dto.required_str("userId")?;
    let list_id = parse_list_id(raw_list_id)?;

    let list = state
        .store()
        .remove_member(list_id, user_id)
        .await?
        .ok_or(AppError::ListNotFound)?;

    tracing::info!(list_id = %list.id, member = user_id, "Member removed");
    Ok(Json(MembersDtoOut::from(&list)))
}
