//! Shopping list route handlers.
//!
//! Create, read, archive, update and delete whole lists.

use axum::{Json, extract::State};
use tracing::instrument;

use super::{load_list, parse_list_id};
use crate::dto::{
    ArchiveDtoOut, DeleteDtoOut, DtoIn, ListMineDtoOut, ListSummaryDtoOut, ShoppingListDtoOut,
};
use crate::error::{AppError, Result};
use crate::middleware::Caller;
use crate::models::NewShoppingList;
use crate::state::AppState;

/// Create a list owned by the caller.
///
/// POST /shoppingList/create
///
/// # Errors
///
/// `invalidDtoIn` for a blank `title` or a non-string `description`.
#[instrument(skip(state, dto), fields(user_id = %caller.user_id))]
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    dto: DtoIn,
) -> Result<Json<ShoppingListDtoOut>> {
    let title = dto.required_str("title")?;
    let description = dto.optional_str("description")?.unwrap_or_default();

    let list = state
        .store()
        .insert(NewShoppingList {
            title: title.to_owned(),
            description: description.to_owned(),
            owner_id: caller.user_id,
        })
        .await?;

    tracing::info!(list_id = %list.id, "Shopping list created");
    Ok(Json(ShoppingListDtoOut::from(&list)))
}

/// Get one list by id.
///
/// GET /shoppingList/get?id=...
///
/// Any caller that passes the role filter may read any list; ownership and
/// membership are not checked here.
///
/// # Errors
///
/// `invalidDtoIn` for a blank `id`, `listNotFound` if no such list exists.
#[instrument(skip(state, dto))]
pub async fn get(State(state): State<AppState>, dto: DtoIn) -> Result<Json<ShoppingListDtoOut>> {
    let id = parse_list_id(dto.required_str("id")?)?;
    let list = load_list(&state, id).await?;
    Ok(Json(ShoppingListDtoOut::from(&list)))
}

/// Lists the caller owns or is a member of, newest first.
///
/// GET /shoppingList/listMine?includeArchived=true|false
///
/// # Errors
///
/// `invalidDtoIn` if `includeArchived` is anything but `"true"` or `"false"`.
#[instrument(skip(state, dto), fields(user_id = %caller.user_id))]
pub async fn list_mine(
    State(state): State<AppState>,
    caller: Caller,
    dto: DtoIn,
) -> Result<Json<ListMineDtoOut>> {
    let include_archived = dto.optional_flag("includeArchived")?;

    let lists = state
        .store()
        .find_for_user(&caller.user_id, include_archived)
        .await?;

    Ok(Json(ListMineDtoOut {
        item_list: lists
            .iter()
            .map(|list| ListSummaryDtoOut::for_caller(list, &caller.user_id))
            .collect(),
    }))
}

/// Archive or unarchive a list.
///
/// POST /shoppingList/archive
///
/// # Errors
///
/// `invalidDtoIn` for a blank `id` or non-boolean `archive`, `listNotFound`
/// if no such list exists.
#[instrument(skip(state, dto))]
pub async fn archive(State(state): State<AppState>, dto: DtoIn) -> Result<Json<ArchiveDtoOut>> {
    let raw_id = dto.required_str("id")?;
    let archive = dto.required_bool("archive")?;
    let id = parse_list_id(raw_id)?;

    let list = state
        .store()
        .set_archived(id, archive)
        .await?
        .ok_or(AppError::ListNotFound)?;

    tracing::info!(list_id = %list.id, archived = list.is_archived, "Shopping list archive flag set");
    Ok(Json(ArchiveDtoOut {
        id: list.id,
        is_archived: list.is_archived,
    }))
}

/// Delete a list together with its items.
///
/// DELETE /shoppingList/delete
///
/// # Errors
///
/// `invalidDtoIn` for a blank `id`, `listNotFound` if no such list exists.
#[instrument(skip(state, dto))]
pub async fn remove(State(state): State<AppState>, dto: DtoIn) -> Result<Json<DeleteDtoOut>> {
    let id = parse_list_id(dto.required_str("id")?)?;

    if !state.store().delete(id).await? {
        return Err(AppError::ListNotFound);
    }

    tracing::info!(list_id = %id, "Shopping list deleted");
    Ok(Json(DeleteDtoOut { id, deleted: true }))
}

/// Change a list's title and/or description. Owner only.
///
/// POST /shoppingList/update
///
/// Fields that are absent stay as they are. Ownership is checked before the
/// new values are validated, so a non-owner always gets `forbidden`.
///
/// # Errors
///
/// `invalidDtoIn` for a blank `id`, `listNotFound`, `forbidden` for a caller
/// that does not own the list, then `invalidDtoIn` for a blank `title` or a
/// non-string `description`.
#[instrument(skip(state, dto), fields(user_id = %caller.user_id))]
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    dto: DtoIn,
) -> Result<Json<ShoppingListDtoOut>> {
    let id = parse_list_id(dto.required_str("id")?)?;
    let mut list = load_list(&state, id).await?;

    if list.owner_id != caller.user_id {
        return Err(AppError::Forbidden(
            "You are not the owner of this list.".to_string(),
        ));
    }

    if let Some(title) = dto.optional_non_empty_str("title")? {
        title.clone_into(&mut list.title);
    }
    if let Some(description) = dto.optional_str("description")? {
        description.clone_into(&mut list.description);
    }

    if !state.store().save(&list).await? {
        return Err(AppError::ListNotFound);
    }

    tracing::info!(list_id = %list.id, "Shopping list updated");
    Ok(Json(ShoppingListDtoOut::from(&list)))
}
