//! Item route handlers.
//!
//! Appending is a single atomic push. Update, completion and removal load the
//! whole list, change it and save it back, so concurrent edits to the same
//! list are last-write-wins.

use axum::{Json, extract::State};
use tracing::instrument;

use super::{load_list, parse_item_id, parse_list_id};
use crate::dto::{
    DtoIn, ItemChangeDtoOut, ItemCompletionDtoOut, ItemCompletionState, ItemDtoOut,
    ItemRemovedDtoOut,
};
use crate::error::{AppError, Result};
use crate::models::{Item, NewItem, ShoppingList};
use crate::state::AppState;

/// Save a list changed in memory, reporting a list deleted meanwhile as missing.
async fn save_list(state: &AppState, list: &ShoppingList) -> Result<()> {
    if state.store().save(list).await? {
        Ok(())
    } else {
        Err(AppError::ListNotFound)
    }
}

/// Append an item to a list.
///
/// POST /shoppingList/item/add
///
/// `quantity` defaults to 1; new items start not completed.
///
/// # Errors
///
/// `invalidDtoIn` for a blank `listId` or `name` or a non-numeric
/// `quantity`, `listNotFound`.
#[instrument(skip(state, dto))]
pub async fn add(State(state): State<AppState>, dto: DtoIn) -> Result<Json<ItemChangeDtoOut>> {
    let raw_list_id = dto.required_str("listId")?;
    let name = dto.required_str("name")?;
    let quantity = dto.optional_quantity("quantity")?.unwrap_or_default();
    let list_id = parse_list_id(raw_list_id)?;

    let item = Item::new(NewItem {
        name: name.to_owned(),
        quantity,
    });

    if !state.store().push_item(list_id, &item).await? {
        return Err(AppError::ListNotFound);
    }

    tracing::info!(%list_id, item_id = %item.id, "Item added");
    Ok(Json(ItemChangeDtoOut {
        list_id,
        item: ItemDtoOut::from(&item),
    }))
}

/// Rename an item and/or change its quantity.
///
/// POST /shoppingList/item/update
///
/// # Errors
///
/// `invalidDtoIn` for a blank `listId`/`itemId`, a blank `name` or a
/// non-numeric `quantity`; `listNotFound`; `itemNotFound`.
#[instrument(skip(state, dto))]
pub async fn update(State(state): State<AppState>, dto: DtoIn) -> Result<Json<ItemChangeDtoOut>> {
    let raw_list_id = dto.required_str("listId")?;
    let raw_item_id = dto.required_str("itemId")?;
    let name = dto.optional_non_empty_str("name")?;
    let quantity = dto.optional_quantity("quantity")?;
    let list_id = parse_list_id(raw_list_id)?;

    let mut list = load_list(&state, list_id).await?;
    let item_id = parse_item_id(raw_item_id)?;

    let item = list.item_mut(item_id).ok_or(AppError::ItemNotFound)?;
    if let Some(name) = name {
        name.clone_into(&mut item.name);
    }
    if let Some(quantity) = quantity {
        item.quantity = quantity;
    }
    let updated = ItemDtoOut::from(&*item);

    save_list(&state, &list).await?;

    tracing::info!(%list_id, %item_id, "Item updated");
    Ok(Json(ItemChangeDtoOut {
        list_id,
        item: updated,
    }))
}

/// Remove an item from a list.
///
/// POST /shoppingList/item/remove
///
/// # Errors
///
/// `invalidDtoIn` for a blank `listId` or `itemId`, `listNotFound`,
/// `itemNotFound`.
#[instrument(skip(state, dto))]
pub async fn remove(
    State(state): State<AppState>,
    dto: DtoIn,
) -> Result<Json<ItemRemovedDtoOut>> {
    let raw_list_id = dto.required_str("listId")?;
    let raw_item_id = dto.required_str("itemId")?;
    let list_id = parse_list_id(raw_list_id)?;

    let mut list = load_list(&state, list_id).await?;
    let item_id = parse_item_id(raw_item_id)?;
    list.remove_item(item_id).ok_or(AppError::ItemNotFound)?;
    save_list(&state, &list).await?;

    tracing::info!(%list_id, %item_id, "Item removed");
    Ok(Json(ItemRemovedDtoOut {
        list_id,
        removed_item_id: item_id,
    }))
}

/// Mark an item completed or not completed.
///
/// POST /shoppingList/item/setCompleted
///
/// Responds with the item id and its new state only.
///
/// # Errors
///
/// `invalidDtoIn` for a blank `listId`/`itemId` or non-boolean `completed`,
/// `listNotFound`, `itemNotFound`.
#[instrument(skip(state, dto))]
pub async fn set_completed(
    State(state): State<AppState>,
    dto: DtoIn,
) -> Result<Json<ItemCompletionDtoOut>> {
    let raw_list_id = dto.required_str("listId")?;
    let raw_item_id = dto.required_str("itemId")?;
    let completed = dto.required_bool("completed")?;
    let list_id = parse_list_id(raw_list_id)?;

    let mut list = load_list(&state, list_id).await?;
    let item_id = parse_item_id(raw_item_id)?;
    list.item_mut(item_id).ok_or(AppError::ItemNotFound)?.is_completed = completed;

    save_list(&state, &list).await?;

    tracing::info!(%list_id, %item_id, completed, "Item completion set");
    Ok(Json(ItemCompletionDtoOut {
        list_id,
        item: ItemCompletionState {
            id: item_id,
            is_completed: completed,
        },
    }))
}
