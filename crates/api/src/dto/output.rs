//! Response projections.
//!
//! Pure functions of the stored documents. Timestamps render as RFC 3339 UTC
//! with millisecond precision, e.g. `2026-10-19T08:30:00.000Z`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use shopping_list_core::{ItemId, ListId, ListRole, Quantity};

use crate::models::{Item, Member, ShoppingList};

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Full list representation (create, get, update).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListDtoOut {
    pub id: ListId,
    pub title: String,
    pub description: String,
    pub owner_id: String,
    pub members: Vec<MemberDtoOut>,
    pub items: Vec<ItemDtoOut>,
    pub is_archived: bool,
    pub created_at: String,
}

impl From<&ShoppingList> for ShoppingListDtoOut {
    fn from(list: &ShoppingList) -> Self {
        Self {
            id: list.id,
            title: list.title.clone(),
            description: list.description.clone(),
            owner_id: list.owner_id.clone(),
            members: list.members.iter().map(MemberDtoOut::from).collect(),
            items: list.items.iter().map(ItemDtoOut::from).collect(),
            is_archived: list.is_archived,
            created_at: format_timestamp(&list.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDtoOut {
    pub user_id: String,
}

impl From<&Member> for MemberDtoOut {
    fn from(member: &Member) -> Self {
        Self {
            user_id: member.user_id.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDtoOut {
    pub id: ItemId,
    pub name: String,
    pub quantity: Quantity,
    pub is_completed: bool,
    pub created_at: String,
}

impl From<&Item> for ItemDtoOut {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            is_completed: item.is_completed,
            created_at: format_timestamp(&item.created_at),
        }
    }
}

/// One entry of `listMine`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummaryDtoOut {
    pub id: ListId,
    pub title: String,
    pub is_archived: bool,
    pub role: ListRole,
}

impl ListSummaryDtoOut {
    /// Summarise `list` from the point of view of `user_id`.
    #[must_use]
    pub fn for_caller(list: &ShoppingList, user_id: &str) -> Self {
        Self {
            id: list.id,
            title: list.title.clone(),
            is_archived: list.is_archived,
            role: ListRole::for_caller(&list.owner_id, user_id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMineDtoOut {
    pub item_list: Vec<ListSummaryDtoOut>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveDtoOut {
    pub id: ListId,
    pub is_archived: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteDtoOut {
    pub id: ListId,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersDtoOut {
    pub list_id: ListId,
    pub members: Vec<MemberDtoOut>,
}

impl From<&ShoppingList> for MembersDtoOut {
    fn from(list: &ShoppingList) -> Self {
        Self {
            list_id: list.id,
            members: list.members.iter().map(MemberDtoOut::from).collect(),
        }
    }
}

/// Response of item add and item update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemChangeDtoOut {
    pub list_id: ListId,
    pub item: ItemDtoOut,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRemovedDtoOut {
    pub list_id: ListId,
    pub removed_item_id: ItemId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCompletionDtoOut {
    pub list_id: ListId,
    pub item: ItemCompletionState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCompletionState {
    pub id: ItemId,
    pub is_completed: bool,
}
