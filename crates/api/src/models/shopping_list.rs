//! Shopping list document types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopping_list_core::{ItemId, ListId, Quantity};

/// A shopping list with its embedded members and items (domain type).
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingList {
    /// Assigned by the store on insert.
    pub id: ListId,
    pub title: String,
    pub description: String,
    /// Identity of the creator. Never changes after creation.
    pub owner_id: String,
    /// Set-like: no two entries share a `user_id`.
    pub members: Vec<Member>,
    /// Insertion order is display order.
    pub items: Vec<Item>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl ShoppingList {
    /// Find an item by id for in-place mutation.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Take an item out of the list, keeping the order of the rest.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Whether `user_id` owns the list or is listed as a member.
    #[must_use]
    pub fn is_visible_to(&self, user_id: &str) -> bool {
        self.owner_id == user_id || self.members.iter().any(|m| m.user_id == user_id)
    }
}

/// A user granted access to a list's items.
///
/// Serialized in the stored document as `{"userId": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: String,
}

/// One entry on a shopping list.
///
/// This is also the stored JSON shape of an element of the `items` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: Quantity,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Build a fresh, not-yet-completed item stamped with the current time.
    #[must_use]
    pub fn new(new_item: NewItem) -> Self {
        Self {
            id: ItemId::generate(),
            name: new_item.name,
            quantity: new_item.quantity,
            is_completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Validated input for creating a list.
#[derive(Debug, Clone)]
pub struct NewShoppingList {
    pub title: String,
    pub description: String,
    pub owner_id: String,
}

/// Validated input for appending an item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub quantity: Quantity,
}
