//! In-memory [`ListStore`] used by tests and local experiments.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use shopping_list_core::ListId;

use super::{ListStore, StoreError};
use crate::models::{Item, Member, NewShoppingList, ShoppingList};

/// Store that keeps every list in a process-local map.
#[derive(Default)]
pub struct InMemoryListStore {
    lists: RwLock<HashMap<ListId, ShoppingList>>,
}

impl InMemoryListStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a fully formed list into the store, replacing any list with the same id.
    ///
    /// Lets tests set up lists owned by someone other than the caller.
    pub async fn seed(&self, list: ShoppingList) {
        self.lists.write().await.insert(list.id, list);
    }

    /// Number of stored lists.
    pub async fn len(&self) -> usize {
        self.lists.read().await.len()
    }

    /// Whether the store holds no lists.
    pub async fn is_empty(&self) -> bool {
        self.lists.read().await.is_empty()
    }
}

#[async_trait]
impl ListStore for InMemoryListStore {
    async fn insert(&self, list: NewShoppingList) -> Result<ShoppingList, StoreError> {
        let stored = ShoppingList {
            id: ListId::generate(),
            title: list.title,
            description: list.description,
            owner_id: list.owner_id,
            members: Vec::new(),
            items: Vec::new(),
            is_archived: false,
            created_at: Utc::now(),
        };
        self.lists.write().await.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ListId) -> Result<Option<ShoppingList>, StoreError> {
        Ok(self.lists.read().await.get(&id).cloned())
    }

    async fn find_for_user(
        &self,
        user_id: &str,
        include_archived: bool,
    ) -> Result<Vec<ShoppingList>, StoreError> {
        let mut lists: Vec<ShoppingList> = self
            .lists
            .read()
            .await
            .values()
            .filter(|list| list.is_visible_to(user_id))
            .filter(|list| include_archived || !list.is_archived)
            .cloned()
            .collect();
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(lists)
    }

    async fn set_archived(
        &self,
        id: ListId,
        archived: bool,
    ) -> Result<Option<ShoppingList>, StoreError> {
        let mut lists = self.lists.write().await;
        Ok(lists.get_mut(&id).map(|list| {
            list.is_archived = archived;
            list.clone()
        }))
    }

    async fn delete(&self, id: ListId) -> Result<bool, StoreError> {
        Ok(self.lists.write().await.remove(&id).is_some())
    }

    async fn save(&self, list: &ShoppingList) -> Result<bool, StoreError> {
        let mut lists = self.lists.write().await;
        match lists.get_mut(&list.id) {
            Some(stored) => {
                // owner and creation time are fixed at insert
                stored.title.clone_from(&list.title);
                stored.description.clone_from(&list.description);
                stored.members.clone_from(&list.members);
                stored.items.clone_from(&list.items);
                stored.is_archived = list.is_archived;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_member(
        &self,
        id: ListId,
        user_id: &str,
    ) -> Result<Option<ShoppingList>, StoreError> {
        let mut lists = self.lists.write().await;
        Ok(lists.get_mut(&id).map(|list| {
            if !list.members.iter().any(|m| m.user_id == user_id) {
                list.members.push(Member {
                    user_id: user_id.to_owned(),
                });
            }
            list.clone()
        }))
    }

    async fn remove_member(
        &self,
        id: ListId,
        user_id: &str,
    ) -> Result<Option<ShoppingList>, StoreError> {
        let mut lists = self.lists.write().await;
        Ok(lists.get_mut(&id).map(|list| {
            list.members.retain(|m| m.user_id != user_id);
            list.clone()
        }))
    }

    async fn push_item(&self, id: ListId, item: &Item) -> Result<bool, StoreError> {
        let mut lists = self.lists.write().await;
        Ok(lists.get_mut(&id).is_some_and(|list| {
            list.items.push(item.clone());
            true
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
