//! Demo data.

use shopping_list_api::db::{ListStore, PgListStore, StoreError};
use shopping_list_api::models::{Item, NewItem, NewShoppingList};
use shopping_list_core::Quantity;

use super::{ConnectError, connect};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

const DEMO_ITEMS: &[(&str, f64)] = &[("Milk", 2.0), ("Bread", 1.0), ("Apples", 6.0)];

/// Create one list with a few items, owned by `owner`.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or a write fails.
pub async fn demo_list(owner: &str, members: &[String]) -> Result<(), SeedError> {
    let store = PgListStore::new(connect().await?);

    let list = store
        .insert(NewShoppingList {
            title: "Weekly groceries".to_string(),
            description: "Demo list".to_string(),
            owner_id: owner.to_string(),
        })
        .await?;

    for member in members {
        store.add_member(list.id, member).await?;
    }

    for &(name, quantity) in DEMO_ITEMS {
        let item = Item::new(NewItem {
            name: name.to_string(),
            quantity: Quantity::new(quantity).unwrap_or_default(),
        });
        store.push_item(list.id, &item).await?;
    }

    tracing::info!(list_id = %list.id, owner, "Demo list created");
    Ok(())
}
