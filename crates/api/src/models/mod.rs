//! Domain models for the shopping list service.
//!
//! A [`ShoppingList`] is the unit of storage: its members and items live
//! inside it and have no lifecycle of their own.

pub mod shopping_list;

pub use shopping_list::{Item, Member, NewItem, NewShoppingList, ShoppingList};
