//! Core types for the shopping list domain.

pub mod id;
pub mod profile;
pub mod quantity;

pub use id::*;
pub use profile::{ListRole, Profile, ProfileError};
pub use quantity::Quantity;
