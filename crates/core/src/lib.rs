//! Shopping List Core - Shared types library.
//!
//! This crate provides the types shared by the shopping list components:
//! - `api` - The HTTP service and its document store
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Opaque ids, caller profiles and item quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
