//! Request and response shapes exchanged at the API boundary.

pub mod input;
pub mod output;

pub use input::{DTO_IN_PARAM, DtoIn};
pub use output::*;
