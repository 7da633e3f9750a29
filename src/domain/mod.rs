//! Domain layer - entities, value types, and domain errors.

pub mod foundation;
pub mod list;
pub mod todo;
pub mod user;
