//! Order-specific domain logic: the created → paid transition.

mod actions;
pub mod entity;

pub use actions::*;
