//! Typed handles over the actors, plus the checkout orchestration.

#[macro_use]
mod macros;

mod checkout_client;
mod order_client;

pub use checkout_client::*;
pub use order_client::*;
