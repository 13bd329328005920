//! System orchestration, startup, and shutdown logic.

pub mod checkout_system;
pub mod telemetry;

pub use checkout_system::*;
pub use telemetry::*;
