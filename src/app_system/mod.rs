//! System orchestration, startup, and shutdown logic.

pub mod config;
pub mod order_desk;
pub mod telemetry;

pub use config::*;
pub use order_desk::*;
pub use telemetry::*;
