//! Staff-side desk for a restaurant order backend: a live order board with
//! lifecycle transitions and preparation countdowns, plus offer and menu
//! editing, all talking to one REST backend through an actor.

mod client_macros;

pub mod app_system;
pub mod backend;
pub mod countdown;
pub mod domain;
pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod menu_catalog;
pub mod offers;
pub mod order_board;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, DeskConfig, OrderDesk};
pub use error::{BackendError, DeskError};
