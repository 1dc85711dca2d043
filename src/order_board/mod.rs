//! The live order board: an actor holding the current orders, their
//! countdowns and the active filter, fed by a poller and a ticker.

mod client;
mod messages;
mod service;
mod timers;

pub use client::OrderBoardClient;
pub use messages::*;
pub use service::OrderBoardService;
pub use timers::{run_poller, run_ticker};
