//! Records exchanged with the restaurant backend, plus the small local-only
//! schedule model.

pub mod coupon;
pub mod insights;
pub mod menu;
pub mod order;
pub mod schedule;
mod wire;

pub use coupon::*;
pub use insights::*;
pub use menu::*;
pub use order::*;
pub use schedule::*;
