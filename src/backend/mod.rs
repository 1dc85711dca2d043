//! The REST backend as an actor: [`BackendService`] owns the HTTP client,
//! [`BackendClient`] is the cloneable handle everything else talks to.

mod client;
mod http;
mod messages;
mod service;

pub use client::BackendClient;
pub use http::{Api, Routes};
pub use messages::*;
pub use service::BackendService;
