use tokio::sync::mpsc;
use tracing::{debug, instrument};

use super::messages::{BoardRequest, BoardSnapshot};
use crate::client_macros::client_method;
use crate::domain::{Order, OrderStatus};
use crate::error::DeskError;
use crate::filter::OrderFilter;

/// Handle to the [`OrderBoardService`](super::OrderBoardService).
#[derive(Clone)]
pub struct OrderBoardClient {
    sender: mpsc::Sender<BoardRequest>,
}

impl OrderBoardClient {
    pub fn new(sender: mpsc::Sender<BoardRequest>) -> Self {
        Self { sender }
    }

    /// Hands a poll result to the board without waiting for it to be applied.
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn reconcile(&self, orders: Vec<Order>) -> Result<(), DeskError> {
        debug!("Sending reconcile");
        self.sender
            .send(BoardRequest::Reconcile { orders })
            .await
            .map_err(|_| DeskError::ActorCommunicationError("Actor closed".to_string()))
    }

    pub async fn tick(&self) -> Result<(), DeskError> {
        self.sender
            .send(BoardRequest::Tick)
            .await
            .map_err(|_| DeskError::ActorCommunicationError("Actor closed".to_string()))
    }

    /// Accepts an order with the given preparation time.
    pub async fn accept(&self, order_id: String, prep_minutes: u32) -> Result<(), DeskError> {
        self.request_transition(order_id, OrderStatus::Preparing, Some(prep_minutes))
            .await
    }

    /// Moves an order one step forward along its lifecycle.
    pub async fn advance(&self, order_id: String, target: OrderStatus) -> Result<(), DeskError> {
        self.request_transition(order_id, target, None).await
    }

    pub async fn reject(&self, order_id: String) -> Result<(), DeskError> {
        self.request_transition(order_id, OrderStatus::Rejected, None)
            .await
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), DeskError> {
        debug!("Sending shutdown request");
        self.sender
            .send(BoardRequest::Shutdown)
            .await
            .map_err(|_| DeskError::ActorCommunicationError("Actor closed".to_string()))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

client_method!(OrderBoardClient => fn refresh() -> usize as BoardRequest::Refresh, Error = DeskError);
client_method!(OrderBoardClient => fn request_transition(order_id: String, target: OrderStatus, prep_minutes: Option<u32>) -> () as BoardRequest::RequestTransition, Error = DeskError);
client_method!(OrderBoardClient => fn adjust_prep_time(order_id: String, delta: i32) -> u32 as BoardRequest::AdjustPrepTime, Error = DeskError);
client_method!(OrderBoardClient => fn set_filter(filter: OrderFilter) -> () as BoardRequest::SetFilter, Error = DeskError);
client_method!(OrderBoardClient => fn visible_orders() -> Vec<Order> as BoardRequest::VisibleOrders, Error = DeskError);
client_method!(OrderBoardClient => fn snapshot() -> BoardSnapshot as BoardRequest::Snapshot, Error = DeskError);
