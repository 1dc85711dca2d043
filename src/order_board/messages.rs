use std::collections::HashMap;

use tokio::sync::oneshot;

use crate::countdown::format_countdown;
use crate::domain::{Order, OrderStatus, DEFAULT_PREP_MINUTES};
use crate::error::DeskError;
use crate::filter::OrderFilter;

pub type BoardResponse<T> = oneshot::Sender<Result<T, DeskError>>;

#[derive(Debug)]
pub enum BoardRequest {
    /// A poll result; replaces the order set wholesale.
    Reconcile { orders: Vec<Order> },
    /// One second of the process-wide countdown tick.
    Tick,
    Refresh {
        respond_to: BoardResponse<usize>,
    },
    RequestTransition {
        order_id: String,
        target: OrderStatus,
        prep_minutes: Option<u32>,
        respond_to: BoardResponse<()>,
    },
    AdjustPrepTime {
        order_id: String,
        delta: i32,
        respond_to: BoardResponse<u32>,
    },
    SetFilter {
        filter: OrderFilter,
        respond_to: BoardResponse<()>,
    },
    VisibleOrders {
        respond_to: BoardResponse<Vec<Order>>,
    },
    Snapshot {
        respond_to: BoardResponse<BoardSnapshot>,
    },
    Shutdown,
}

/// Copy of everything the board holds, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub orders: Vec<Order>,
    pub new_order_count: usize,
    pub countdowns: HashMap<String, i64>,
    pub prep_times: HashMap<String, u32>,
    pub filter: OrderFilter,
}

impl BoardSnapshot {
    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.order_id == order_id)
    }

    /// Preparation minutes a new order would be accepted with.
    pub fn prep_minutes_for(&self, order_id: &str) -> u32 {
        self.prep_times
            .get(order_id)
            .copied()
            .unwrap_or(DEFAULT_PREP_MINUTES)
    }

    /// Timer badge text for an order being prepared.
    pub fn countdown_label(&self, order_id: &str) -> Option<String> {
        self.countdowns.get(order_id).copied().map(format_countdown)
    }
}
