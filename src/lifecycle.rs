//! Order status state machine.
//!
//! ```text
//! Ordered -> Preparing -> Ready -> Picked Up -> Delivered
//!    |
//!    +-> Rejected
//! ```
//!
//! `Cancelled` is decided on the customer side and only ever observed here.

use crate::domain::{Order, OrderStatus, DEFAULT_PREP_MINUTES, MIN_PREP_MINUTES};
use crate::error::DeskError;

impl OrderStatus {
    /// The single forward step from this status, if any.
    pub fn successor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Ordered => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::PickedUp),
            OrderStatus::PickedUp => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Rejected | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Rejected | OrderStatus::Cancelled
        )
    }

    /// Statuses staff may move an order to from here. Drives which actions
    /// an order card offers.
    pub fn staff_targets(self) -> Vec<OrderStatus> {
        let mut targets: Vec<OrderStatus> = self.successor().into_iter().collect();
        if self == OrderStatus::Ordered {
            targets.push(OrderStatus::Rejected);
        }
        targets
    }
}

/// Succeeds iff staff may move an order from `from` straight to `to`.
pub fn check_transition(from: OrderStatus, to: OrderStatus) -> Result<(), DeskError> {
    if from.staff_targets().contains(&to) {
        Ok(())
    } else {
        Err(DeskError::InvalidTransition { from, to })
    }
}

/// A validated status change, ready to send to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub order_id: String,
    pub target: OrderStatus,
    /// Only set when accepting an order.
    pub prep_time: Option<u32>,
}

impl TransitionRequest {
    /// Validates moving `order` to `target`.
    ///
    /// Accepting (`Ordered -> Preparing`) carries `prep_minutes`, defaulting
    /// to [`DEFAULT_PREP_MINUTES`]; other transitions ignore it.
    pub fn for_order(
        order: &Order,
        target: OrderStatus,
        prep_minutes: Option<u32>,
    ) -> Result<Self, DeskError> {
        check_transition(order.status, target)?;

        let prep_time = if target == OrderStatus::Preparing {
            if order.items.is_empty() {
                return Err(DeskError::ValidationError(format!(
                    "Order {} has no items to prepare",
                    order.order_id
                )));
            }
            let minutes = prep_minutes.unwrap_or(DEFAULT_PREP_MINUTES);
            if minutes < MIN_PREP_MINUTES {
                return Err(DeskError::ValidationError(format!(
                    "Preparation time must be at least {MIN_PREP_MINUTES} minutes, got {minutes}"
                )));
            }
            Some(minutes)
        } else {
            None
        };

        Ok(Self {
            order_id: order.order_id.clone(),
            target,
            prep_time,
        })
    }
}
