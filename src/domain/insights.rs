use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::order::{Order, OrderStatus};

/// Per-day order counts shown on the insights screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightCounts {
    #[serde(default)]
    pub placed: u32,
    #[serde(default)]
    pub delivered: u32,
    #[serde(default)]
    pub cancelled: u32,
    #[serde(default)]
    pub pending: u32,
}

impl InsightCounts {
    /// Counts the orders placed on `date` (in `tz`) from a local order set.
    ///
    /// Rejected orders count as cancelled; every status that is not terminal
    /// counts as pending.
    pub fn from_orders_in<Tz: TimeZone>(orders: &[Order], date: NaiveDate, tz: &Tz) -> Self {
        orders
            .iter()
            .filter(|order| order.local_date_in(tz) == date)
            .fold(Self::default(), |mut counts, order| {
                counts.placed += 1;
                match order.status {
                    OrderStatus::Delivered => counts.delivered += 1,
                    OrderStatus::Rejected | OrderStatus::Cancelled => counts.cancelled += 1,
                    _ => counts.pending += 1,
                }
                counts
            })
    }
}
