//! Preparation countdowns for orders in `Preparing`.
//!
//! Remaining time is allowed to go negative; the readout then switches to an
//! overtime form (`+M:SS`).

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{Order, OrderStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Countdowns {
    remaining: HashMap<String, i64>,
}

impl Countdowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) a full countdown for an order just accepted.
    pub fn start(&mut self, order_id: impl Into<String>, minutes: u32) {
        self.remaining.insert(order_id.into(), i64::from(minutes) * 60);
    }

    /// Starts a countdown for an order accepted at `accepted_at`, already
    /// reduced by the time that has passed since.
    pub fn start_from_acceptance(
        &mut self,
        order_id: impl Into<String>,
        minutes: u32,
        accepted_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        let elapsed = (now - accepted_at).num_seconds().max(0);
        self.remaining
            .insert(order_id.into(), i64::from(minutes) * 60 - elapsed);
    }

    pub fn remaining(&self, order_id: &str) -> Option<i64> {
        self.remaining.get(order_id).copied()
    }

    pub fn is_tracking(&self, order_id: &str) -> bool {
        self.remaining.contains_key(order_id)
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// One second passes for every tracked order.
    pub fn tick(&mut self) {
        for seconds in self.remaining.values_mut() {
            *seconds -= 1;
        }
    }

    pub fn remove(&mut self, order_id: &str) -> Option<i64> {
        self.remaining.remove(order_id)
    }

    /// Drops entries whose order is gone or no longer preparing.
    pub fn retain_preparing(&mut self, orders: &[Order]) {
        self.remaining.retain(|order_id, _| {
            orders
                .iter()
                .any(|o| &o.order_id == order_id && o.status == OrderStatus::Preparing)
        });
    }

    pub fn snapshot(&self) -> HashMap<String, i64> {
        self.remaining.clone()
    }
}

/// `M:SS` with zero-padded seconds; overtime renders as `+M:SS`.
pub fn format_countdown(seconds: i64) -> String {
    let sign = if seconds < 0 { "+" } else { "" };
    let seconds = seconds.unsigned_abs();
    format!("{sign}{}:{:02}", seconds / 60, seconds % 60)
}
