use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Preparation time offered when staff have not adjusted it.
pub const DEFAULT_PREP_MINUTES: u32 = 20;
/// Staff cannot shorten preparation below this.
pub const MIN_PREP_MINUTES: u32 = 5;

/// Where an order is in its lifecycle.
///
/// Encoded with one canonical literal per status. Decoding also accepts the
/// spellings older backend rows carry (`PickedUp`, `Delevered`, `Canceled`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Ordered,
    Preparing,
    Ready,
    #[serde(rename = "Picked Up", alias = "PickedUp")]
    PickedUp,
    #[serde(alias = "Delevered")]
    Delivered,
    Rejected,
    #[serde(alias = "Canceled")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Ordered,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::PickedUp,
        OrderStatus::Delivered,
        OrderStatus::Rejected,
        OrderStatus::Cancelled,
    ];

    /// The literal the backend expects in paths and bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Ordered => "Ordered",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::PickedUp => "Picked Up",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    /// Unit cost.
    pub cost: f64,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: u32, cost: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            cost,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.cost * f64::from(self.quantity)
    }
}

/// A customer order as the backend reports it.
///
/// Orders are placed by the customer-facing system; the desk only observes
/// them and asks the backend to move them along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "super::wire::id")]
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub delivery_location: String,
    #[serde(default, deserialize_with = "super::wire::id")]
    pub user_id: String,
    /// Preparation minutes recorded when the order was accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates a freshly placed order. The total is fixed from the items here
    /// and never recomputed.
    pub fn new(
        order_id: impl Into<String>,
        user_id: impl Into<String>,
        items: Vec<OrderItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total = items.iter().map(OrderItem::line_total).sum();
        Self {
            order_id: order_id.into(),
            status: OrderStatus::Ordered,
            items,
            total,
            created_at,
            delivery_location: String::new(),
            user_id: user_id.into(),
            prep_time: None,
            accepted_at: None,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.delivery_location = location.into();
        self
    }

    /// New orders are the ones still waiting for staff to accept or reject.
    pub fn is_new(&self) -> bool {
        self.status == OrderStatus::Ordered
    }

    /// Calendar day the order was placed on, as seen from `tz`.
    pub fn local_date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.created_at.with_timezone(tz).date_naive()
    }
}

/// Applies a staff `+`/`-` press to a preparation time, never going below
/// [`MIN_PREP_MINUTES`] and saturating at the top.
pub fn adjust_prep_minutes(current: u32, delta: i32) -> u32 {
    let adjusted = (i64::from(current) + i64::from(delta)).max(i64::from(MIN_PREP_MINUTES));
    u32::try_from(adjusted).unwrap_or(u32::MAX)
}
