//! Which orders a view shows.

use chrono::{Local, NaiveDate, TimeZone};

use crate::domain::{Order, OrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Status and calendar-day selection for an order list.
///
/// The date is compared as a local calendar day, not as a timestamp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: StatusFilter,
    pub date: Option<NaiveDate>,
}

impl Default for OrderFilter {
    /// The home board opens on orders being prepared.
    fn default() -> Self {
        Self::status(OrderStatus::Preparing)
    }
}

impl OrderFilter {
    pub fn all() -> Self {
        Self {
            status: StatusFilter::All,
            date: None,
        }
    }

    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: StatusFilter::Only(status),
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn matches_in<Tz: TimeZone>(&self, order: &Order, tz: &Tz) -> bool {
        self.status.matches(order.status)
            && self.date.map_or(true, |date| order.local_date_in(tz) == date)
    }

    /// Visible orders, in the order the backend returned them.
    pub fn apply_in<Tz: TimeZone>(&self, orders: &[Order], tz: &Tz) -> Vec<Order> {
        orders
            .iter()
            .filter(|order| self.matches_in(order, tz))
            .cloned()
            .collect()
    }

    /// [`apply_in`](Self::apply_in) using the device's time zone.
    pub fn apply(&self, orders: &[Order]) -> Vec<Order> {
        self.apply_in(orders, &Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn order(id: &str, status: OrderStatus, y: i32, m: u32, d: u32, h: u32) -> Order {
        Order::new(id, "u1", vec![], Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap())
            .with_status(status)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn all_with_a_date_keeps_only_that_day() {
        let orders = vec![
            order("1", OrderStatus::Delivered, 2025, 3, 24, 12),
            order("2", OrderStatus::Cancelled, 2025, 3, 23, 12),
        ];
        let visible = OrderFilter::all().on(day(24)).apply_in(&orders, &Utc);
        let ids: Vec<_> = visible.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn status_and_date_must_both_match() {
        let orders = vec![
            order("1", OrderStatus::Delivered, 2025, 3, 24, 9),
            order("2", OrderStatus::Ready, 2025, 3, 24, 10),
            order("3", OrderStatus::Delivered, 2025, 3, 22, 11),
        ];
        let visible = OrderFilter::status(OrderStatus::Delivered)
            .on(day(24))
            .apply_in(&orders, &Utc);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].order_id, "1");
    }

    #[test]
    fn preserves_backend_order() {
        let orders = vec![
            order("9", OrderStatus::Ready, 2025, 3, 24, 18),
            order("3", OrderStatus::Ready, 2025, 3, 24, 8),
            order("5", OrderStatus::Ready, 2025, 3, 24, 12),
        ];
        let ids: Vec<_> = OrderFilter::status(OrderStatus::Ready)
            .apply_in(&orders, &Utc)
            .into_iter()
            .map(|o| o.order_id)
            .collect();
        assert_eq!(ids, vec!["9", "3", "5"]);
    }

    #[test]
    fn applying_twice_changes_nothing() {
        let orders = vec![
            order("1", OrderStatus::Preparing, 2025, 3, 24, 12),
            order("2", OrderStatus::Ready, 2025, 3, 24, 12),
            order("3", OrderStatus::Preparing, 2025, 3, 23, 12),
        ];
        for filter in [
            OrderFilter::default(),
            OrderFilter::all(),
            OrderFilter::all().on(day(24)),
            OrderFilter::status(OrderStatus::Preparing).on(day(23)),
        ] {
            let once = filter.apply_in(&orders, &Utc);
            let twice = filter.apply_in(&once, &Utc);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn day_boundary_depends_on_time_zone() {
        let late = vec![order("1", OrderStatus::Ready, 2025, 3, 23, 20)];
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let filter = OrderFilter::all().on(day(24));
        assert!(filter.apply_in(&late, &Utc).is_empty());
        assert_eq!(filter.apply_in(&late, &ist).len(), 1);
    }
}
