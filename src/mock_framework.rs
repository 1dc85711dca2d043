//! # Mock Framework
//!
//! Utilities for testing the desk without a REST backend.
//!
//! Use [`create_mock_backend`] to get a [`BackendClient`] and the receiver its
//! requests arrive on. Then use helpers like [`expect_fetch_orders`] or
//! [`expect_update_status`] to assert each request and answer it.

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::mpsc;

use crate::backend::{BackendClient, BackendRequest, BackendResponse, Credentials};
use crate::domain::{
    CategoryType, Coupon, CouponPayload, MenuCategory, MenuItem, Order, OrderItem, OrderStatus,
};
use crate::lifecycle::TransitionRequest;

pub type MockBackend = mpsc::Receiver<BackendRequest>;

/// Creates a backend client whose requests land on the returned receiver.
pub fn create_mock_backend(buffer_size: usize) -> (BackendClient, MockBackend) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (BackendClient::new(sender), receiver)
}

pub async fn expect_fetch_orders(receiver: &mut MockBackend) -> Option<BackendResponse<Vec<Order>>> {
    match receiver.recv().await {
        Some(BackendRequest::FetchOrders { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_fetch_order(
    receiver: &mut MockBackend,
) -> Option<(String, BackendResponse<Order>)> {
    match receiver.recv().await {
        Some(BackendRequest::FetchOrder {
            order_id,
            respond_to,
        }) => Some((order_id, respond_to)),
        _ => None,
    }
}

pub async fn expect_update_status(
    receiver: &mut MockBackend,
) -> Option<(TransitionRequest, BackendResponse<()>)> {
    match receiver.recv().await {
        Some(BackendRequest::UpdateOrderStatus {
            request,
            respond_to,
        }) => Some((request, respond_to)),
        _ => None,
    }
}

pub async fn expect_list_coupons(receiver: &mut MockBackend) -> Option<BackendResponse<Vec<Coupon>>> {
    match receiver.recv().await {
        Some(BackendRequest::ListCoupons { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_create_coupon(
    receiver: &mut MockBackend,
) -> Option<(CouponPayload, BackendResponse<()>)> {
    match receiver.recv().await {
        Some(BackendRequest::CreateCoupon {
            payload,
            respond_to,
        }) => Some((payload, respond_to)),
        _ => None,
    }
}

pub async fn expect_delete_coupon(
    receiver: &mut MockBackend,
) -> Option<(String, BackendResponse<()>)> {
    match receiver.recv().await {
        Some(BackendRequest::DeleteCoupon {
            coupon_id,
            respond_to,
        }) => Some((coupon_id, respond_to)),
        _ => None,
    }
}

pub async fn expect_fetch_menu(
    receiver: &mut MockBackend,
) -> Option<BackendResponse<Vec<MenuCategory>>> {
    match receiver.recv().await {
        Some(BackendRequest::FetchMenu { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_toggle_item(
    receiver: &mut MockBackend,
) -> Option<(String, String, BackendResponse<()>)> {
    match receiver.recv().await {
        Some(BackendRequest::ToggleItem {
            category_id,
            item_id,
            respond_to,
        }) => Some((category_id, item_id, respond_to)),
        _ => None,
    }
}

pub async fn expect_toggle_category(
    receiver: &mut MockBackend,
) -> Option<(String, BackendResponse<()>)> {
    match receiver.recv().await {
        Some(BackendRequest::ToggleCategory {
            category_id,
            respond_to,
        }) => Some((category_id, respond_to)),
        _ => None,
    }
}

pub async fn expect_delete_item(
    receiver: &mut MockBackend,
) -> Option<(String, String, BackendResponse<()>)> {
    match receiver.recv().await {
        Some(BackendRequest::DeleteItem {
            category_id,
            item_id,
            respond_to,
        }) => Some((category_id, item_id, respond_to)),
        _ => None,
    }
}

pub async fn expect_login(
    receiver: &mut MockBackend,
) -> Option<(Credentials, BackendResponse<String>)> {
    match receiver.recv().await {
        Some(BackendRequest::Login {
            credentials,
            respond_to,
        }) => Some((credentials, respond_to)),
        _ => None,
    }
}

pub fn created_at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

pub fn order(order_id: &str, status: OrderStatus) -> Order {
    Order::new(
        order_id,
        "user_1",
        vec![
            OrderItem::new("Chicken Biryani", 2, 250.0),
            OrderItem::new("Lassi", 1, 60.0),
        ],
        created_at(24, 12),
    )
    .with_status(status)
    .with_location("Table 4")
}

pub fn coupon(id: &str, code: &str, expiry: &str) -> Coupon {
    serde_json::from_value(serde_json::json!({
        "_id": id,
        "code": code,
        "description": "Weekend offer",
        "discountAmount": 50,
        "minOrderAmount": 300,
        "expiryDate": expiry,
    }))
    .unwrap()
}

pub fn category(id: &str, enabled: bool, items: &[(&str, bool)]) -> MenuCategory {
    MenuCategory {
        id: id.to_string(),
        name: format!("Category {id}"),
        category_type: CategoryType::Veg,
        image: None,
        is_enabled: enabled,
        items: items
            .iter()
            .map(|(item_id, item_enabled)| MenuItem {
                id: item_id.to_string(),
                name: format!("Item {item_id}"),
                cost: 120.0,
                image: None,
                is_enabled: *item_enabled,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let (client, mut receiver) = create_mock_backend(10);

        let fetch_task = tokio::spawn(async move { client.fetch_orders().await });

        let responder = expect_fetch_orders(&mut receiver)
            .await
            .expect("Expected FetchOrders request");
        responder
            .send(Ok(vec![order("1", OrderStatus::Ordered)]))
            .unwrap();

        let orders = fetch_task.await.unwrap().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total, 560.0);
    }

    #[tokio::test]
    async fn dropped_responder_is_an_actor_error() {
        let (client, mut receiver) = create_mock_backend(10);

        let fetch_task = tokio::spawn(async move { client.list_coupons().await });
        drop(expect_list_coupons(&mut receiver).await);

        assert!(matches!(
            fetch_task.await.unwrap(),
            Err(crate::error::BackendError::ActorCommunicationError(_))
        ));
    }
}
