use chrono::NaiveDate;
use tokio::sync::mpsc;
use tracing::instrument;

use super::messages::{BackendRequest, Credentials};
use crate::client_macros::client_method;
use crate::domain::{
    CategoryDraft, Coupon, CouponPayload, InsightCounts, ItemDraft, MenuCategory, Order,
};
use crate::error::BackendError;
use crate::lifecycle::TransitionRequest;

/// Handle to the [`BackendService`](super::BackendService).
#[derive(Clone)]
pub struct BackendClient {
    sender: mpsc::Sender<BackendRequest>,
}

impl BackendClient {
    pub fn new(sender: mpsc::Sender<BackendRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), BackendError> {
        self.sender
            .send(BackendRequest::Shutdown)
            .await
            .map_err(|_| BackendError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(BackendClient => fn fetch_orders() -> Vec<Order> as BackendRequest::FetchOrders, Error = BackendError);
client_method!(BackendClient => fn fetch_order(order_id: String) -> Order as BackendRequest::FetchOrder, Error = BackendError);
client_method!(BackendClient => fn update_order_status(request: TransitionRequest) -> () as BackendRequest::UpdateOrderStatus, Error = BackendError);
client_method!(BackendClient => fn fetch_insights(date: NaiveDate) -> InsightCounts as BackendRequest::FetchInsights, Error = BackendError);

client_method!(BackendClient => fn list_coupons() -> Vec<Coupon> as BackendRequest::ListCoupons, Error = BackendError);
client_method!(BackendClient => fn create_coupon(payload: CouponPayload) -> () as BackendRequest::CreateCoupon, Error = BackendError);
client_method!(BackendClient => fn update_coupon(coupon_id: String, payload: CouponPayload) -> Coupon as BackendRequest::UpdateCoupon, Error = BackendError);
client_method!(BackendClient => fn delete_coupon(coupon_id: String) -> () as BackendRequest::DeleteCoupon, Error = BackendError);

client_method!(BackendClient => fn fetch_menu() -> Vec<MenuCategory> as BackendRequest::FetchMenu, Error = BackendError);
client_method!(BackendClient => fn toggle_category(category_id: String) -> () as BackendRequest::ToggleCategory, Error = BackendError);
client_method!(BackendClient => fn toggle_item(category_id: String, item_id: String) -> () as BackendRequest::ToggleItem, Error = BackendError);
client_method!(BackendClient => fn create_category(draft: CategoryDraft) -> MenuCategory as BackendRequest::CreateCategory, Error = BackendError);
client_method!(BackendClient => fn update_category(category_id: String, draft: CategoryDraft) -> () as BackendRequest::UpdateCategory, Error = BackendError);
client_method!(BackendClient => fn delete_category(category_id: String) -> () as BackendRequest::DeleteCategory, Error = BackendError);
client_method!(BackendClient => fn add_item(category_id: String, draft: ItemDraft) -> () as BackendRequest::AddItem, Error = BackendError);
client_method!(BackendClient => fn update_item(category_id: String, item_id: String, draft: ItemDraft) -> () as BackendRequest::UpdateItem, Error = BackendError);
client_method!(BackendClient => fn delete_item(category_id: String, item_id: String) -> () as BackendRequest::DeleteItem, Error = BackendError);

client_method!(BackendClient => fn login(credentials: Credentials) -> String as BackendRequest::Login, Error = BackendError);
