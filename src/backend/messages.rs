use chrono::NaiveDate;
use tokio::sync::oneshot;

use crate::domain::{
    CategoryDraft, Coupon, CouponPayload, InsightCounts, ItemDraft, MenuCategory, Order,
};
use crate::error::BackendError;
use crate::lifecycle::TransitionRequest;

pub type BackendResult<T> = Result<T, BackendError>;
pub type BackendResponse<T> = oneshot::Sender<BackendResult<T>>;

/// Staff sign-in. `Debug` never prints the password.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One variant per REST call the desk makes.
#[derive(Debug)]
pub enum BackendRequest {
    FetchOrders {
        respond_to: BackendResponse<Vec<Order>>,
    },
    FetchOrder {
        order_id: String,
        respond_to: BackendResponse<Order>,
    },
    UpdateOrderStatus {
        request: TransitionRequest,
        respond_to: BackendResponse<()>,
    },
    FetchInsights {
        date: NaiveDate,
        respond_to: BackendResponse<InsightCounts>,
    },
    ListCoupons {
        respond_to: BackendResponse<Vec<Coupon>>,
    },
    CreateCoupon {
        payload: CouponPayload,
        respond_to: BackendResponse<()>,
    },
    UpdateCoupon {
        coupon_id: String,
        payload: CouponPayload,
        respond_to: BackendResponse<Coupon>,
    },
    DeleteCoupon {
        coupon_id: String,
        respond_to: BackendResponse<()>,
    },
    FetchMenu {
        respond_to: BackendResponse<Vec<MenuCategory>>,
    },
    ToggleCategory {
        category_id: String,
        respond_to: BackendResponse<()>,
    },
    ToggleItem {
        category_id: String,
        item_id: String,
        respond_to: BackendResponse<()>,
    },
    CreateCategory {
        draft: CategoryDraft,
        respond_to: BackendResponse<MenuCategory>,
    },
    UpdateCategory {
        category_id: String,
        draft: CategoryDraft,
        respond_to: BackendResponse<()>,
    },
    DeleteCategory {
        category_id: String,
        respond_to: BackendResponse<()>,
    },
    AddItem {
        category_id: String,
        draft: ItemDraft,
        respond_to: BackendResponse<()>,
    },
    UpdateItem {
        category_id: String,
        item_id: String,
        draft: ItemDraft,
        respond_to: BackendResponse<()>,
    },
    DeleteItem {
        category_id: String,
        item_id: String,
        respond_to: BackendResponse<()>,
    },
    Login {
        credentials: Credentials,
        respond_to: BackendResponse<String>,
    },
    Shutdown,
}
