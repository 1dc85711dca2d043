use std::time::Duration;

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::messages::Credentials;
use crate::domain::{
    CategoryDraft, Coupon, CouponPayload, ImageUpload, InsightCounts, ItemDraft, MenuCategory,
    Order,
};
use crate::error::BackendError;
use crate::lifecycle::TransitionRequest;

// Unreserved characters stay as they are; everything else is escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// URL layout of the restaurant backend under its `/api` base.
#[derive(Debug, Clone, PartialEq)]
pub struct Routes {
    base: String,
}

impl Routes {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn all_orders(&self) -> String {
        format!("{}/order/getAllOrders", self.base)
    }

    pub fn order(&self, order_id: &str) -> String {
        format!("{}/order/{}", self.base, segment(order_id))
    }

    pub fn status_update(&self, order_id: &str, target: &str) -> String {
        format!(
            "{}/order/adminStatusUpdate/{}/{}",
            self.base,
            segment(order_id),
            segment(target)
        )
    }

    pub fn insights(&self) -> String {
        format!("{}/order/insights", self.base)
    }

    pub fn coupons(&self) -> String {
        format!("{}/coupon/", self.base)
    }

    pub fn create_coupon(&self) -> String {
        format!("{}/coupon/create", self.base)
    }

    pub fn coupon(&self, coupon_id: &str) -> String {
        format!("{}/coupon/{}", self.base, segment(coupon_id))
    }

    pub fn menu(&self) -> String {
        format!("{}/menu/getMenu", self.base)
    }

    pub fn toggle_category(&self, category_id: &str) -> String {
        format!("{}/menu/toggleCategory/{}", self.base, segment(category_id))
    }

    pub fn toggle_item(&self, category_id: &str, item_id: &str) -> String {
        format!(
            "{}/menu/toggleItem/{}/{}",
            self.base,
            segment(category_id),
            segment(item_id)
        )
    }

    pub fn create_category(&self) -> String {
        format!("{}/menu/createCategory", self.base)
    }

    pub fn update_category(&self) -> String {
        format!("{}/menu/updateCategoryById", self.base)
    }

    pub fn delete_category(&self, category_id: &str) -> String {
        format!("{}/menu/deleteCategoryById/{}", self.base, segment(category_id))
    }

    pub fn add_item(&self) -> String {
        format!("{}/menu/addItemToCategory", self.base)
    }

    pub fn update_item(&self, category_id: &str, item_id: &str) -> String {
        format!(
            "{}/menu/updateItem/{}/{}",
            self.base,
            segment(category_id),
            segment(item_id)
        )
    }

    pub fn delete_item(&self, category_id: &str, item_id: &str) -> String {
        format!(
            "{}/menu/deleteItem/{}/{}",
            self.base,
            segment(category_id),
            segment(item_id)
        )
    }

    pub fn login(&self) -> String {
        format!("{}/admin/login", self.base)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrepTimeBody {
    prep_time: u32,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: String,
}

/// Pulls `message` out of a JSON error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<MessageBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        _ => body.trim().to_string(),
    }
}

async fn expect_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, BackendError> {
    let response = expect_success(request.send().await?).await?;
    Ok(response.json::<T>().await?)
}

async fn send_unit(request: RequestBuilder) -> Result<(), BackendError> {
    expect_success(request.send().await?).await?;
    Ok(())
}

fn image_part(image: &ImageUpload) -> Result<Part, BackendError> {
    Ok(Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str("image/jpeg")?)
}

fn category_form(draft: &CategoryDraft) -> Result<Form, BackendError> {
    let mut form = Form::new()
        .text("name", draft.name.trim().to_string())
        .text("categoryType", draft.category_type.as_str());
    if let Some(image) = &draft.image {
        form = form.part("image", image_part(image)?);
    }
    Ok(form)
}

fn item_form(draft: &ItemDraft) -> Result<Form, BackendError> {
    let mut form = Form::new()
        .text("itemName", draft.name.trim().to_string())
        .text("itemCost", draft.cost.unwrap_or_default().to_string());
    if let Some(image) = &draft.image {
        form = form.part("image", image_part(image)?);
    }
    Ok(form)
}

/// The HTTP side of the backend service. Cheap to clone; every call runs on
/// its own task.
#[derive(Debug, Clone)]
pub struct Api {
    http: Client,
    routes: Routes,
}

impl Api {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            routes: Routes::new(base_url),
        })
    }

    #[instrument(skip(self))]
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, BackendError> {
        let orders: Vec<Order> = send_json(self.http.get(self.routes.all_orders())).await?;
        debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn fetch_order(&self, order_id: &str) -> Result<Order, BackendError> {
        send_json(self.http.get(self.routes.order(order_id))).await
    }

    #[instrument(skip(self), fields(order_id = %request.order_id, target = %request.target))]
    pub async fn update_order_status(&self, request: &TransitionRequest) -> Result<(), BackendError> {
        let url = self
            .routes
            .status_update(&request.order_id, request.target.as_str());
        let mut builder = self.http.post(url);
        if let Some(prep_time) = request.prep_time {
            builder = builder.json(&PrepTimeBody { prep_time });
        }
        send_unit(builder).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_insights(&self, date: NaiveDate) -> Result<InsightCounts, BackendError> {
        let day = date.format("%Y-%m-%d").to_string();
        send_json(self.http.get(self.routes.insights()).query(&[("date", day)])).await
    }

    #[instrument(skip(self))]
    pub async fn list_coupons(&self) -> Result<Vec<Coupon>, BackendError> {
        send_json(self.http.get(self.routes.coupons())).await
    }

    #[instrument(skip(self, payload), fields(code = %payload.code))]
    pub async fn create_coupon(&self, payload: &CouponPayload) -> Result<(), BackendError> {
        send_unit(self.http.post(self.routes.create_coupon()).json(payload)).await
    }

    #[instrument(skip(self, payload), fields(code = %payload.code))]
    pub async fn update_coupon(
        &self,
        coupon_id: &str,
        payload: &CouponPayload,
    ) -> Result<Coupon, BackendError> {
        send_json(self.http.put(self.routes.coupon(coupon_id)).json(payload)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_coupon(&self, coupon_id: &str) -> Result<(), BackendError> {
        send_unit(self.http.delete(self.routes.coupon(coupon_id))).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_menu(&self) -> Result<Vec<MenuCategory>, BackendError> {
        send_json(self.http.get(self.routes.menu())).await
    }

    #[instrument(skip(self))]
    pub async fn toggle_category(&self, category_id: &str) -> Result<(), BackendError> {
        send_unit(self.http.patch(self.routes.toggle_category(category_id))).await
    }

    #[instrument(skip(self))]
    pub async fn toggle_item(&self, category_id: &str, item_id: &str) -> Result<(), BackendError> {
        send_unit(self.http.patch(self.routes.toggle_item(category_id, item_id))).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<MenuCategory, BackendError> {
        let form = category_form(draft)?.text("isEnabled", "true");
        send_json(self.http.post(self.routes.create_category()).multipart(form)).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn update_category(
        &self,
        category_id: &str,
        draft: &CategoryDraft,
    ) -> Result<(), BackendError> {
        let form = category_form(draft)?.text("id", category_id.to_string());
        send_unit(self.http.put(self.routes.update_category()).multipart(form)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, category_id: &str) -> Result<(), BackendError> {
        send_unit(self.http.delete(self.routes.delete_category(category_id))).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_item(&self, category_id: &str, draft: &ItemDraft) -> Result<(), BackendError> {
        let form = item_form(draft)?.text("categoryId", category_id.to_string());
        send_unit(self.http.post(self.routes.add_item()).multipart(form)).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn update_item(
        &self,
        category_id: &str,
        item_id: &str,
        draft: &ItemDraft,
    ) -> Result<(), BackendError> {
        let form = item_form(draft)?;
        send_unit(
            self.http
                .post(self.routes.update_item(category_id, item_id))
                .header("X-HTTP-Method-Override", "PUT")
                .multipart(form),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, category_id: &str, item_id: &str) -> Result<(), BackendError> {
        send_unit(self.http.delete(self.routes.delete_item(category_id, item_id))).await
    }

    #[instrument(skip(self))]
    pub async fn login(&self, credentials: &Credentials) -> Result<String, BackendError> {
        let body = LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        };
        let reply: MessageBody = send_json(self.http.post(self.routes.login()).json(&body)).await?;
        Ok(reply.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_literals_are_escaped_in_paths() {
        let routes = Routes::new("http://127.0.0.1:2000/api/");
        assert_eq!(
            routes.status_update("1", "Picked Up"),
            "http://127.0.0.1:2000/api/order/adminStatusUpdate/1/Picked%20Up"
        );
        assert_eq!(
            routes.status_update("ord-7", "Preparing"),
            "http://127.0.0.1:2000/api/order/adminStatusUpdate/ord-7/Preparing"
        );
    }

    #[test]
    fn menu_routes_carry_both_ids() {
        let routes = Routes::new("http://host/api");
        assert_eq!(routes.toggle_item("c1", "i2"), "http://host/api/menu/toggleItem/c1/i2");
        assert_eq!(routes.delete_item("c1", "i2"), "http://host/api/menu/deleteItem/c1/i2");
        assert_eq!(routes.coupons(), "http://host/api/coupon/");
        assert_eq!(routes.coupon("a/b"), "http://host/api/coupon/a%2Fb");
    }

    #[test]
    fn prep_time_body_is_camel_case() {
        let body = serde_json::to_string(&PrepTimeBody { prep_time: 15 }).unwrap();
        assert_eq!(body, r#"{"prepTime":15}"#);
    }

    #[test]
    fn error_bodies_prefer_the_message_field() {
        assert_eq!(error_message(r#"{"message":"Invalid credentials"}"#), "Invalid credentials");
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }
}
