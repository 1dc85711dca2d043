use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, Instrument};

use super::client::BackendClient;
use super::http::Api;
use super::messages::{BackendRequest, BackendResponse, BackendResult};
use crate::error::BackendError;

/// Owns the HTTP client and answers [`BackendRequest`]s.
///
/// Each call is handed to its own task, which owns the reply channel, so a
/// slow endpoint never holds up the mailbox.
pub struct BackendService {
    receiver: mpsc::Receiver<BackendRequest>,
    api: Api,
}

impl BackendService {
    pub fn new(
        buffer_size: usize,
        base_url: &str,
        timeout: Duration,
    ) -> Result<(Self, BackendClient), BackendError> {
        let api = Api::new(base_url, timeout)?;
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, api };
        Ok((service, BackendClient::new(sender)))
    }

    #[instrument(name = "backend_service", skip(self))]
    pub async fn run(mut self) {
        info!("BackendService starting");

        while let Some(msg) = self.receiver.recv().await {
            if let BackendRequest::Shutdown = msg {
                info!("BackendService shutting down");
                break;
            }
            self.dispatch(msg);
        }

        info!("BackendService stopped");
    }

    fn dispatch(&self, msg: BackendRequest) {
        let api = self.api.clone();
        match msg {
            BackendRequest::FetchOrders { respond_to } => {
                spawn_call(respond_to, async move { api.fetch_orders().await })
            }
            BackendRequest::FetchOrder {
                order_id,
                respond_to,
            } => spawn_call(respond_to, async move { api.fetch_order(&order_id).await }),
            BackendRequest::UpdateOrderStatus {
                request,
                respond_to,
            } => spawn_call(respond_to, async move {
                api.update_order_status(&request).await
            }),
            BackendRequest::FetchInsights { date, respond_to } => {
                spawn_call(respond_to, async move { api.fetch_insights(date).await })
            }
            BackendRequest::ListCoupons { respond_to } => {
                spawn_call(respond_to, async move { api.list_coupons().await })
            }
            BackendRequest::CreateCoupon {
                payload,
                respond_to,
            } => spawn_call(respond_to, async move { api.create_coupon(&payload).await }),
            BackendRequest::UpdateCoupon {
                coupon_id,
                payload,
                respond_to,
            } => spawn_call(respond_to, async move {
                api.update_coupon(&coupon_id, &payload).await
            }),
            BackendRequest::DeleteCoupon {
                coupon_id,
                respond_to,
            } => spawn_call(respond_to, async move { api.delete_coupon(&coupon_id).await }),
            BackendRequest::FetchMenu { respond_to } => {
                spawn_call(respond_to, async move { api.fetch_menu().await })
            }
            BackendRequest::ToggleCategory {
                category_id,
                respond_to,
            } => spawn_call(respond_to, async move {
                api.toggle_category(&category_id).await
            }),
            BackendRequest::ToggleItem {
                category_id,
                item_id,
                respond_to,
            } => spawn_call(respond_to, async move {
                api.toggle_item(&category_id, &item_id).await
            }),
            BackendRequest::CreateCategory { draft, respond_to } => {
                spawn_call(respond_to, async move { api.create_category(&draft).await })
            }
            BackendRequest::UpdateCategory {
                category_id,
                draft,
                respond_to,
            } => spawn_call(respond_to, async move {
                api.update_category(&category_id, &draft).await
            }),
            BackendRequest::DeleteCategory {
                category_id,
                respond_to,
            } => spawn_call(respond_to, async move {
                api.delete_category(&category_id).await
            }),
            BackendRequest::AddItem {
                category_id,
                draft,
                respond_to,
            } => spawn_call(respond_to, async move {
                api.add_item(&category_id, &draft).await
            }),
            BackendRequest::UpdateItem {
                category_id,
                item_id,
                draft,
                respond_to,
            } => spawn_call(respond_to, async move {
                api.update_item(&category_id, &item_id, &draft).await
            }),
            BackendRequest::DeleteItem {
                category_id,
                item_id,
                respond_to,
            } => spawn_call(respond_to, async move {
                api.delete_item(&category_id, &item_id).await
            }),
            BackendRequest::Login {
                credentials,
                respond_to,
            } => spawn_call(respond_to, async move { api.login(&credentials).await }),
            BackendRequest::Shutdown => {}
        }
    }
}

/// Runs `call` in the background; the task answers when the call finishes.
fn spawn_call<T, F>(respond_to: BackendResponse<T>, call: F)
where
    T: Send + 'static,
    F: Future<Output = BackendResult<T>> + Send + 'static,
{
    tokio::spawn(
        async move {
            let result = call.await;
            if respond_to.send(result).is_err() {
                debug!("Caller went away before the backend answered");
            }
        }
        .in_current_span(),
    );
}
