use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Notify};
use tracing::{debug, error, info, instrument, warn};

use super::client::OrderBoardClient;
use super::messages::{BoardRequest, BoardResponse, BoardSnapshot};
use crate::backend::BackendClient;
use crate::countdown::Countdowns;
use crate::domain::{adjust_prep_minutes, Order, OrderStatus, DEFAULT_PREP_MINUTES};
use crate::error::DeskError;
use crate::filter::{OrderFilter, StatusFilter};
use crate::lifecycle::TransitionRequest;

/// Owns the desk's view of the orders.
///
/// The latest successful poll is authoritative: it replaces the order set
/// outright. Between polls the board patches its copy optimistically after a
/// transition the backend accepted.
pub struct OrderBoardService {
    receiver: mpsc::Receiver<BoardRequest>,
    backend: BackendClient,
    refresh_signal: Arc<Notify>,
    orders: Vec<Order>,
    new_order_count: usize,
    countdowns: Countdowns,
    /// Preparation minutes chosen by staff, kept until a poll shows the
    /// order past `Preparing`.
    prep_times: HashMap<String, u32>,
    filter: OrderFilter,
}

impl OrderBoardService {
    pub fn new(
        buffer_size: usize,
        backend: BackendClient,
        refresh_signal: Arc<Notify>,
    ) -> (Self, OrderBoardClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            backend,
            refresh_signal,
            orders: Vec::new(),
            new_order_count: 0,
            countdowns: Countdowns::new(),
            prep_times: HashMap::new(),
            filter: OrderFilter::default(),
        };
        let client = OrderBoardClient::new(sender);
        (service, client)
    }

    #[instrument(name = "order_board", skip(self))]
    pub async fn run(mut self) {
        info!("OrderBoard starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                BoardRequest::Reconcile { orders } => {
                    self.reconcile(orders, Utc::now());
                }
                BoardRequest::Tick => {
                    self.countdowns.tick();
                }
                BoardRequest::Refresh { respond_to } => {
                    self.handle_refresh(respond_to).await;
                }
                BoardRequest::RequestTransition {
                    order_id,
                    target,
                    prep_minutes,
                    respond_to,
                } => {
                    self.handle_request_transition(order_id, target, prep_minutes, respond_to)
                        .await;
                }
                BoardRequest::AdjustPrepTime {
                    order_id,
                    delta,
                    respond_to,
                } => {
                    self.handle_adjust_prep_time(order_id, delta, respond_to);
                }
                BoardRequest::SetFilter { filter, respond_to } => {
                    debug!(?filter, "Filter changed");
                    self.filter = filter;
                    let _ = respond_to.send(Ok(()));
                }
                BoardRequest::VisibleOrders { respond_to } => {
                    let _ = respond_to.send(Ok(self.filter.apply(&self.orders)));
                }
                BoardRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.snapshot()));
                }
                BoardRequest::Shutdown => {
                    info!("OrderBoard shutting down");
                    break;
                }
            }
        }

        info!("OrderBoard stopped");
    }

    /// Replaces the order set with a fresh poll result.
    #[instrument(skip(self, orders, now), fields(count = orders.len()))]
    fn reconcile(&mut self, orders: Vec<Order>, now: DateTime<Utc>) {
        self.orders = orders;
        self.new_order_count = self.orders.iter().filter(|order| order.is_new()).count();

        self.countdowns.retain_preparing(&self.orders);
        for order in &self.orders {
            if order.status != OrderStatus::Preparing || self.countdowns.is_tracking(&order.order_id) {
                continue;
            }
            let minutes = order
                .prep_time
                .or_else(|| self.prep_times.get(&order.order_id).copied())
                .unwrap_or(DEFAULT_PREP_MINUTES);
            match order.accepted_at {
                Some(accepted_at) => self
                    .countdowns
                    .start_from_acceptance(order.order_id.clone(), minutes, accepted_at, now),
                None => self.countdowns.start(order.order_id.clone(), minutes),
            }
        }

        let orders = &self.orders;
        self.prep_times.retain(|id, _| {
            orders.iter().any(|o| {
                &o.order_id == id
                    && matches!(o.status, OrderStatus::Ordered | OrderStatus::Preparing)
            })
        });

        debug!(
            new_orders = self.new_order_count,
            preparing = self.countdowns.len(),
            "Orders reconciled"
        );
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_refresh(&mut self, respond_to: BoardResponse<usize>) {
        let result = match self.backend.fetch_orders().await {
            Ok(orders) => {
                let count = orders.len();
                self.reconcile(orders, Utc::now());
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Refresh failed, keeping previous orders");
                Err(DeskError::FetchFailed(e.to_string()))
            }
        };
        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_id = %order_id, target = %target), skip(self, order_id, respond_to))]
    async fn handle_request_transition(
        &mut self,
        order_id: String,
        target: OrderStatus,
        prep_minutes: Option<u32>,
        respond_to: BoardResponse<()>,
    ) {
        let result = self.request_transition(&order_id, target, prep_minutes).await;
        let _ = respond_to.send(result);
    }

    async fn request_transition(
        &mut self,
        order_id: &str,
        target: OrderStatus,
        prep_minutes: Option<u32>,
    ) -> Result<(), DeskError> {
        let order = self
            .orders
            .iter()
            .find(|order| order.order_id == order_id)
            .ok_or_else(|| DeskError::NotFound(format!("Order {order_id}")))?;

        let prep_minutes = prep_minutes.or_else(|| self.prep_times.get(order_id).copied());
        let request = TransitionRequest::for_order(order, target, prep_minutes).map_err(|e| {
            warn!(error = %e, "Transition refused locally");
            e
        })?;

        if let Err(e) = self.backend.update_order_status(request.clone()).await {
            error!(error = %e, "Backend rejected transition");
            return Err(DeskError::TransitionRejected(e.to_string()));
        }

        info!(prep_time = ?request.prep_time, "Transition accepted");
        self.apply_transition(&request);
        if target != OrderStatus::Rejected {
            self.filter.status = StatusFilter::Only(target);
        }
        self.refresh_signal.notify_one();
        Ok(())
    }

    /// Patches the local copy until the next poll confirms it.
    fn apply_transition(&mut self, request: &TransitionRequest) {
        let Some(order) = self
            .orders
            .iter_mut()
            .find(|order| order.order_id == request.order_id)
        else {
            return;
        };

        let previous = order.status;
        order.status = request.target;
        if let Some(minutes) = request.prep_time {
            order.prep_time = Some(minutes);
            self.countdowns.start(request.order_id.clone(), minutes);
            // A poll already in flight may still report the order as new.
            self.prep_times.insert(request.order_id.clone(), minutes);
        } else {
            if previous == OrderStatus::Preparing {
                self.countdowns.remove(&request.order_id);
            }
            self.prep_times.remove(&request.order_id);
        }

        self.new_order_count = self.orders.iter().filter(|order| order.is_new()).count();
    }

    #[instrument(fields(order_id = %order_id, delta), skip(self, order_id, respond_to))]
    fn handle_adjust_prep_time(&mut self, order_id: String, delta: i32, respond_to: BoardResponse<u32>) {
        let result = match self.orders.iter().find(|order| order.order_id == order_id) {
            None => Err(DeskError::NotFound(format!("Order {order_id}"))),
            Some(order) if !order.is_new() => Err(DeskError::ValidationError(format!(
                "Preparation time is fixed once an order is {}",
                order.status
            ))),
            Some(_) => {
                let current = self
                    .prep_times
                    .get(&order_id)
                    .copied()
                    .unwrap_or(DEFAULT_PREP_MINUTES);
                let minutes = adjust_prep_minutes(current, delta);
                self.prep_times.insert(order_id, minutes);
                debug!(minutes, "Preparation time adjusted");
                Ok(minutes)
            }
        };
        let _ = respond_to.send(result);
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            orders: self.orders.clone(),
            new_order_count: self.new_order_count,
            countdowns: self.countdowns.snapshot(),
            prep_times: self.prep_times.clone(),
            filter: self.filter,
        }
    }
}
