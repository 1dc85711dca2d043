use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use super::config::DeskConfig;
use crate::backend::{BackendClient, BackendService, Credentials};
use crate::domain::{InsightCounts, Order};
use crate::error::{BackendError, DeskError};
use crate::menu_catalog::MenuCatalog;
use crate::offers::OfferBook;
use crate::order_board::{run_poller, run_ticker, OrderBoardClient, OrderBoardService};

/// The running desk: backend, order board and the timers feeding it.
///
/// Services start leaves first (backend, then board, then timers) and stop
/// in the opposite order.
pub struct OrderDesk {
    pub backend: BackendClient,
    pub board: OrderBoardClient,
    timers: Vec<JoinHandle<()>>,
    services: Vec<JoinHandle<()>>,
}

impl OrderDesk {
    /// Starts the whole desk against the configured REST backend.
    #[instrument(name = "order_desk", skip(config), fields(api_url = %config.api_url))]
    pub fn start(config: &DeskConfig) -> Result<Self, DeskError> {
        info!("Starting order desk");

        let (backend_service, backend) =
            BackendService::new(config.mailbox_size, &config.api_url, config.request_timeout)?;
        let backend_handle = tokio::spawn(backend_service.run());

        let mut desk = Self::with_backend(backend, config);
        desk.services.push(backend_handle);

        info!("Order desk started");
        Ok(desk)
    }

    /// Starts the board and timers on top of an existing backend handle.
    pub fn with_backend(backend: BackendClient, config: &DeskConfig) -> Self {
        let refresh_signal = Arc::new(Notify::new());

        let (board_service, board) =
            OrderBoardService::new(config.mailbox_size, backend.clone(), refresh_signal.clone());
        let board_handle = tokio::spawn(board_service.run());

        let timers = vec![
            tokio::spawn(run_poller(
                backend.clone(),
                board.clone(),
                config.poll_interval,
                refresh_signal,
            )),
            tokio::spawn(run_ticker(board.clone(), config.tick_interval)),
        ];

        Self {
            backend,
            board,
            timers,
            services: vec![board_handle],
        }
    }

    pub fn offer_book(&self) -> OfferBook {
        OfferBook::new(self.backend.clone())
    }

    pub fn menu_catalog(&self) -> MenuCatalog {
        MenuCatalog::new(self.backend.clone())
    }

    /// Loads one order fresh from the backend.
    #[instrument(skip(self))]
    pub async fn order_summary(&self, order_id: &str) -> Result<Order, DeskError> {
        match self.backend.fetch_order(order_id.to_string()).await {
            Ok(order) => Ok(order),
            Err(BackendError::Status { status: 404, .. }) => {
                Err(DeskError::NotFound(format!("Order {order_id}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Day counts as computed by the backend.
    #[instrument(skip(self))]
    pub async fn insights(&self, date: NaiveDate) -> Result<InsightCounts, DeskError> {
        Ok(self.backend.fetch_insights(date).await?)
    }

    /// Day counts derived from the orders the board currently holds.
    pub async fn local_insights(&self, date: NaiveDate) -> Result<InsightCounts, DeskError> {
        let snapshot = self.board.snapshot().await?;
        Ok(InsightCounts::from_orders_in(&snapshot.orders, date, &Local))
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<String, DeskError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let message = self.backend.login(credentials).await.map_err(|e| {
            warn!(error = %e, "Login failed");
            e
        })?;
        info!("Logged in");
        Ok(message)
    }

    /// Stops the timers, then the board, then the backend, and waits for
    /// every task. Errors are logged; shutdown always runs to the end.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), DeskError> {
        info!("Shutting down order desk");

        for timer in &self.timers {
            timer.abort();
        }
        for timer in self.timers {
            if let Err(e) = timer.await {
                if !e.is_cancelled() {
                    error!(error = ?e, "Timer task failed");
                }
            }
        }

        let _ = self.board.shutdown().await;
        let _ = self.backend.shutdown().await;

        for handle in self.services {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
            }
        }

        info!("Order desk shutdown complete");
        Ok(())
    }
}
