//! Background loops feeding the board: the order poller and the one-second
//! countdown tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use super::client::OrderBoardClient;
use crate::backend::BackendClient;
use crate::error::BackendError;

/// Fetches the order list every `period`, or sooner when `nudge` is notified,
/// and hands each successful result to the board.
///
/// A failed fetch is logged and the board keeps what it had. The loop ends
/// once the board or the backend is gone.
#[instrument(name = "order_poller", skip(backend, board, nudge))]
pub async fn run_poller(
    backend: BackendClient,
    board: OrderBoardClient,
    period: Duration,
    nudge: Arc<Notify>,
) {
    info!("Order poller starting");
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = nudge.notified() => {
                debug!("Refresh requested");
                interval.reset();
            }
        }

        if board.is_closed() {
            break;
        }

        match backend.fetch_orders().await {
            Ok(orders) => {
                if board.reconcile(orders).await.is_err() {
                    break;
                }
            }
            Err(BackendError::ActorCommunicationError(e)) => {
                warn!(error = %e, "Backend unavailable, stopping poller");
                break;
            }
            Err(e) => warn!(error = %e, "Order poll failed, keeping previous orders"),
        }
    }

    info!("Order poller stopped");
}

/// Sends the board one tick per `period`. The first tick fires one period
/// after start.
#[instrument(name = "countdown_ticker", skip(board))]
pub async fn run_ticker(board: OrderBoardClient, period: Duration) {
    info!("Countdown ticker starting");
    let mut interval = time::interval_at(time::Instant::now() + period, period);

    loop {
        interval.tick().await;
        if board.tick().await.is_err() {
            break;
        }
    }

    info!("Countdown ticker stopped");
}
