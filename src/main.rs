use std::time::Duration;

use tracing::{error, info, warn, Instrument};

use order_desk::countdown::format_countdown;
use order_desk::{setup_tracing, DeskConfig, OrderDesk};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = DeskConfig::load();
    info!(api_url = %config.api_url, "Starting order desk");

    let desk = OrderDesk::start(&config).map_err(|e| e.to_string())?;

    let mut offers = desk.offer_book();
    let mut menu = desk.menu_catalog();
    async {
        match offers.refresh().await {
            Ok(count) => info!(count, "Offers loaded"),
            Err(e) => warn!(error = %e, "Offers unavailable"),
        }
        match menu.refresh().await {
            Ok(count) => info!(categories = count, "Menu loaded"),
            Err(e) => warn!(error = %e, "Menu unavailable"),
        }
    }
    .instrument(tracing::info_span!("catalog_load"))
    .await;

    let board = desk.board.clone();
    let monitor = tokio::spawn(board_monitor(board, config.poll_interval));

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for ctrl-c");
    }

    monitor.abort();
    desk.shutdown().await.map_err(|e| e.to_string())?;

    info!("Order desk exited");
    Ok(())
}

/// Logs what the board shows every `interval`.
async fn board_monitor(board: order_desk::order_board::OrderBoardClient, interval: Duration) {
    let mut interval_timer = tokio::time::interval(interval);

    loop {
        interval_timer.tick().await;
        match board.snapshot().await {
            Ok(snapshot) => {
                info!(
                    orders = snapshot.orders.len(),
                    new_orders = snapshot.new_order_count,
                    preparing = snapshot.countdowns.len(),
                    "Board status"
                );
                for (order_id, seconds) in &snapshot.countdowns {
                    info!(order_id = %order_id, remaining = %format_countdown(*seconds), "Preparing");
                }
            }
            Err(e) => {
                error!(error = %e, "Board unavailable");
                break;
            }
        }
    }
}
