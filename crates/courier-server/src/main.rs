//! courier-server: HTTP surface + dispatch loop lifecycle.

mod bootstrap;
mod config;
mod http;

use std::sync::Arc;

use tracing::{error, info};

use courier_core::app::{Dispatcher, IntakeService, RunController};
use courier_core::impls::InMemoryIntakeCache;
use courier_core::ports::MessageStore;
use courier_core::store::InMemoryMessageStore;

use crate::bootstrap::{BootstrapRetry, connect_with_retry};
use crate::config::ServerConfig;
use crate::http::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();

    // The in-memory store cannot fail to "connect", but the retry seam
    // is where a durable backend plugs in.
    let store: Arc<dyn MessageStore> =
        match connect_with_retry(&BootstrapRetry::default(), |_| async {
            Ok(Arc::new(InMemoryMessageStore::new()) as Arc<dyn MessageStore>)
        })
        .await
        {
            Ok(store) => store,
            Err(e) => {
                error!(error = %e, "could not initialize message store");
                std::process::exit(1);
            }
        };

    let controller = Arc::new(RunController::new());
    let intake = Arc::new(IntakeService::new(
        Arc::clone(&store),
        Arc::new(InMemoryIntakeCache::new()),
    ));

    let dispatcher = Dispatcher::spawn(
        Arc::clone(&store),
        Arc::clone(&controller),
        config.dispatch.clone(),
    );

    let app = http::router(AppState {
        store,
        controller,
        intake,
    });

    let listener = match tokio::net::TcpListener::bind(&config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "could not bind listener");
            std::process::exit(1);
        }
    };

    info!(addr = %config.addr, tick = ?config.dispatch.tick_interval, batch = config.dispatch.batch_size, "courier listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
    }

    // Let an in-flight tick finish before the process exits.
    dispatcher.shutdown_and_join().await;
    info!("shutdown complete");
}

async fn shutdown_signal() {
    // If the signal handler cannot be installed we still serve; the
    // process is then stopped by the supervisor instead.
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
