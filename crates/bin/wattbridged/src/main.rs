//! # wattbridged — wattbridge daemon
//!
//! Composition root that wires all adapters together and runs the bridge.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and install logging
//! - Connect the MQTT message bus and spawn its event loop
//! - Build the device and status caches, each observed by an event publisher
//! - Start the poll scheduler against the reqwest gateway transport
//! - Serve the read-only HTTP API
//! - Exit non-zero on the first fatal outcome (identity load failure, bus
//!   lost), zero on Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::convert::Infallible;
use std::error::Error;

use tokio::task::JoinError;
use tracing_subscriber::EnvFilter;

use wattbridge_adapter_gateway_reqwest::ReqwestGateway;
use wattbridge_adapter_http_axum::router;
use wattbridge_adapter_http_axum::state::AppState;
use wattbridge_app::change_cache::ChangeCache;
use wattbridge_app::event_publisher::EventPublisher;
use wattbridge_app::gateway_reader::GatewayReader;
use wattbridge_app::poll_scheduler::PollScheduler;
use wattbridge_app::services::query_service::QueryService;
use wattbridge_app::watchdog::TransportWatchdog;
use wattbridge_domain::error::BridgeError;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    tracing::info!(
        module = %config.module,
        device_id = %config.gateway.id,
        gateway = %config.gateway.base_url,
        "starting wattbridged"
    );

    // Message bus
    let (bus, driver) = wattbridge_adapter_mqtt::connect(&config.bus);
    let watchdog = TransportWatchdog::new(driver.subscribe());
    tokio::spawn(driver.run());

    // Caches
    let publish = config.publish_settings();
    let devices = ChangeCache::new(EventPublisher::for_devices(bus.clone(), publish.clone()));
    let statuses = ChangeCache::new(EventPublisher::for_status(bus, publish));

    // Poller
    let transport = ReqwestGateway::from_config(&config.gateway)?;
    let reader = GatewayReader::new(transport, config.gateway.id.clone());
    let scheduler = PollScheduler::new(
        reader,
        devices.clone(),
        statuses.clone(),
        config.poll_settings(),
    );
    let poller = scheduler.start();

    // HTTP
    let server = serve(
        config.server.enabled,
        config.bind_addr(),
        QueryService::new(devices, statuses),
    );

    tokio::select! {
        outcome = poller => poller_stopped(outcome),
        err = watchdog.watch() => Err(fatal(err)),
        result = server => {
            result?;
            Err("HTTP server stopped".into())
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
            Ok(())
        }
    }
}

async fn serve(
    enabled: bool,
    bind_addr: String,
    query_service: QueryService,
) -> std::io::Result<()> {
    if !enabled {
        tracing::info!("HTTP server disabled");
        return std::future::pending().await;
    }

    let app = router::build(AppState::new(query_service));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "wattbridged listening");
    axum::serve(listener, app).await
}

fn poller_stopped(
    outcome: Result<Result<Infallible, BridgeError>, JoinError>,
) -> Result<(), Box<dyn Error>> {
    match outcome {
        Ok(Ok(never)) => match never {},
        Ok(Err(err)) => Err(fatal(err)),
        Err(err) => {
            tracing::error!(error = &err as &dyn Error, "poll scheduler task aborted");
            Err(err.into())
        }
    }
}

fn fatal(err: BridgeError) -> Box<dyn Error> {
    tracing::error!(error = &err as &dyn Error, fatal = err.is_fatal(), "stopping wattbridged");
    err.into()
}
