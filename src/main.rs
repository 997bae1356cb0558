use anyhow::{anyhow, Context};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

use nodepulse::{
    arguments::Args,
    broadcast::{hub::DEFAULT_BUFFER_SIZE, BroadcastLoop, SubscriberRegistry},
    cache::CacheConfig,
    config::load_config_from_path,
    dashboard::{Aggregator, DashboardService},
    logger::{self, LogTag},
    rpc::RpcGateway,
    shutdown::ShutdownHandle,
    utils::format_uptime,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logger_config = args.logger_config();
    let debug_tags = logger_config.debug_tags.len();
    logger::init(logger_config);
    logger::info(
        LogTag::System,
        &format!("nodepulse {} starting up", env!("CARGO_PKG_VERSION")),
    );
    if debug_tags > 0 {
        logger::info(
            LogTag::System,
            &format!("Debug output enabled for {} tag(s)", debug_tags),
        );
    }

    let result = run(args).await;
    if let Err(e) = &result {
        logger::error(LogTag::System, &format!("{:#}", e));
    }

    logger::flush();
    result
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = load_config_from_path(&args.config)
        .with_context(|| format!("Failed to load configuration from '{}'", args.config))?;
    if let Some(host) = args.host {
        config.webserver.host = host;
    }
    if let Some(port) = args.port {
        config.webserver.port = port;
    }

    let gateway = RpcGateway::from_config(&config.rpc).context("Failed to create RPC gateway")?;

    match gateway.uptime().await {
        Ok(uptime) => logger::info(
            LogTag::Rpc,
            &format!(
                "Connected to node at {} (up {})",
                config.rpc.endpoint(),
                format_uptime(uptime as i64)
            ),
        ),
        Err(e) if args.check => return Err(anyhow!("Node check failed: {}", e)),
        Err(e) => logger::warning(
            LogTag::Rpc,
            &format!("Node not reachable yet, will keep polling: {}", e),
        ),
    }
    if args.check {
        return Ok(());
    }

    let aggregator = Aggregator::new(gateway, config.dashboard.mempool_disabled);
    let cache_config = CacheConfig::dashboard(&config.dashboard);
    logger::info(
        LogTag::Cache,
        &format!("Snapshot cache TTL {} ms", cache_config.ttl.as_millis()),
    );
    let service = DashboardService::new(aggregator, cache_config);
    let registry = SubscriberRegistry::new(config.dashboard.max_sessions, DEFAULT_BUFFER_SIZE);

    let shutdown = ShutdownHandle::new();
    let broadcast = BroadcastLoop::new(
        service.clone(),
        Arc::clone(&registry),
        Duration::from_secs(config.dashboard.polling_interval_secs),
    )
    .spawn(shutdown.clone());

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => logger::info(LogTag::System, "Ctrl-C received, shutting down"),
                Err(e) => logger::error(
                    LogTag::System,
                    &format!("Failed to listen for Ctrl-C, shutting down: {}", e),
                ),
            }
            shutdown.trigger();
        });
    }

    #[cfg(feature = "web")]
    let served = {
        let state = Arc::new(nodepulse::webserver::AppState::new(
            service,
            registry,
            config.dashboard.clone(),
        ));
        let served =
            nodepulse::webserver::start_server(&config.webserver, state, shutdown.clone()).await;
        // A failed bind returns before any signal; stop the loop as well
        shutdown.trigger();
        served
    };

    #[cfg(not(feature = "web"))]
    let served: Result<(), String> = {
        let _ = (service, registry);
        shutdown.wait().await;
        Ok(())
    };

    if let Err(e) = broadcast.await {
        logger::error(LogTag::Broadcast, &format!("Broadcast task failed: {}", e));
    }

    served.map_err(|e| anyhow!(e))?;
    logger::info(LogTag::System, "Shutdown complete");
    Ok(())
}
