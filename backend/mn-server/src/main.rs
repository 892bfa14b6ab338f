use mn_server::{build_router, logger};

use mn_auth::{JwtValidator, RoleAuthority};
use mn_core::{ServiceRegistry, ShutdownCoordinator};
use mn_router::RequestRouter;
use mn_supervisor::{HealthMonitor, HealthProbe, ProcessSupervisor, SupervisorSettings};
use mn_ws::{AppState, CommandContext, ConnectionConfig, Metrics, SessionRegistry};

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = mn_config::Config::load()?;
    config.validate()?;

    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = mn_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting mn-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let registry = ServiceRegistry::new(config.service_descriptors()?);
    let probe = HealthProbe::new(config.health.probe_timeout())?;

    let supervisor = Arc::new(ProcessSupervisor::new(
        registry.clone(),
        probe.clone(),
        SupervisorSettings {
            startup_grace: config.supervisor.startup_grace(),
            shutdown_timeout: config.supervisor.shutdown_timeout(),
        },
    ));

    let router = RequestRouter::new(registry.clone(), config.proxy.timeout())?;

    let authority = match (config.auth.enabled, &config.auth.jwt_secret) {
        (true, Some(secret)) => {
            info!("JWT: HS256 role claims enabled");
            RoleAuthority::with_validator(JwtValidator::with_hs256(secret.as_bytes()))
        }
        _ => {
            warn!("Authentication DISABLED - roles are self-declared by callers");
            RoleAuthority::self_declared()
        }
    };

    let shutdown = ShutdownCoordinator::new();

    let app_state = AppState {
        commands: CommandContext {
            registry: registry.clone(),
            supervisor: Arc::clone(&supervisor),
            router,
            sessions: SessionRegistry::new(config.server.max_connections),
        },
        authority,
        metrics: Metrics::new(),
        shutdown: shutdown.clone(),
        config: ConnectionConfig {
            send_buffer_size: config.websocket.send_buffer_size,
        },
    };

    // Health loop for the lifetime of the process
    let monitor = HealthMonitor::new(
        registry,
        probe,
        config.health.interval(),
        config.health.recover_auto_stopped,
    )
    .spawn(shutdown.subscribe_guard());

    let app = build_router(app_state, config.server.static_dir.as_deref().map(Path::new));

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    info!("Server ready to accept connections");
    let mut shutdown_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_guard.wait().await;
        })
        .await?;

    // Stop supervised children before exit
    supervisor.shutdown_all().await;
    if let Err(e) = monitor.await {
        warn!("Health monitor ended abnormally: {}", e);
    }
    info!("Graceful shutdown complete");

    Ok(())
}
