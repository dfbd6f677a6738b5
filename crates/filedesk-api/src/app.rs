//! Server bootstrap: opens stores, wires services and the cascade
//! transport, and runs one of the three HTTP servers.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tracing::{info, warn};

use filedesk_auth::jwt::{JwtDecoder, JwtEncoder};
use filedesk_auth::password::PasswordHasher;
use filedesk_auth::rbac::AccessPolicy;
use filedesk_core::config::AppConfig;
use filedesk_core::config::cascade::CascadeMode;
use filedesk_core::config::database::DatabaseBackend;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_core::traits::storage::StorageProvider;
use filedesk_database::repositories::{
    AccountRepository, FileRepository, MemoryAccountStore, MemoryFileRecordStore,
};
use filedesk_database::{AccountStore, DatabasePool, FileRecordStore};
use filedesk_service::{
    AccountService, CascadeListener, CascadingDeleteCoordinator, FileService, LocalCascade,
    MemoryEventBus,
};
use filedesk_storage::LocalStorageProvider;

use crate::middleware::gate::AccessGate;
use crate::router::{files_router, gateway_router, users_router};
use crate::state::{FilesState, UsersState};

/// Which HTTP server to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Users,
    Files,
    Gateway,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Users => "users",
            ServiceKind::Files => "files",
            ServiceKind::Gateway => "gateway",
        }
    }

    fn port(self, config: &AppConfig) -> u16 {
        match self {
            ServiceKind::Users => config.server.users_port,
            ServiceKind::Files => config.server.files_port,
            ServiceKind::Gateway => config.server.gateway_port,
        }
    }
}

/// Record stores for the configured backend.
#[derive(Debug, Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub files: Arc<dyn FileRecordStore>,
    pub pool: Option<DatabasePool>,
}

impl Stores {
    /// Fresh in-memory stores.
    pub fn memory() -> Self {
        Self {
            accounts: Arc::new(MemoryAccountStore::new()),
            files: Arc::new(MemoryFileRecordStore::new()),
            pool: None,
        }
    }

    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        match config.database.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory record stores");
                Ok(Self::memory())
            }
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(&config.database).await?;
                Ok(Self {
                    accounts: Arc::new(AccountRepository::new(pool.pool().clone())),
                    files: Arc::new(FileRepository::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
        }
    }
}

fn call_timeout(config: &AppConfig) -> Duration {
    Duration::from_secs(config.database.call_timeout_seconds)
}

/// Assemble the users service state around a cascade coordinator.
pub fn build_users_state(
    config: Arc<AppConfig>,
    accounts: Arc<dyn AccountStore>,
    cascade: Arc<CascadingDeleteCoordinator>,
) -> AppResult<UsersState> {
    let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
    let encoder = Arc::new(JwtEncoder::new(&config.auth));
    let policy = AccessPolicy::from_config(&config.access.users)?;
    let gate = Arc::new(AccessGate::new(JwtDecoder::new(&config.auth), policy));

    let accounts = Arc::new(AccountService::new(
        accounts,
        hasher,
        encoder,
        cascade,
        call_timeout(&config),
    ));

    Ok(UsersState {
        config,
        accounts,
        gate,
    })
}

/// Assemble the files service state.
pub fn build_files_state(
    config: Arc<AppConfig>,
    files: Arc<dyn FileRecordStore>,
    storage: Arc<dyn StorageProvider>,
) -> AppResult<FilesState> {
    let policy = AccessPolicy::from_config(&config.access.files)?;
    let gate = Arc::new(AccessGate::new(JwtDecoder::new(&config.auth), policy));
    let files = Arc::new(FileService::new(files, storage, call_timeout(&config)));

    Ok(FilesState { config, files, gate })
}

/// Build the router for `kind` and serve it until Ctrl-C.
pub async fn run(kind: ServiceKind, config: AppConfig) -> AppResult<()> {
    info!(service = kind.name(), "Starting FileDesk server...");
    if config.auth.uses_placeholder_secret() {
        warn!(
            "auth.jwt_secret is the shipped placeholder; set FILEDESK__AUTH__JWT_SECRET before exposing this service"
        );
    }

    let config = Arc::new(config);
    let stores = Stores::open(&config).await?;
    let router = build_router(kind, Arc::clone(&config), &stores).await?;

    let addr = format!("{}:{}", config.server.host, kind.port(&config));
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    info!(service = kind.name(), %addr, "FileDesk server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    if let Some(pool) = &stores.pool {
        pool.close().await;
    }
    info!(service = kind.name(), "Server stopped");
    Ok(())
}

async fn build_router(kind: ServiceKind, config: Arc<AppConfig>, stores: &Stores) -> AppResult<Router> {
    match kind {
        ServiceKind::Users => {
            let cascade = users_cascade(&config, stores).await?;
            let users = build_users_state(config, Arc::clone(&stores.accounts), cascade)?;
            Ok(users_router(users))
        }
        ServiceKind::Files => {
            let storage = open_storage(&config).await?;
            if config.cascade.mode == CascadeMode::Events {
                spawn_remote_listener(&config, stores, Arc::clone(&storage))?;
            }
            let files = build_files_state(config, Arc::clone(&stores.files), storage)?;
            Ok(files_router(files))
        }
        ServiceKind::Gateway => {
            let storage = open_storage(&config).await?;
            let local = LocalCascade::new(
                Arc::clone(&stores.files),
                Arc::clone(&storage),
                call_timeout(&config),
            );
            let cascade = match config.cascade.mode {
                CascadeMode::Local => CascadingDeleteCoordinator::local(local),
                CascadeMode::Events => {
                    let bus = MemoryEventBus::new(config.cascade.buffer_size);
                    CascadeListener::new(local).spawn(bus.subscribe());
                    CascadingDeleteCoordinator::publishing(Arc::new(bus))
                }
                CascadeMode::Disabled => CascadingDeleteCoordinator::unregistered(),
            };
            let users = build_users_state(
                Arc::clone(&config),
                Arc::clone(&stores.accounts),
                Arc::new(cascade),
            )?;
            let files = build_files_state(config, Arc::clone(&stores.files), storage)?;
            Ok(gateway_router(users, files))
        }
    }
}

async fn open_storage(config: &AppConfig) -> AppResult<Arc<dyn StorageProvider>> {
    let storage = LocalStorageProvider::new(&config.storage.root_path).await?;
    Ok(Arc::new(storage))
}

/// Cascade coordinator for a users server running on its own.
async fn users_cascade(
    config: &AppConfig,
    stores: &Stores,
) -> AppResult<Arc<CascadingDeleteCoordinator>> {
    let coordinator = match config.cascade.mode {
        CascadeMode::Local => {
            if config.database.backend == DatabaseBackend::Memory {
                warn!("Local cascade with in-memory stores only reaches files held by this process");
            }
            let storage = open_storage(config).await?;
            CascadingDeleteCoordinator::local(LocalCascade::new(
                Arc::clone(&stores.files),
                storage,
                call_timeout(config),
            ))
        }
        CascadeMode::Events => CascadingDeleteCoordinator::publishing(remote_publisher(config)?),
        CascadeMode::Disabled => CascadingDeleteCoordinator::unregistered(),
    };
    Ok(Arc::new(coordinator))
}

#[cfg(feature = "redis-events")]
fn remote_publisher(
    config: &AppConfig,
) -> AppResult<Arc<dyn filedesk_service::EventPublisher>> {
    let bus = filedesk_service::cascade::RedisEventBus::new(
        &config.cascade.redis_url,
        &config.cascade.channel,
    )?;
    Ok(Arc::new(bus))
}

#[cfg(not(feature = "redis-events"))]
fn remote_publisher(
    _config: &AppConfig,
) -> AppResult<Arc<dyn filedesk_service::EventPublisher>> {
    Err(AppError::configuration(
        "cascade.mode = \"events\" across processes requires the redis-events feature",
    ))
}

/// Files side of events mode: relay the shared channel onto a local bus
/// and run the cleanup listener against it.
#[cfg(feature = "redis-events")]
fn spawn_remote_listener(
    config: &AppConfig,
    stores: &Stores,
    storage: Arc<dyn StorageProvider>,
) -> AppResult<()> {
    let remote = filedesk_service::cascade::RedisEventBus::new(
        &config.cascade.redis_url,
        &config.cascade.channel,
    )?;
    let bus = MemoryEventBus::new(config.cascade.buffer_size);
    let local = LocalCascade::new(Arc::clone(&stores.files), storage, call_timeout(config));
    CascadeListener::new(local).spawn(bus.subscribe());

    tokio::spawn(async move {
        if let Err(e) = remote.forward_to(bus).await {
            tracing::error!(error = %e, "Account event relay stopped");
        }
    });
    Ok(())
}

#[cfg(not(feature = "redis-events"))]
fn spawn_remote_listener(
    _config: &AppConfig,
    _stores: &Stores,
    _storage: Arc<dyn StorageProvider>,
) -> AppResult<()> {
    Err(AppError::configuration(
        "cascade.mode = \"events\" across processes requires the redis-events feature",
    ))
}

/// Waits for Ctrl-C. If the handler cannot be installed the server runs
/// until killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
