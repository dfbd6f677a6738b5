//! FileDesk: users service, files service and gateway.
//!
//! Entry point for serving, migrating and checking configuration.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt};

use filedesk_api::ServiceKind;
use filedesk_auth::rbac::AccessPolicy;
use filedesk_core::config::AppConfig;
use filedesk_core::config::access::AccessPolicyConfig;
use filedesk_core::error::AppError;
use filedesk_database::DatabasePool;
use filedesk_database::connection::mask_password;
use filedesk_database::migration::run_migrations;

/// FileDesk file sharing services
#[derive(Debug, Parser)]
#[command(name = "filedesk", version, about, long_about = None)]
struct Cli {
    /// Configuration overlay to merge over config/default.toml
    #[arg(short, long, env = "FILEDESK_ENV", default_value = "development")]
    env: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run an HTTP server
    Serve {
        #[arg(value_enum)]
        service: ServiceArg,
    },
    /// Apply PostgreSQL migrations
    Migrate,
    /// Load and validate configuration, then print the access tables
    CheckConfig,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ServiceArg {
    Users,
    Files,
    Gateway,
}

impl From<ServiceArg> for ServiceKind {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Users => ServiceKind::Users,
            ServiceArg::Files => ServiceKind::Files,
            ServiceArg::Gateway => ServiceKind::Gateway,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command {
        Commands::Serve { service } => filedesk_api::run(service.into(), config).await,
        Commands::Migrate => migrate(&config).await,
        Commands::CheckConfig => check_config(&config),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` overrides `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn migrate(config: &AppConfig) -> Result<(), AppError> {
    tracing::info!(url = %mask_password(&config.database.url), "Running migrations");
    let pool = DatabasePool::connect(&config.database).await?;
    let result = run_migrations(pool.pool()).await;
    pool.close().await;
    result
}

fn check_config(config: &AppConfig) -> Result<(), AppError> {
    println!("Configuration is valid");
    println!(
        "  Ports: users {}, files {}, gateway {}",
        config.server.users_port, config.server.files_port, config.server.gateway_port
    );
    println!(
        "  Database: {:?} ({})",
        config.database.backend,
        mask_password(&config.database.url)
    );
    println!("  Storage: {}", config.storage.root_path);
    println!("  Cascade: {:?}", config.cascade.mode);
    if config.auth.uses_placeholder_secret() {
        println!("  Warning: auth.jwt_secret is still the shipped placeholder");
    }

    print_policy("users", &config.access.users)?;
    print_policy("files", &config.access.files)?;
    Ok(())
}

fn print_policy(service: &str, config: &AccessPolicyConfig) -> Result<(), AppError> {
    let policy = AccessPolicy::from_config(config)?;
    println!("\n[{service}]");
    for (method, path) in policy.public_endpoints() {
        println!("  {method:<7} {path:<32} public");
    }
    for rule in policy.rules() {
        let roles: Vec<String> = rule.roles().iter().map(ToString::to_string).collect();
        println!(
            "  {:<7} {:<32} {}",
            rule.route().method(),
            rule.route().pattern(),
            roles.join(", ")
        );
    }
    Ok(())
}
