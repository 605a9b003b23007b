/// Version injected at compile time via AZRM_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("AZRM_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{bail, Context, Result};
use azrm::api_management::{self, ApiManagementCommand};
use azrm::arm::http::format_arm_error;
use azrm::arm::subscriptions::{self, SubscriptionCommand};
use azrm::arm::{auth, ArmClient};
use azrm::authorization::{self, RoleAssignmentCommand};
use azrm::batch::{self, BatchCommand};
use azrm::cmdlet::Invocation;
use azrm::config::Config;
use azrm::network::{self, NetworkCommand};
use azrm::output::{write_output, Output, OutputFormat};
use azrm::traffic_manager::{self, TrafficManagerCommand};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Azure Resource Manager operations from the command line
#[derive(Parser, Debug)]
#[command(name = "azrm", version = VERSION, about, long_about = None)]
struct Args {
    /// Subscription to operate on
    #[arg(short, long, global = true)]
    subscription: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Traffic Manager profiles and endpoints
    #[command(subcommand)]
    TrafficManager(TrafficManagerCommand),
    /// Load balancers, frontend IP configurations and security groups
    #[command(subcommand)]
    Network(NetworkCommand),
    /// Batch jobs
    #[command(subcommand)]
    Batch(BatchCommand),
    /// Role assignments
    #[command(subcommand)]
    RoleAssignment(RoleAssignmentCommand),
    /// API Management
    #[command(subcommand)]
    ApiManagement(ApiManagementCommand),
    /// Subscriptions
    #[command(subcommand)]
    Subscription(SubscriptionCommand),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::TrafficManager(c) => c.name(),
            Command::Network(c) => c.name(),
            Command::Batch(c) => c.name(),
            Command::RoleAssignment(c) => c.name(),
            Command::ApiManagement(c) => c.name(),
            Command::Subscription(c) => c.name(),
        }
    }

    fn needs_subscription(&self) -> bool {
        !matches!(self, Command::ApiManagement(_) | Command::Subscription(_))
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {}: {}", log_path.display(), e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("azrm {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("azrm").join("azrm.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".azrm").join("azrm.log");
    }
    PathBuf::from("azrm.log")
}

fn resolve_subscription(config: &Config, args: &Args) -> Result<String> {
    match config.effective_subscription(args.subscription.as_deref()) {
        Some(subscription) => {
            if !auth::validate_subscription_id(&subscription) {
                bail!("'{}' is not a valid subscription id", subscription);
            }
            Ok(subscription)
        }
        None if args.command.needs_subscription() => bail!(
            "No subscription selected. Pass --subscription, set AZURE_SUBSCRIPTION_ID or run 'az account set'."
        ),
        None => Ok(String::new()),
    }
}

async fn dispatch(command: Command, client: &ArmClient, inv: &mut Invocation) -> Result<Output> {
    let output = match command {
        Command::TrafficManager(cmd) => traffic_manager::commands::run(cmd, client, inv).await?,
        Command::Network(cmd) => network::commands::run(cmd, client, inv).await?,
        Command::Batch(cmd) => batch::commands::run(cmd, client, inv).await?,
        Command::RoleAssignment(cmd) => authorization::commands::run(cmd, client, inv).await?,
        Command::Subscription(cmd) => subscriptions::run(cmd, client, inv).await?,
        Command::ApiManagement(cmd) => api_management::commands::run(cmd, inv)?,
    };
    Ok(output)
}

async fn run(args: Args) -> Result<bool> {
    let config = Config::load().context("Failed to load configuration")?;
    let subscription = resolve_subscription(&config, &args)?;
    tracing::debug!("Using subscription '{}'", subscription);

    let client = ArmClient::new(&subscription, auth::default_provider(), config.client)?;
    let mut inv = Invocation::new(args.command.name());
    let output = dispatch(args.command, &client, &mut inv).await?;

    write_output(&output, args.output, std::io::stdout().lock())?;
    inv.emitted();
    Ok(!output.is_failure())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {}", format_arm_error(&err));
            ExitCode::FAILURE
        }
    }
}
