use crate::diagnostics::{run_diagnostics, DiagnoseArgs};
use crate::infra::{build_store, StoreBackend};
use crate::server;
use clap::{Args, Parser, Subcommand};
use emp_status::config::AppConfig;
use emp_status::employees::{EmployeeRepository, EmployeeStatusService};
use emp_status::error::AppError;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "Employee Status Service",
    about = "Look up employee salary statistics and performance status",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run a single status lookup and print the JSON result
    Status(StatusArgs),
    /// Check connectivity, schema and sample data of the employee store
    Diagnose(DiagnoseArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve the seeded in-memory employees instead of PostgreSQL
    #[arg(long)]
    pub(crate) memory: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StatusArgs {
    /// National number to look up
    pub(crate) national_number: String,
    /// Use the seeded in-memory employees instead of PostgreSQL
    #[arg(long)]
    pub(crate) memory: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Status(args) => run_status(args).await,
        Command::Diagnose(args) => run_diagnostics(args).await,
    }
}

async fn run_status(args: StatusArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    match build_store(&config, args.memory)? {
        StoreBackend::Postgres(repository) => print_status(repository, &args.national_number).await,
        StoreBackend::Memory(repository) => print_status(repository, &args.national_number).await,
    }
}

async fn print_status<R>(repository: Arc<R>, raw: &str) -> Result<(), AppError>
where
    R: EmployeeRepository + 'static,
{
    let service = EmployeeStatusService::new(repository);
    let outcome = service.process_raw_request(raw).await;
    let rendered = serde_json::to_string_pretty(&outcome.to_response())
        .map_err(|err| AppError::Io(err.into()))?;
    println!("{rendered}");
    Ok(())
}
