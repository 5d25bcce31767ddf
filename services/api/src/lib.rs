mod cli;
mod diagnostics;
mod infra;
mod routes;
mod server;

use emp_status::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
