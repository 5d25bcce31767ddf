use clap::Args;
use emp_status::config::AppConfig;
use emp_status::employees::{
    DataAccessError, EmployeeStatusService, PgEmployeeRepository, StatusOutcome,
};
use emp_status::error::AppError;
use sqlx::PgPool;
use std::sync::Arc;

static REQUIRED_TABLES: [&str; 2] = ["salaries", "users"];

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// National number used for the sample lookup
    #[arg(long, default_value_t = 123456789)]
    pub(crate) national_number: i64,
}

pub(crate) async fn run_diagnostics(args: DiagnoseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    println!("Employee store diagnostics");

    println!("\nConnection");
    let repository = match PgEmployeeRepository::connect(&config.database).await {
        Ok(repository) => repository,
        Err(err) => {
            println!("- failed: {err}");
            println!("- check that DATABASE_URL is set, reachable and its credentials are valid");
            return Err(err.into());
        }
    };
    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(repository.pool())
        .await
        .map_err(DataAccessError::database("reading server version"))?;
    println!("- connected: {version}");

    println!("\nSchema");
    let missing = missing_tables(repository.pool()).await?;
    if missing.is_empty() {
        println!("- all required tables present");
    } else {
        for table in &missing {
            println!("- missing table: {table}");
        }
        return Ok(());
    }

    println!("\nData");
    for table in REQUIRED_TABLES {
        let count = row_count(repository.pool(), table).await?;
        if count == 0 {
            println!("- {table}: no rows");
        } else {
            println!("- {table}: {count} rows");
        }
    }

    println!("\nSample lookup ({})", args.national_number);
    let service = EmployeeStatusService::new(Arc::new(repository));
    match service.process_employee_request(args.national_number).await {
        StatusOutcome::Success(view) => println!(
            "- {} | active {} | {} salaries | total {} | average {} | {}",
            view.username,
            view.is_active,
            view.salary_count,
            view.total_salary,
            view.average_salary,
            view.status.label()
        ),
        StatusOutcome::NotFound { message } => println!("- not found: {message}"),
        StatusOutcome::Failure { message } => println!("- failed: {message}"),
    }

    Ok(())
}

async fn missing_tables(pool: &PgPool) -> Result<Vec<&'static str>, DataAccessError> {
    let present: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_name = ANY($1)",
    )
    .bind(&REQUIRED_TABLES[..])
    .fetch_all(pool)
    .await
    .map_err(DataAccessError::database("listing tables"))?;

    Ok(REQUIRED_TABLES
        .into_iter()
        .filter(|table| !present.iter().any(|name| name == table))
        .collect())
}

async fn row_count(pool: &PgPool, table: &'static str) -> Result<i64, DataAccessError> {
    let query = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&query)
        .fetch_one(pool)
        .await
        .map_err(DataAccessError::database("counting rows"))
}
