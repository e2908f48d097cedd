mod catalog;
mod cli;
mod infra;
mod routes;
mod server;

use student_housing::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
