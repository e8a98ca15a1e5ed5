mod check;
mod cli;
mod generate;
mod infra;
mod routes;
mod server;

use ihic::error::AppError;

pub use generate::{generate_site, GenerateArgs};

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
