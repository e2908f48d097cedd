pub mod accounts;
pub mod config;
pub mod directions;
pub mod error;
pub mod listings;
pub mod telemetry;

pub use error::AppError;
