use crate::catalog::{run_listing_search, ListingSearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use student_housing::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Student Housing",
    about = "Serve and query campus residence listings from the command line",
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
    /// Search the configured listing source and print the matches
    Listings(ListingSearchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed an administrator account with this email at startup
    #[arg(long, requires = "admin_password")]
    pub(crate) admin_email: Option<String>,
    /// Password for the seeded administrator account
    #[arg(long, requires = "admin_email")]
    pub(crate) admin_password: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Listings(args) => run_listing_search(args).await,
    }
}
