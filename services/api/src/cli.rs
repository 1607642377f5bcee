use crate::demo::{run_batch, run_demo, run_simulation, BatchArgs, DemoArgs, SimulateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use infonavit_sim::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "INFONAVIT Credit Simulator",
    about = "Estimate INFONAVIT mortgage credit from the command line or over HTTP",
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
    /// Run a single simulation from command-line inputs
    Simulate(SimulateArgs),
    /// Simulate every scenario in a CSV file
    Batch(BatchArgs),
    /// Walk a sample worker through all six wizard steps
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Simulate(args) => run_simulation(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}
