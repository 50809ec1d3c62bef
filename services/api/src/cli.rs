use crate::estimate::{run_house_estimate, run_loan_estimate, HouseEstimateArgs, LoanEstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use homescore::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "homescore",
    about = "Serve or run heuristic house price and loan eligibility estimates",
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
    /// Score a single submission offline without persisting it
    Estimate {
        #[command(subcommand)]
        command: EstimateCommand,
    },
}

#[derive(Subcommand, Debug)]
enum EstimateCommand {
    /// Estimate a property price
    House(HouseEstimateArgs),
    /// Assess loan eligibility
    Loan(LoanEstimateArgs),
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
        Command::Estimate {
            command: EstimateCommand::House(args),
        } => run_house_estimate(args),
        Command::Estimate {
            command: EstimateCommand::Loan(args),
        } => run_loan_estimate(args),
    }
}
