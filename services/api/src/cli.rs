use crate::assess::{run_assess, run_diseases, AssessArgs, DiseasesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use disease_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Disease Risk Engine",
    about = "Score disease risk from the command line or serve the scoring API",
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
    /// Score one disease from a JSON factor object and print the result
    Assess(AssessArgs),
    /// List supported diseases or print one disease's factor schema
    Diseases(DiseasesArgs),
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
        Command::Assess(args) => run_assess(args),
        Command::Diseases(args) => run_diseases(args),
    }
}
