mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("favscan error: {:#}", err);
        std::process::exit(1);
    }
}
