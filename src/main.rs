//! Storefront CLI

use std::process::ExitCode;

use clap::Parser;
use storefront::{config, observability};

use crate::cli::Cli;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    config::load_dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init_tracing(cli.logging()) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, stderr is all that is left"
        )]
        {
            eprintln!("{error}");
        }
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            #[expect(clippy::print_stderr, reason = "command errors are reported on stderr")]
            {
                eprintln!("error: {error}");
            }

            ExitCode::FAILURE
        }
    }
}
