//! Dropbox Go SDK generator.
//!
//! Regenerates the Go SDK from the vendored API specification.
//!
//! # Examples
//!
//! ```bash
//! # Generate with default parameters from the repository root
//! sdkgen generate
//!
//! # Override the SDK version and use a config file
//! sdkgen generate --sdk-version 6.1.0 --config sdkgen.toml
//!
//! # Install bash completions
//! sdkgen completions bash > /etc/bash_completion.d/sdkgen
//! ```

use clap::Parser;
use sdkgen_cli::cli::Cli;
use sdkgen_cli::runner::{execute_command, exit_code_for, init_logging};
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("failed to initialize logging: {e:#}");
        std::process::exit(1);
    }

    let exit_code = match execute_command(cli.command).await {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}
