//! # Vonage CLI
//!
//! Command-line companion to the Vonage Rust SDK core.
//!
//! ## Features
//!
//! - Generate RS256 application JWTs with ACL paths, subject and fixed IDs
//! - Sign request parameters with any supported signature method
//! - Verify the `sig` of inbound webhooks
//! - Render `talk` and `connect` NCCOs
//!
//! ## Usage
//!
//! ```bash
//! # Application JWT
//! vonage jwt generate --application-id aaaaaaaa-bbbb-cccc-dddd-0123456789ab \
//!   --private-key-file private.key --path "/*/users/**"
//!
//! # Signature of a request
//! vonage sign --method sha256hmac --secret s3cr3t -P to=447700900000 -P text=Hi
//!
//! # Check a webhook query string
//! vonage verify --method md5hash --secret s3cr3t --query "$QUERY_STRING"
//!
//! # NCCO
//! vonage ncco talk --text "Hello" --loop 2 --pretty
//! ```
//!
//! Values not given as flags are read from `--config` and `VONAGE__*`
//! environment variables.

#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

use std::process::ExitCode;

use clap::Parser;

pub use cli::{Cli, Commands};
pub use commands::{CommandOutput, execute};
pub use error::{CliError, CliResult, ErrorCategory};

/// Parse arguments, run the command and print its output
///
/// Errors and suggestions go to stderr; an invalid signature or any error
/// exits with status 1.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.json_logs) {
        eprintln!("warning: {e}");
    }

    match execute(&cli) {
        Ok(output) => {
            println!("{}", output.text);
            if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("error ({}): {e}", e.category());
            for suggestion in e.suggestions() {
                eprintln!("  hint: {suggestion}");
            }
            ExitCode::FAILURE
        }
    }
}
