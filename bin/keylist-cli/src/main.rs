//! keylist CLI
//!
//! Lists the object keys of one S3 bucket.

use clap::Parser;
use std::process::ExitCode;

mod args;
mod run;

use args::Args;

/// Exit status for invocation errors, same as clap usage errors
const USAGE_EXIT_CODE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    match list(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_status(&e))
        }
    }
}

async fn list(args: Args) -> anyhow::Result<()> {
    // Validate before touching the network
    let invocation = args.into_invocation()?;

    run::init_logging(&invocation.config.log_level);

    run::execute(invocation).await?;
    Ok(())
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<keylist_common::Error>() {
        Some(e) if e.is_invocation_error() => USAGE_EXIT_CODE,
        _ => 1,
    }
}
