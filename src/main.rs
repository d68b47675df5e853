//! xattrctl - extended attribute tool

use clap::Parser;
use std::process::ExitCode;
use xattrctl::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    // Diagnostics go to stderr so stdout carries only attribute data
    tracing_subscriber::fmt()
        .with_max_level(args.output.level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = args.validate().and_then(|()| {
        let stdout = std::io::stdout();
        xattrctl::run(&args, &mut stdout.lock())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("xattrctl: {e:#}");
            ExitCode::FAILURE
        }
    }
}
