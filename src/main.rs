use log::error;
use std::env;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use lustra::list::list_operand;
use lustra::options::{self, Resolution};

fn main() -> ExitCode {
    // Initialize structured logging
    if let Err(err) = lustra::telemetry::init() {
        eprintln!("Failed to initialize logging: {:#}", err);
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = env::args().collect();
    let invocation = invocation_name(&args);

    let resolution = match options::resolve_args(&invocation, args.get(1..).unwrap_or(&[])) {
        Ok(resolution) => resolution,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    match resolution {
        Resolution::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Resolution::List { options, operands } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let mut failed = false;

            // Every operand gets its turn; a bad one fails the run at the
            // end instead of cutting off the ones after it.
            for operand in &operands {
                if let Err(err) = list_operand(operand, &options, &mut out) {
                    error!("{:#}", err);
                    failed = true;
                }
            }

            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

/// The file name the process was started under. The leading directory part
/// of `argv[0]` is irrelevant to picking a column profile.
fn invocation_name(args: &[String]) -> String {
    args.first()
        .map(|arg0| {
            Path::new(arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| arg0.clone())
        })
        .unwrap_or_default()
}
