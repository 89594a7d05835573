//! `ksi`: verify and extend keyless timestamp signatures
//!
//! Exit codes: 0 success, 3 invalid arguments, 4 parse error, 5 network
//! error, 6 verification failure, 7 service error, 9 I/O error,
//! 10 cryptographic error, 15 configuration missing or invalid.

mod cli;
mod config;
mod report;

use clap::Parser;
use cli::{Cli, Command, ExtendArgs, PubfileCommand, VerifyArgs};
use ksi::{ErrorKind, Services, VerifyRequest};
use report::ReportFlags;
use std::process;
use tracing_subscriber::EnvFilter;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ErrorKind::InvalidArgument.exit_code()
            } else {
                0
            };
            process::exit(code);
        }
    };

    init_logging(cli.global.debug);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start runtime: {}", e);
            process::exit(ErrorKind::Io.exit_code());
        }
    };

    process::exit(runtime.block_on(run(cli)));
}

fn fail(error: &ksi::Error) -> i32 {
    eprintln!("failed.");
    eprintln!("Error: {}", error);
    error.exit_code()
}

async fn run(cli: Cli) -> i32 {
    let services = match config::resolve_endpoints(&cli.global)
        .and_then(|endpoints| Services::from_endpoints(&endpoints))
    {
        Ok(services) => services,
        Err(e) => return fail(&e),
    };
    let details = cli.global.debug;

    match cli.command {
        Command::Verify(args) => verify(args, details, &services).await,
        Command::Extend(args) => extend(args, details, &services).await,
        Command::Pubfile {
            command: PubfileCommand::Verify { input },
        } => {
            eprint!("Verifying publications file... ");
            match ksi::run_pubfile_verify(input.as_deref(), &services).await {
                Ok(outcome) => {
                    eprintln!("ok.");
                    let mut stdout = std::io::stdout().lock();
                    if let Err(e) = report::write_pubfile(&mut stdout, &outcome.file, details) {
                        return fail(&ksi::Error::io("<stdout>", e));
                    }
                    0
                }
                Err(e) => fail(&e),
            }
        }
    }
}

async fn verify(args: VerifyArgs, details: bool, services: &Services) -> i32 {
    let request = match VerifyRequest::from_options(args.options()) {
        Ok(request) => request,
        Err(e) => return fail(&e),
    };
    let flags = ReportFlags {
        identity: args.identity,
        references: args.references,
        details,
    };

    match ksi::run_verify(&args.input, &request, services).await {
        Ok(outcome) => {
            eprintln!("{}... ok.", outcome.description);
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = report::write_verify(&mut stdout, &outcome, flags) {
                return fail(&ksi::Error::io("<stdout>", e));
            }
            0
        }
        Err(failure) => {
            if let Some(extended) = &failure.extended {
                tracing::debug!(
                    "signature was extended to {:?} before the failure",
                    extended.publication_record().map(|r| r.publication_time())
                );
            }
            fail(&failure.error)
        }
    }
}

async fn extend(args: ExtendArgs, details: bool, services: &Services) -> i32 {
    eprint!("Extending signature... ");
    match ksi::run_extend(&args.input, &args.output, args.time, services).await {
        Ok(outcome) => {
            eprintln!("ok.");
            let mut stderr = std::io::stderr().lock();
            if let Err(e) =
                report::write_extend(&mut stderr, &outcome.extended, &outcome.original, details)
            {
                return fail(&ksi::Error::io("<stderr>", e));
            }
            0
        }
        Err(e) => fail(&e),
    }
}
