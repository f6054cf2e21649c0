//! TorBox sync CLI entry point.

use clap::Parser;
use std::process::ExitCode;

use tbsync::cli::commands;
use tbsync::cli::{Cli, Commands};
use tbsync::config::run_log_filename;
use tbsync::error::Error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // The import command mirrors the original exporter's behavior of writing
    // a timestamped run log next to the working directory.
    let log_file = match &cli.command {
        Commands::Import(args) if !args.no_log_file => {
            Some(run_log_filename(&chrono::Local::now()))
        }
        _ => None,
    };

    // Keep the non-blocking writer's guard alive for the whole process so
    // the log file is flushed on exit.
    let _guard = init_tracing(cli.verbose, cli.quiet, log_file.as_deref());

    // Resolve effective JSON mode: --json OR non-TTY stdout
    let json = cli.json || !std::io::IsTerminal::is_terminal(&std::io::stdout());

    // Run the command and handle errors
    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(
    verbose: u8,
    quiet: bool,
    log_file: Option<&str>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    if quiet {
        return None;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag. Progress lines
    // are emitted at info, so that is the default for a migration tool.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time();

    match log_file {
        Some(filename) => {
            let appender = tracing_appender::rolling::never(".", filename);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    match &cli.command {
        Commands::Import(args) => commands::import::execute(args, cli.dry_run, json),
        Commands::Version => commands::version::execute(json),
        Commands::Completions { shell } => commands::completions::execute(shell),
    }
}
