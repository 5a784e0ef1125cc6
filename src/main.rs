use sse_reader::cli::{parse_args, run_tail, setup_interrupt_handler, CliCommand, USAGE, VERSION};
use sse_reader::ReaderConfig;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = match parse_args(std::env::args(), ReaderConfig::from_env()) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    match command {
        CliCommand::Version => println!("sse-tail {}", VERSION),
        CliCommand::Help => println!("{}", USAGE),
        CliCommand::Tail(opts) => {
            let interrupted = setup_interrupt_handler();
            let stats = run_tail(opts, interrupted).await?;
            tracing::info!(
                termination = ?stats.termination,
                events = stats.events_dispatched,
                "done"
            );
        }
    }

    Ok(())
}
