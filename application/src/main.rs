use std::{io, process::ExitCode, sync::OnceLock};

use application::{args::Command, cli, AsError as _, Args, Config};
use common::DateTime;
use service::domain::cancellation::Initiator;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

async fn run() -> Result<(), ()> {
    // Prints usage or version and exits on `--help` or `--version`.
    let Args { config, command } = Args::parse().unwrap_or_else(|e| e.exit());

    let config = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;
    LOG_LEVEL
        .set(config.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let currency = config.pricing.currency;
    let service = service::Config::try_from(config).map_err(|e| {
        log::error!("{}", e.into_error());
    })?;

    let output = match command {
        Command::Quote {
            hours,
            per_hour,
            per_day,
        } => cli::quote(&service.fees, currency, hours, per_hour, per_day),
        Command::Availability {
            capacity,
            bookings,
            request,
        } => Ok(cli::availability(capacity, &bookings, request)),
        Command::Refund {
            base,
            policy,
            start,
            now,
            host,
        } => cli::refund(
            &service.cancellation,
            currency,
            base,
            policy,
            start,
            now.unwrap_or_else(DateTime::now),
            if host { Initiator::Host } else { Initiator::Guest },
        ),
        Command::Book(book) => cli::book(service, currency, book).await,
        Command::Transition { from, to } => cli::transition(from, to),
    }
    .map_err(|e| log::error!("{e}"))?;

    println!("{output}");
    Ok(())
}
