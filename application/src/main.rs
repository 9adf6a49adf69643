use std::{io, process::ExitCode, sync::OnceLock};

use application::{api, Args, Config, Context, SessionManager};
use service::infra::{storage, Rest};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || LOG_LEVEL.get().copied().unwrap_or(log::Level::WARN)
                            >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

async fn start() -> Result<(), ()> {
    let Args { config, command } =
        Args::parse().unwrap_or_else(|e| e.exit());

    let Config {
        backend,
        storage,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let backend = Rest::new(&backend.into()).map_err(|e| {
        log::error!("failed to initialize `Rest` backend: {e}");
    })?;
    log::debug!("session is stored in `{}`", storage.path.display());
    let session = SessionManager::new(storage::File::new(storage.path));

    let mut ctx = Context::new(backend, session);
    match api::execute(command, &mut ctx).await {
        Ok(out) => {
            print!("{out}");
            Ok(())
        }
        Err(e) => {
            log::debug!("command failed: {e}");
            eprintln!("Error: {}", e.message);
            Err(())
        }
    }
}
