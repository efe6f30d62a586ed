//! Logging setup.
//!
//! Logs always go to stderr, in both formats. Stdout is reserved for
//! command output such as `--format json` reports.

use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Map CLI verbosity (0=quiet, 1=normal, 2=verbose, 3+=debug) to a level.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Formatting layer writing to `writer`, as JSON lines or human text.
pub fn log_layer<S, W>(json_output: bool, writer: W) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json_output {
        fmt::layer()
            .json()
            .with_target(true)
            .with_thread_names(true)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer().with_target(true).with_writer(writer).boxed()
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `level`.
pub fn init_logging(level: Level, json_output: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("sympredict={level},tower_http={level},warn"))
    });

    let _ = Registry::default()
        .with(env_filter)
        .with(log_layer(json_output, std::io::stderr))
        .try_init();
}
