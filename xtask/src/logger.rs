use std::{fs, io, sync::Arc};

use exchange_config::Config;
use tracing::{Dispatch, Level};
use tracing_subscriber::{Registry, filter::Targets, fmt::writer::BoxMakeWriter, prelude::*};

const TRACE_FILE: &str = "xtask";

/// Installs the global subscriber: human readable events on stderr and, when `dump_trace` is set,
/// a JSON trace in the configured log directory.
pub fn install(config: &Config) -> io::Result<()> {
    let level = if config.verbose { Level::DEBUG } else { Level::INFO };
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(Targets::new().with_target("xtask", level));

    let trace_layer = if config.dump_trace {
        fs::create_dir_all(&config.log_dir)?;
        let file = fs::File::create(config.log_dir.join(TRACE_FILE))?;
        let writer = BoxMakeWriter::new(Arc::new(file));
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .json()
            .with_filter(Targets::new().with_target("xtask", Level::TRACE));
        Some(layer)
    } else {
        None
    };

    let dispatch = Dispatch::new(Registry::default().with(stderr_layer).with(trace_layer));
    dispatch.init();
    Ok(())
}
