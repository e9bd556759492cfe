//! Process-wide `env_logger` setup for the binary.
//!
//! Other crates log at `Warn`. This crate logs at `Info` (load summaries,
//! report path), raised to `Debug` (relocations, chain fallback) and `Trace`
//! (every probe step) by repeated `-v`. `RUST_LOG` is applied last and wins.

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Level for this crate's modules at the given `-v` count.
pub fn crate_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. Only the first call has any effect.
pub fn initialize_logger(verbosity: u8) {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("token_table", crate_level(verbosity))
            .format_timestamp_millis()
            .parse_default_env();

        // Tests and embedding hosts may have installed one already.
        let _ = builder.try_init();
    });
}
