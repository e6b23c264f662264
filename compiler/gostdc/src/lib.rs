//! Command-line driver for the gostd binding generator.
//!
//! Loads a declaration manifest produced by the discovery pass, runs the
//! code generator over it, and prints the dry-run listing and batch summary.
//! Writing the generated files is left to the separate writer.

mod driver;
mod error;
mod manifest;
mod options;

use std::sync::Once;

pub use driver::{run, RunOutput};
pub use error::DriverError;
pub use manifest::{load_manifest, parse_manifest};
pub use options::{parse_args, Command, Options, USAGE};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Only does anything when `RUST_LOG` is set, and only once per process.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
