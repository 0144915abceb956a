//! bexpr command line library.
//!
//! `main.rs` only splits argv; everything it runs lives in [`commands`] and
//! returns the text to print, so the commands are testable without a
//! process.

pub mod commands;

use std::sync::Once;

use bexpr_attr::AttrError;
use bexpr_eval::EvalError;
use bexpr_parse::ParseError;
use thiserror::Error;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Enable with `RUST_LOG=bexpr_eval=trace` and
/// similar filters; without `RUST_LOG` nothing is installed.
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

/// Anything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("eval error: {0}")]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Attr(#[from] AttrError),
    #[error("in --let {name}: {source}")]
    Let {
        name: String,
        #[source]
        source: Box<CliError>,
    },
}
