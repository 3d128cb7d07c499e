// SPDX-License-Identifier: MIT
//
// chromatone: color-harmony palettes with contrast-resolved UI roles.
//
// This binary wires the command line to the engine crates:
//
//   chromatone-color → Hsl / Rgb values, conversion, parsing
//   chromatone-theme → harmony, role mapping, contrast resolution,
//                      validation, persistence, export
//
// Each invocation is one pass through the pipeline:
//
//   store → ThemeConfiguration → flag overrides → ResolvedTheme → stdout
//
// Exit codes: 0 on success, 2 when validation fails (unless
// --allow-failures), 1 for everything else.

mod cli;
mod error;

use std::io;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(error) = cli::run(cli, &mut out) {
        eprintln!("chromatone: {error}");
        process::exit(error.exit_code());
    }
}

/// Log to stderr. `RUST_LOG` wins unless `--verbose` asks for debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
