//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::io::{self, Write};
use std::path::PathBuf;

use log::{error, info, LevelFilter};
use rayon::prelude::*;
use simplelog::{Config, TermLogger, TerminalMode};

use bzview::error::ViewError;
use bzview::providers::ProviderRegistry;
use bzview::tools::cli::init_view_opts;
use bzview::viewer::{view_file, Outcome};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. Stdout is kept for the text.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }

    let opts = init_view_opts();
    let registry = ProviderRegistry::with_defaults(opts.decode_options());

    // Decode every file in parallel, then report in command line order
    let results: Vec<(&PathBuf, Result<Outcome, ViewError>)> = opts
        .files
        .par_iter()
        .map(|file| (file, view_file(file, &registry, &opts)))
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;
    for (file, result) in results {
        match result {
            Ok(Outcome::Text(text)) => {
                if let Err(e) = out.write_all(text.as_bytes()) {
                    error!("Unable to write {} to stdout: {}", file.display(), e);
                    failures += 1;
                }
            }
            Ok(Outcome::Written(path, bytes)) => {
                info!("{}: wrote {} bytes to {}.", file.display(), bytes, path.display())
            }
            Ok(Outcome::Tested(bytes)) => info!("{}: ok ({} bytes).", file.display(), bytes),
            Err(e) => {
                error!("{}: {}", file.display(), e);
                failures += 1;
            }
        }
    }
    if let Err(e) = out.flush() {
        error!("Unable to flush stdout: {}", e);
        failures += 1;
    }

    info!("Done.");
    if failures > 0 {
        std::process::exit(1);
    }
}
