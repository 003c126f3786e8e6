//! Logger initialization for the mkt binary.

/// Set up env_logger: `--verbose` selects debug output (per-line macro and
/// skip decisions), the default level reports copy and run progress only.
/// `RUST_LOG` overrides both.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();
}
