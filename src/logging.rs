use log::LevelFilter;

/// Initialize the logger with appropriate level based on verbosity.
///
/// `RUST_LOG` is read first; the flags override its level.
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Off
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::from_default_env();
    if quiet || verbose || std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    log::debug!("Logger initialized with level: {level:?}");
}
