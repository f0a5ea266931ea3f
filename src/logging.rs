use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::runtime::ConfigBuilder;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const LOG_DEST_STDERR: &str = "stderr";

fn default_configbuilder() -> ConfigBuilder {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{l:<7} {d(%Y-%m-%d %H:%M:%S)}     {t}  {m}{n}",
        )))
        .build();

    Config::builder().appender(Appender::builder().build(LOG_DEST_STDERR, Box::new(stderr)))
}

/// Sends everything at `level` and above to stderr.  Stdout is left alone for
/// the tools' actual output.
///
/// Fails if a global logger is already installed.
pub fn init_global_logger(level: LevelFilter) -> anyhow::Result<()> {
    let config = default_configbuilder()
        .build(Root::builder().appender(LOG_DEST_STDERR).build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

/// Log level for a `-v` count and `-q` flag.  Warnings by default, each `-v`
/// one step more verbose, `-q` only errors.
pub fn level_from_flags(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
