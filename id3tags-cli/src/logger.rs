use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static LOGGER: PedanticLogger = PedanticLogger;

/// A small logger that colors messages by level. Info and below go to stdout, while
/// warnings and errors go to stderr.
pub struct PedanticLogger;

impl PedanticLogger {
    pub fn setup(verbose: bool) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;

        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });

        Ok(())
    }
}

impl Log for PedanticLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        let md = record.metadata();

        if !self.enabled(md) {
            return;
        }

        let (mut out, color) = match md.level() {
            Level::Error => (
                StandardStream::stderr(ColorChoice::Auto),
                ColorSpec::new().set_fg(Some(Color::Red)).clone(),
            ),

            Level::Warn => (
                StandardStream::stderr(ColorChoice::Auto),
                ColorSpec::new()
                    .set_fg(Some(Color::Yellow))
                    .set_intense(true)
                    .clone(),
            ),

            Level::Info => (
                StandardStream::stdout(ColorChoice::Auto),
                ColorSpec::new().set_dimmed(true).clone(),
            ),

            _ => (StandardStream::stdout(ColorChoice::Auto), ColorSpec::new()),
        };

        // There is nowhere to report a failed log write, so they are dropped.
        out.set_color(&color).ok();
        writeln![out, "{}: {}", md.target(), record.args()].ok();
        out.reset().ok();
    }

    fn flush(&self) {}
}
