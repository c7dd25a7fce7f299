//! Console logging for the launcher. All diagnostics go to the inherited
//! console; nothing is logged to a file.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        if record.level() <= Level::Warn {
            eprintln!("{} [{}] {}", stamp, record.level(), record.args());
        } else {
            println!("{} [{}] {}", stamp, record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the console logger. Info by default so the launch narrates each
/// step; `SEQMONK_LAUNCHER_DEBUG=1` raises it to Debug.
pub fn init() {
    let level = if std::env::var_os("SEQMONK_LAUNCHER_DEBUG").is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
