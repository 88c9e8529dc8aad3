use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;
use chrono::Local;
use log::info;

use crate::config::LoggingConfig;
use crate::error::Result;

/// Sets up `env_logger` with timestamped records on stderr, or appended to
/// the configured log file.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = config.get_log_level();
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level);

    if let Some(path) = &config.log_file {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(env_logger::Target::Stderr);
    }

    // A second init (e.g. from tests) keeps the first logger
    let _ = builder.try_init();
    Ok(())
}

/// Logs BEGIN on creation and END with the elapsed time on `finish`.
pub struct RunTimer {
    start: Instant,
}

impl RunTimer {
    pub fn start() -> Self {
        info!("BEGIN: {}", Local::now().format("%a %b %e %H:%M:%S %Y"));
        Self { start: Instant::now() }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    pub fn finish(self) {
        info!(
            "END: {} [{:6.2} seconds elapsed]",
            Local::now().format("%a %b %e %H:%M:%S %Y"),
            self.elapsed_secs()
        );
    }
}
