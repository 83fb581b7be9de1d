use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::Config;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    TracingInit(#[from] tracing_subscriber::util::TryInitError),
}

/// Where log lines go for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Plain command: stderr unless a log file is configured.
    Stderr,
    /// Full-screen console: only a configured log file, never the terminal.
    FileOnly,
}

pub fn setup(config: &Config, target: LogTarget) -> Result<(), LoggingError> {
    let filter = || {
        EnvFilter::builder()
            .with_default_directive(config.log_level.into())
            .from_env_lossy()
    };

    match (&config.log_file, target) {
        (Some(path), _) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::Open {
                    path: path.clone(),
                    source,
                })?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter())
                .try_init()?;
        }
        (None, LogTarget::Stderr) => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .with(filter())
                .try_init()?;
        }
        (None, LogTarget::FileOnly) => {}
    }
    Ok(())
}
