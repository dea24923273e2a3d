// error.rs - Failure modes of the simulation core

use std::io;
use std::path::PathBuf;

/// Everything in here is recoverable; the session turns each one into a safe
/// default instead of stopping.
#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    #[error("failed to read pattern file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write pattern file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build the stepping runtime")]
    Runtime(#[source] io::Error),
}
