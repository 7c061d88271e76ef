use thiserror::Error;

/// A write to one of the output sinks failed.
///
/// The collector keeps the first one it sees and carries on observing; the
/// run itself is never interrupted by output trouble.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv sink: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("sqlite sink: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
