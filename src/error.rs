use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Feed error: {0}")]
    Fetch(#[from] crate::feed::FetchError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
