use std::path::PathBuf;

/// Errors raised by the loader, the collector and the runner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A type without the test-container capability was handed to the loader.
    #[error("type error: {type_name} is not a test case")]
    NotATestCase { type_name: String },

    #[error("{type_name} has no test method named '{method}'")]
    UnknownTestMethod { type_name: String, method: String },

    /// A registered handler failed while being notified.
    #[error("result handler failed during {event}: {source}")]
    Handler {
        event: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("instrumentation error: {0}")]
    Instrumentation(#[source] anyhow::Error),

    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
