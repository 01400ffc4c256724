pub mod api;
pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod format;
pub mod view;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    InvalidArgs(String),
    Io(std::io::Error),
    /// The request never completed (DNS, connect, timeout, transport).
    Network(String),
    /// The request completed with a non-success status.
    Http(u16),
    Parse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgs(msg) => write!(f, "invalid arguments: {msg}"),
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::Network(msg) => write!(f, "network error: {msg}"),
            Error::Http(status) => write!(f, "request returned status {status}"),
            Error::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value)
    }
}
