use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected form mutations. These point at a wiring mistake between a control
/// and the schema, never at bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' does not accept a {payload} change")]
    KindMismatch { field: String, payload: &'static str },

    #[error("'{option}' is not an option of field '{field}'")]
    UnknownOption { field: String, option: String },

    #[error("invalid selection '{raw}' for field '{field}'")]
    InvalidChoice { field: String, raw: String },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("could not read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not read session file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed session file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("geolocation provider '{0}' needs {1}")]
    Geolocation(&'static str, &'static str),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("could not open log file {path}: {source}")]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
