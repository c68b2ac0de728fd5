use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error while opening file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Json error: {0}")]
    Json(#[from] json::Error),

    #[error("Couldn't find {0}")]
    MissingKey(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("Arena {width}x{height} is too small to place a pad")]
    InvalidArena { width: f64, height: f64 },

    #[error("Maximal tick count reached ({0})")]
    TickLimit(usize),
}
