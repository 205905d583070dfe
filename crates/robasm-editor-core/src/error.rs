use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("input element id must not be empty")]
    #[diagnostic(code(robasm::config::empty_input_id))]
    EmptyInputId,

    #[error("at least one backdrop element id is required")]
    #[diagnostic(code(robasm::config::no_backdrops))]
    NoBackdrops,

    #[error("element id {id:?} is used more than once")]
    #[diagnostic(code(robasm::config::duplicate_id))]
    DuplicateId { id: String },

    #[error("class prefix {prefix:?} may only contain letters, digits, '-' and '_'")]
    #[diagnostic(code(robasm::config::class_prefix))]
    InvalidClassPrefix { prefix: String },

    #[error("{field} must be a finite, non-negative number, got {value}")]
    #[diagnostic(code(robasm::config::invalid_length))]
    InvalidLength { field: &'static str, value: f64 },

    #[error("failed to parse config: {0}")]
    #[diagnostic(code(robasm::config::parse))]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error, Diagnostic)]
pub enum EnvelopeError {
    #[error("failed to encode envelope: {0}")]
    #[diagnostic(code(robasm::envelope::encode))]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode envelope: {0}")]
    #[diagnostic(code(robasm::envelope::decode))]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Error, Diagnostic)]
pub enum TileMapError {
    #[error("tile row {row} has {len} cells, expected {expected}")]
    #[diagnostic(code(robasm::tiles::ragged_rows))]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("tile byte stream has odd length {len}")]
    #[diagnostic(code(robasm::tiles::odd_length))]
    OddLength { len: usize },

    #[error("tile byte stream holds {cells} cells, expected {width}x{height}")]
    #[diagnostic(code(robasm::tiles::dimension_mismatch))]
    DimensionMismatch {
        width: usize,
        height: usize,
        cells: usize,
    },
}

#[derive(Debug, Error, Diagnostic)]
pub enum SocketError {
    #[error("failed to open socket to {url}: {message}")]
    #[diagnostic(code(robasm::socket::connect))]
    Connect { url: String, message: String },

    #[error("socket is not open (ready state {ready_state})")]
    #[diagnostic(code(robasm::socket::not_open))]
    NotOpen { ready_state: u16 },

    #[error("failed to send over socket: {0}")]
    #[diagnostic(code(robasm::socket::send))]
    Send(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Envelope(#[from] EnvelopeError),
}

/// Umbrella error for the mounted editor components.
#[derive(Debug, Error, Diagnostic)]
pub enum OverlayError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Tiles(#[from] TileMapError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Socket(#[from] SocketError),

    #[error("element #{id} not found")]
    #[diagnostic(code(robasm::dom::missing_element))]
    MissingElement { id: String },

    #[error("element #{id} is not a {expected}")]
    #[diagnostic(code(robasm::dom::wrong_element))]
    WrongElement { id: String, expected: &'static str },

    #[error("browser call failed: {0}")]
    #[diagnostic(code(robasm::dom::js))]
    Js(String),
}
