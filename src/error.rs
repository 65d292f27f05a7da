//! Error types for the video streaming library

use thiserror::Error;

/// Main error type for the library
///
/// Every variant maps to one failure the channel coordinator can report.
/// A call site that only cares about success keeps a two-valued view via
/// [`Result`]; the variant carries the failure kind for callers that want
/// to react differently.
#[derive(Error, Debug)]
pub enum Error {
    #[error("too many encoders: {requested} requested, capacity is {max}")]
    TooManyEncoders { requested: usize, max: usize },

    #[error("failed to initialize network client: {0}")]
    TransportInit(#[source] NetworkError),

    #[error("failed to initialize hardware encoder {index}: {source}")]
    EncoderInit {
        index: usize,
        #[source]
        source: CodecError,
    },

    #[error("channel {channel} out of range, stream has {channels} channels")]
    ChannelOutOfRange { channel: usize, channels: usize },

    #[error("failed to send frame to hardware: {0}")]
    HardwareSubmit(#[source] CodecError),

    #[error("failed to encode frame: {0}")]
    Encode(#[source] CodecError),

    #[error("failed to send frame over network: {0}")]
    TransportSend(#[source] NetworkError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encoder backend errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Encoder initialization failed: {0}")]
    EncoderInit(String),

    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    #[error("Frame submission failed: {0}")]
    SubmitFailed(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Missing frame plane {0}")]
    MissingPlane(usize),

    #[error("Invalid frame geometry: {0}")]
    InvalidGeometry(String),
}

/// Network transport errors
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Socket bind failed: {0}")]
    BindFailed(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Invalid channel: {0}")]
    InvalidChannel(usize),

    #[error("Invalid transport configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
