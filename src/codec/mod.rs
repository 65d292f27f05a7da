//! Encoder adapters
//!
//! Defines the seam between the channel coordinator and whatever encodes
//! video frames. Hardware backends (VAAPI, NVENC, ...) live behind the
//! [`EncoderAdapter`] trait; the crate bundles a raw packing backend for
//! loopback use and tests.

pub mod raw;

pub use raw::RawVideoEncoder;

use crate::config::EncoderConfig;
use crate::error::CodecError;
use crate::frame::Frame;

/// One hardware (or software) video encoder instance
///
/// Encoders pipeline internally: a submitted frame may yield zero, one or
/// several ready packets, and the tail of the pipeline only comes out
/// after [`send_eof`](EncoderAdapter::send_eof). The coordinator drives
/// the produce/consume cycle; implementations only need to honour the
/// polling contract below.
pub trait EncoderAdapter {
    /// Open an encoder for the given configuration
    fn open(config: &EncoderConfig) -> std::result::Result<Self, CodecError>
    where
        Self: Sized;

    /// Submit one frame for encoding
    ///
    /// The frame's planes are borrowed only for the duration of the call.
    fn send_frame(&mut self, frame: &Frame<'_>) -> std::result::Result<(), CodecError>;

    /// Signal end of stream, releasing any frames still in the pipeline
    fn send_eof(&mut self) -> std::result::Result<(), CodecError>;

    /// Poll for the next ready packet
    ///
    /// `Ok(Some(bytes))` yields one encoded packet, valid only until the
    /// next call on this encoder. `Ok(None)` means nothing further is
    /// ready right now. `Err` reports a terminal encoding failure and may
    /// surface after earlier polls already yielded packets.
    fn receive_packet(&mut self) -> std::result::Result<Option<&[u8]>, CodecError>;
}

/// Encoder statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct EncoderStats {
    pub frames_encoded: u64,
    pub bytes_produced: u64,
}
