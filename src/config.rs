//! Stream configuration
//!
//! Construction-time settings for the transport and for each hardware
//! encoder. Encoder settings are forwarded verbatim to the backend; the
//! coordinator itself interprets none of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FRAMERATE, DEFAULT_PORT};
use crate::error::{Error, Result};

/// Network destination for the outbound stream
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// IP or hostname to send to
    pub ip: String,
    /// Receiver port
    pub port: u16,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Per-encoder configuration
///
/// Matches what VAAPI-class hardware encoders expect at open time. Empty
/// strings mean "backend default" (e.g. default DRM render node, NV12
/// pixel format). Zero means "backend default" for the numeric knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Width of the encoded frames
    pub width: u32,
    /// Height of the encoded frames
    pub height: u32,
    /// Framerate of the encoded video
    pub framerate: u32,
    /// Encoding device, e.g. "/dev/dri/renderD128", empty for default
    pub device: String,
    /// Encoder name, e.g. "h264_vaapi", "hevc_vaapi", empty for default
    pub codec: String,
    /// Input pixel format, e.g. "nv12", "p010le", "rgb0", empty for NV12
    pub pixel_format: String,
    /// Codec profile, 0 to let the backend guess from input
    pub profile: i32,
    /// Maximum number of B-frames between non-B-frames (0 for low latency)
    pub max_b_frames: i32,
    /// Average bitrate in VBR mode (bit_rate != 0 and qp == 0)
    pub bit_rate: i64,
    /// Quantization parameter in CQP mode (qp != 0 and bit_rate == 0)
    pub qp: i32,
    /// Group of pictures size, 0 for default (keyframe period)
    pub gop_size: i32,
    /// Speed-quality tradeoff, 0 for default, 1 best quality, 7 fastest
    pub compression_level: i32,
    /// Use low-power encoding path if the driver exposes one
    pub low_power: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            framerate: DEFAULT_FRAMERATE,
            device: String::new(),
            codec: String::new(),
            pixel_format: String::new(),
            profile: 0,
            max_b_frames: 0,
            bit_rate: 0,
            qp: 0,
            gop_size: 0,
            compression_level: 0,
            low_power: false,
        }
    }
}

impl EncoderConfig {
    /// H.264 high-profile preset, NV12 input, no B-frames
    pub fn h264(width: u32, height: u32, framerate: u32) -> Self {
        Self {
            width,
            height,
            framerate,
            codec: "h264_vaapi".to_string(),
            pixel_format: "nv12".to_string(),
            profile: 100, // H.264 High
            ..Default::default()
        }
    }

    /// 10-bit HEVC preset, P010LE input
    pub fn hevc10(width: u32, height: u32, framerate: u32) -> Self {
        Self {
            width,
            height,
            framerate,
            codec: "hevc_vaapi".to_string(),
            pixel_format: "p010le".to_string(),
            profile: 2, // HEVC Main 10
            ..Default::default()
        }
    }

    /// Preset tuned for minimum end-to-end latency
    pub fn low_latency(width: u32, height: u32, framerate: u32) -> Self {
        Self {
            width,
            height,
            framerate,
            max_b_frames: 0,
            gop_size: framerate as i32,
            compression_level: 7,
            low_power: true,
            ..Default::default()
        }
    }
}

/// Full stream configuration: one transport, N encoders, M raw channels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub net: NetConfig,
    pub encoders: Vec<EncoderConfig>,
    /// Number of raw passthrough channels appended after the video channels
    pub aux_channels: usize,
}

impl StreamConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Total number of multiplexed channels
    pub fn total_channels(&self) -> usize {
        self.encoders.len() + self.aux_channels
    }
}
