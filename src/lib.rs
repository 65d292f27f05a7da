//! # LAN Video Streamer
//!
//! Low-latency multi-channel hardware video streaming over LAN.
//!
//! The crate coordinates delivery of one or more live data channels over a
//! single outbound UDP stream: video channels that pass through a hardware
//! encoder, plus optional raw auxiliary channels forwarded verbatim.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            SENDER PC                             │
//! │   ┌──────────┐    ┌──────────┐    ┌──────────┐                   │
//! │   │ Camera / │    │ Camera / │    │ Aux data │                   │
//! │   │   App    │    │   App    │    │ (poses…) │                   │
//! │   └────┬─────┘    └────┬─────┘    └────┬─────┘                   │
//! │        ▼               ▼               │                         │
//! │   ┌─────────────────────────────────────────────────────────┐    │
//! │   │         Channel Coordinator (channels::coordinator)     │    │
//! │   │   ┌──────────┐    ┌──────────┐        │                 │    │
//! │   │   │ Encoder  │    │ Encoder  │        │ passthrough     │    │
//! │   │   │ chan 0   │    │ chan 1   │        │ chan 2          │    │
//! │   │   └────┬─────┘    └────┬─────┘        │                 │    │
//! │   └────────┼───────────────┼──────────────┼─────────────────┘    │
//! │            ▼               ▼              ▼                      │
//! │   ┌─────────────────────────────────────────────────────────┐    │
//! │   │    UDP Sender (network::sender) - Single Socket         │    │
//! │   │    Datagrams: [Channel|Seq|Fragment|Payload]            │    │
//! │   └─────────────────────────────────────────────────────────┘    │
//! └──────────────────────────┬───────────────────────────────────────┘
//!                            │ UDP over LAN
//!                            ▼
//!                     receiving peer (demux by channel, out of scope)
//! ```
//!
//! The coordinator is fully synchronous: [`channels::ChannelCoordinator::send`]
//! blocks until hardware submission, encoder drain and every resulting network
//! send have completed or failed. Callers needing responsiveness run one
//! coordinator per dedicated thread.

pub mod channels;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod network;
pub mod protocol;

pub use error::{Error, Result};

/// Library-wide constants
pub mod constants {
    /// Maximum number of hardware encoders multiplexed on one stream
    pub const MAX_ENCODERS: usize = 3;

    /// Maximum number of planes in a planar video frame
    pub const MAX_PLANES: usize = 8;

    /// Maximum datagram size for UDP
    pub const MAX_PACKET_SIZE: usize = 1472; // MTU - IP/UDP headers

    /// Default UDP port for video streaming
    pub const DEFAULT_PORT: u16 = 9766;

    /// Default framerate of the encoded video
    pub const DEFAULT_FRAMERATE: u32 = 30;
}
