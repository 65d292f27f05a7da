//! Network subsystem for UDP video transport

pub mod sender;
pub mod udp;

pub use sender::{MultiChannelSender, SenderStats};
pub use udp::create_socket;

use crate::config::NetConfig;
use crate::error::NetworkError;

/// One outbound connection multiplexing several channels
///
/// The transport owns the wire format and the connection; the coordinator
/// only hands it payloads tagged with a channel index and the caller's
/// sequence number. The total channel count is fixed at connect time
/// because all channels interleave on one connection. Connections close
/// when the client is dropped.
pub trait TransportClient {
    /// Connect to the destination, announcing the total channel count
    fn connect(config: &NetConfig, channel_count: usize) -> std::result::Result<Self, NetworkError>
    where
        Self: Sized;

    /// Send one payload on a channel
    ///
    /// A zero-length payload is valid and must reach the receiver; it
    /// marks a channel with nothing to say for this sequence slot.
    fn send(
        &mut self,
        channel: usize,
        sequence: u16,
        payload: &[u8],
    ) -> std::result::Result<(), NetworkError>;
}
