//! Multi-channel UDP sender
//!
//! Implements [`TransportClient`] over a single connected UDP socket.
//! Payloads are fragmented to MTU-sized datagrams with the header layout
//! from [`crate::protocol`]; the receiving side demuxes by channel and
//! reassembles by fragment index.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use bytes::BytesMut;

use crate::config::NetConfig;
use crate::constants::MAX_PACKET_SIZE;
use crate::error::NetworkError;
use crate::network::{udp::create_socket, TransportClient};
use crate::protocol::{self, Header, MAX_PAYLOAD_SIZE};

/// Sender statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct SenderStats {
    /// Payloads accepted for sending
    pub payloads_sent: u64,
    /// Datagrams put on the wire
    pub datagrams_sent: u64,
    /// Total bytes put on the wire, headers included
    pub bytes_sent: u64,
}

/// UDP transport multiplexing several channels on one socket
pub struct MultiChannelSender {
    socket: UdpSocket,
    channel_count: usize,
    /// Reused datagram build buffer
    scratch: BytesMut,
    stats: SenderStats,
}

impl MultiChannelSender {
    /// Get statistics
    pub fn stats(&self) -> SenderStats {
        self.stats
    }

    fn resolve(config: &NetConfig) -> Result<SocketAddr, NetworkError> {
        (config.ip.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| NetworkError::ConnectionFailed(e.to_string()))?
            .next()
            .ok_or_else(|| {
                NetworkError::ConnectionFailed(format!("no address for {}", config.ip))
            })
    }
}

impl TransportClient for MultiChannelSender {
    fn connect(config: &NetConfig, channel_count: usize) -> Result<Self, NetworkError> {
        if channel_count > u8::MAX as usize + 1 {
            return Err(NetworkError::InvalidConfig(format!(
                "{} channels exceed the wire format's {}",
                channel_count,
                u8::MAX as usize + 1
            )));
        }

        let target = Self::resolve(config)?;
        let socket = create_socket(target)?;
        tracing::debug!(%target, channel_count, "transport connected");

        Ok(Self {
            socket,
            channel_count,
            scratch: BytesMut::with_capacity(MAX_PACKET_SIZE),
            stats: SenderStats::default(),
        })
    }

    fn send(
        &mut self,
        channel: usize,
        sequence: u16,
        payload: &[u8],
    ) -> Result<(), NetworkError> {
        if channel >= self.channel_count {
            return Err(NetworkError::InvalidChannel(channel));
        }
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(NetworkError::PayloadTooLarge(payload.len()));
        }

        let fragment_count = protocol::fragments_for(payload.len()) as u16;
        for (fragment, chunk) in protocol::fragment(payload) {
            let header = Header {
                channel: channel as u8,
                sequence,
                fragment,
                fragment_count,
                len: chunk.len() as u16,
            };

            self.scratch.clear();
            header.encode(&mut self.scratch);
            self.scratch.extend_from_slice(chunk);

            self.socket
                .send(&self.scratch)
                .map_err(|e| NetworkError::SendFailed(e.to_string()))?;

            self.stats.datagrams_sent += 1;
            self.stats.bytes_sent += self.scratch.len() as u64;
        }

        self.stats.payloads_sent += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::MAX_FRAGMENT_PAYLOAD;
    use std::time::Duration;

    fn loopback_pair(channel_count: usize) -> (MultiChannelSender, UdpSocket) {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let addr = receiver.local_addr().unwrap();
        let config = NetConfig {
            ip: addr.ip().to_string(),
            port: addr.port(),
        };
        let sender = MultiChannelSender::connect(&config, channel_count).unwrap();
        (sender, receiver)
    }

    fn recv_datagram(receiver: &UdpSocket) -> Vec<u8> {
        let mut buf = vec![0u8; MAX_PACKET_SIZE];
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        buf.truncate(len);
        buf
    }

    #[test]
    fn test_single_datagram_payload() {
        let (mut sender, receiver) = loopback_pair(2);
        sender.send(1, 7, b"frame").unwrap();

        let datagram = recv_datagram(&receiver);
        let (header, body) = Header::parse(&datagram).unwrap();
        assert_eq!(header.channel, 1);
        assert_eq!(header.sequence, 7);
        assert_eq!(header.fragment_count, 1);
        assert_eq!(body, b"frame");
        assert_eq!(sender.stats().payloads_sent, 1);
        assert_eq!(sender.stats().datagrams_sent, 1);
    }

    #[test]
    fn test_zero_length_payload_reaches_wire() {
        let (mut sender, receiver) = loopback_pair(1);
        sender.send(0, 3, &[]).unwrap();

        let datagram = recv_datagram(&receiver);
        let (header, body) = Header::parse(&datagram).unwrap();
        assert_eq!(header.len, 0);
        assert!(body.is_empty());
    }

    #[test]
    fn test_fragmented_payload_reassembles() {
        let (mut sender, receiver) = loopback_pair(1);
        let payload: Vec<u8> = (0..MAX_FRAGMENT_PAYLOAD * 2 + 100)
            .map(|i| i as u8)
            .collect();
        sender.send(0, 42, &payload).unwrap();

        let mut reassembled = Vec::new();
        for expected in 0..3u16 {
            let datagram = recv_datagram(&receiver);
            let (header, body) = Header::parse(&datagram).unwrap();
            assert_eq!(header.fragment, expected);
            assert_eq!(header.fragment_count, 3);
            assert_eq!(header.sequence, 42);
            reassembled.extend_from_slice(body);
        }
        assert_eq!(reassembled, payload);
        assert_eq!(sender.stats().datagrams_sent, 3);
    }

    #[test]
    fn test_invalid_channel_rejected() {
        let (mut sender, _receiver) = loopback_pair(2);
        assert!(matches!(
            sender.send(2, 0, b"x"),
            Err(NetworkError::InvalidChannel(2))
        ));
    }

    #[test]
    fn test_channel_count_limit() {
        let config = NetConfig::default();
        assert!(matches!(
            MultiChannelSender::connect(&config, 300),
            Err(NetworkError::InvalidConfig(_))
        ));
    }
}
