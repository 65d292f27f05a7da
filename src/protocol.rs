//! Wire protocol for the bundled UDP transport
//!
//! Each payload travels as one or more datagrams of
//! `[Channel|Seq|Fragment|FragmentCount|Len|Data]`. Payloads larger than
//! one MTU-sized datagram are split into fragments sharing the same
//! (channel, sequence) pair; the receiving side reassembles by fragment
//! index. A zero-length payload is a single header-only datagram; it
//! carries the "nothing this tick" marker and must reach the wire.

use bytes::{Buf, BufMut, BytesMut};

use crate::constants::MAX_PACKET_SIZE;
use crate::error::NetworkError;

/// Size of the datagram header in bytes
pub const HEADER_LEN: usize = 9;

/// Maximum payload bytes carried by a single datagram
pub const MAX_FRAGMENT_PAYLOAD: usize = MAX_PACKET_SIZE - HEADER_LEN;

/// Maximum total payload size a single send may carry
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAGMENT_PAYLOAD * u16::MAX as usize;

/// Datagram header, big-endian on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Multiplexed channel index
    pub channel: u8,
    /// Caller-supplied sequence number for this payload
    pub sequence: u16,
    /// Fragment index within the payload
    pub fragment: u16,
    /// Total fragments in the payload
    pub fragment_count: u16,
    /// Payload bytes in this fragment
    pub len: u16,
}

impl Header {
    /// Append the encoded header to `buf`
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.channel);
        buf.put_u16(self.sequence);
        buf.put_u16(self.fragment);
        buf.put_u16(self.fragment_count);
        buf.put_u16(self.len);
    }

    /// Split a datagram into its header and payload bytes
    pub fn parse(datagram: &[u8]) -> Result<(Header, &[u8]), NetworkError> {
        if datagram.len() < HEADER_LEN {
            return Err(NetworkError::InvalidConfig(format!(
                "datagram too short: {} bytes",
                datagram.len()
            )));
        }
        let mut head = &datagram[..HEADER_LEN];
        let header = Header {
            channel: head.get_u8(),
            sequence: head.get_u16(),
            fragment: head.get_u16(),
            fragment_count: head.get_u16(),
            len: head.get_u16(),
        };
        let body = &datagram[HEADER_LEN..];
        if body.len() != header.len as usize {
            return Err(NetworkError::InvalidConfig(format!(
                "datagram body {} bytes, header says {}",
                body.len(),
                header.len
            )));
        }
        Ok((header, body))
    }
}

/// Number of datagrams needed for a payload of `len` bytes
///
/// A zero-length payload still takes one datagram.
pub fn fragments_for(len: usize) -> usize {
    len.div_ceil(MAX_FRAGMENT_PAYLOAD).max(1)
}

/// Iterate the fragments of a payload as (fragment index, bytes) pairs
pub fn fragment(payload: &[u8]) -> impl Iterator<Item = (u16, &[u8])> {
    let empty: &[u8] = &[];
    let chunks: Vec<&[u8]> = if payload.is_empty() {
        vec![empty]
    } else {
        payload.chunks(MAX_FRAGMENT_PAYLOAD).collect()
    };
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| (i as u16, chunk))
}
