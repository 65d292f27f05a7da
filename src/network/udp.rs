//! UDP socket creation
//!
//! Builds the connected, send-tuned socket the multi-channel sender
//! writes to. socket2 is used for the knobs std does not expose.

use std::net::{SocketAddr, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};

use crate::error::NetworkError;

/// Kernel send buffer size; sized for a few uncompressed frames of burst
const SEND_BUFFER_SIZE: usize = 1 << 20;

/// Create a UDP socket connected to `target`
pub fn create_socket(target: SocketAddr) -> Result<UdpSocket, NetworkError> {
    let socket = Socket::new(Domain::for_address(target), Type::DGRAM, Some(Protocol::UDP))
        .map_err(|e| NetworkError::BindFailed(e.to_string()))?;

    socket
        .set_send_buffer_size(SEND_BUFFER_SIZE)
        .map_err(|e| NetworkError::BindFailed(e.to_string()))?;

    let local: SocketAddr = if target.is_ipv4() {
        "0.0.0.0:0".parse().unwrap()
    } else {
        "[::]:0".parse().unwrap()
    };
    socket
        .bind(&local.into())
        .map_err(|e| NetworkError::BindFailed(e.to_string()))?;

    socket
        .connect(&target.into())
        .map_err(|e| NetworkError::ConnectionFailed(e.to_string()))?;

    Ok(socket.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_socket_loopback() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let socket = create_socket(receiver.local_addr().unwrap()).unwrap();
        socket.send(b"ping").unwrap();

        let mut buf = [0u8; 16];
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"ping");
    }
}
