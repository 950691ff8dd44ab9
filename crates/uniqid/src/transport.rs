//! The datagram capability the requester talks through.
//!
//! [`Transport`] is implemented for [`std::net::UdpSocket`]; tests plug in
//! scripted transports instead.

use core::time::Duration;
use std::io;
use std::net::{SocketAddr, UdpSocket};

/// A datagram socket as seen by the requester.
///
/// Implementations need not be thread-safe for concurrent send/receive: the
/// client holds an exclusive lock on its transport for the whole of each
/// attempt.
pub trait Transport {
    /// Sends one datagram to `addr`, returning the number of bytes written.
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> io::Result<usize>;

    /// Waits up to `timeout` for one datagram.
    ///
    /// A timeout is reported as an error of kind
    /// [`io::ErrorKind::WouldBlock`] or [`io::ErrorKind::TimedOut`].
    fn recv_from_timeout(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> io::Result<(usize, SocketAddr)>;
}

impl Transport for UdpSocket {
    fn send_to(&mut self, buf: &[u8], addr: SocketAddr) -> io::Result<usize> {
        UdpSocket::send_to(self, buf, addr)
    }

    fn recv_from_timeout(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> io::Result<(usize, SocketAddr)> {
        self.set_read_timeout(Some(timeout))?;
        self.recv_from(buf)
    }
}

/// Binds an unconnected IPv4 UDP socket on an ephemeral port.
pub fn bind_ephemeral() -> io::Result<UdpSocket> {
    UdpSocket::bind(("0.0.0.0", 0))
}
