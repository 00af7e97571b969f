use std::io;
use std::net::SocketAddr;
use std::time::Duration;

pub(crate) mod raw_socket;

/// The socket operations one probe needs. The seam keeps the session
/// testable against a scripted mock.
pub(crate) trait Socket: Send + Sync {
    fn send_to(&self, buf: &[u8], addr: &SocketAddr) -> io::Result<usize>;
    /// Bounds the next `recv` call. Re-armed before every wait.
    fn set_read_timeout(&self, timeout: Duration) -> io::Result<()>;
    /// Receives one raw IPv4 datagram, IP header included.
    fn recv(&self, buf: &mut [u8]) -> io::Result<usize>;
}
