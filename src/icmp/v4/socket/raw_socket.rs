use std::io;
use std::mem::MaybeUninit;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use socket2::{Domain, Protocol, Type};

use super::Socket;

// Large enough to ride out bursts of unrelated ICMP traffic.
const RECV_BUFFER_SIZE: usize = 256 * 1024;

pub(crate) struct RawSocket {
    socket: socket2::Socket,
}

impl RawSocket {
    /// Opens a raw ICMPv4 socket and connects it to `target`, so the kernel
    /// already drops datagrams arriving from other sources. Raw sockets
    /// require the cap_net_raw capability or root privileges.
    pub(crate) fn connected(target: Ipv4Addr) -> io::Result<RawSocket> {
        tracing::trace!("creating raw icmpv4 socket connected to {}", target);
        let socket = socket2::Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
        socket.connect(&SocketAddr::new(IpAddr::V4(target), 0).into())?;
        if let Err(error) = socket.set_recv_buffer_size(RECV_BUFFER_SIZE) {
            // Best effort, the reply usually fits the default buffer.
            tracing::warn!("could not grow the receive buffer: {}", error);
        }
        Ok(RawSocket { socket })
    }
}

impl Socket for RawSocket {
    fn send_to(&self, buf: &[u8], addr: &SocketAddr) -> io::Result<usize> {
        self.socket.send_to(buf, &(*addr).into())
    }

    fn set_read_timeout(&self, timeout: Duration) -> io::Result<()> {
        self.socket.set_read_timeout(Some(timeout))
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        // Socket2 gives a safety guaranty which allows us to do an unsafe cast
        // from `&mut [u8]` to `&mut [MaybeUninit<u8>]`: recv only ever writes
        // initialized bytes into the buffer.
        // https://docs.rs/socket2/0.4.7/socket2/struct.Socket.html#method.recv
        self.socket
            .recv(unsafe { &mut *(buf as *mut [u8] as *mut [MaybeUninit<u8>]) })
    }
}
