use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use pnet_packet::icmp::{IcmpCode, IcmpTypes};

use crate::deadline::{Deadline, Remaining};
use crate::error::{ProbeError, ProbeResult};
use crate::icmp::v4::{
    build_echo_request, parse_reply, ParsedReply, RawSocket, SequenceNumber, Socket, Ttl,
};

// A raw socket hands over whole IP datagrams. Unrelated traffic may be
// larger than our reply; truncating a datagram we discard anyway is fine.
const RECV_BUF_SIZE: usize = 1024;

/// Everything one probe needs to know.
#[derive(Clone, Copy, Debug)]
pub struct ProbeConfig {
    pub target: Ipv4Addr,
    /// Matched against the reply. Callers derive it from a process-scoped
    /// value, e.g. `process::id() & 0xffff`.
    pub identifier: u16,
    pub sequence: SequenceNumber,
    pub timeout: Duration,
}

/// The measurement taken from one matched reply.
#[derive(Clone, Copy, Debug)]
pub struct ProbeReport {
    pub rtt: Duration,
    pub ttl: Ttl,
}

/// Sends one echo request to the configured target and waits for the
/// matching reply.
///
/// # Errors
///
/// Returns `SocketCreateFailed` when the raw socket cannot be opened or
/// connected (usually missing privileges), `TimedOut` when no matching reply
/// arrives within the configured timeout, and the send/wait/receive error
/// kinds when the corresponding socket operation fails.
pub fn probe(config: &ProbeConfig) -> ProbeResult<ProbeReport> {
    let socket = RawSocket::connected(config.target)
        .map_err(|source| ProbeError::SocketCreateFailed { source })?;
    ProbeSession::new(socket, config).run()
}

/// One echo request, then a bounded wait for the matching reply.
///
/// Runs sent -> waiting -> matched | timed-out | failed on the calling
/// thread. The session owns its socket; every exit path releases it.
pub(crate) struct ProbeSession<S> {
    socket: S,
    config: ProbeConfig,
}

impl<S: Socket> ProbeSession<S> {
    pub(crate) fn new(socket: S, config: &ProbeConfig) -> Self {
        ProbeSession {
            socket,
            config: *config,
        }
    }

    pub(crate) fn run(self) -> ProbeResult<ProbeReport> {
        let request = build_echo_request(self.config.identifier, self.config.sequence);
        let addr = SocketAddr::new(IpAddr::V4(self.config.target), 0);

        let start = Instant::now();
        self.socket
            .send_to(&request, &addr)
            .map_err(|source| ProbeError::SendFailed { source })?;
        tracing::trace!("echo request sent to {}", addr.ip());

        // The deadline is fixed here. Every wait below is re-armed with what
        // is left of it, so foreign traffic cannot stretch the total budget.
        let deadline = Deadline::starting_at(start, self.config.timeout);
        let mut buf = [0u8; RECV_BUF_SIZE];
        loop {
            let budget = match deadline.remaining(Instant::now()) {
                Remaining::Expired => return Err(ProbeError::TimedOut),
                Remaining::Time(budget) => budget,
            };
            self.socket
                .set_read_timeout(budget)
                .map_err(|source| ProbeError::WaitFailed { source })?;

            let received = match self.socket.recv(&mut buf) {
                Ok(received) => received,
                // An empty wait or an interrupted one is not a failure; the
                // deadline check at the top of the loop decides.
                Err(error) if is_wait_expiry(&error) => continue,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(ProbeError::ReceiveFailed { source }),
            };

            match parse_reply(&buf[..received]) {
                Ok(reply) if self.matches(&reply) => {
                    let rtt = start.elapsed();
                    tracing::trace!("matching echo reply from {} after {:?}", reply.source, rtt);
                    return Ok(ProbeReport {
                        rtt,
                        ttl: reply.ttl,
                    });
                }
                Ok(reply) => {
                    tracing::trace!("discarding unrelated icmp datagram from {}", reply.source);
                }
                Err(reject) => {
                    tracing::trace!("discarding datagram: {:?}", reject);
                }
            }
        }
    }

    fn matches(&self, reply: &ParsedReply) -> bool {
        reply.icmp_type == IcmpTypes::EchoReply
            && reply.icmp_code == IcmpCode::new(0)
            && reply.identifier == self.config.identifier
            && reply.sequence == self.config.sequence
            && reply.source == self.config.target
    }
}

fn is_wait_expiry(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
