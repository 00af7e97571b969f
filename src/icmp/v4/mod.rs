pub(crate) mod checksum;
pub(crate) mod codec;
mod sequence_number;
pub(crate) mod socket;
mod ttl;

pub(crate) use codec::{build_echo_request, parse_reply, ParsedReply, ECHO_REQUEST_SIZE};
pub(crate) use socket::raw_socket::RawSocket;
pub(crate) use socket::Socket;

pub use sequence_number::SequenceNumber;
pub use ttl::Ttl;
