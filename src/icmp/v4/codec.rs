use std::net::Ipv4Addr;

use pnet_packet::icmp::echo_reply::EchoReplyPacket;
use pnet_packet::icmp::{IcmpCode, IcmpType, IcmpTypes};
use pnet_packet::ip::IpNextHeaderProtocols;
use pnet_packet::ipv4::Ipv4Packet;

use super::checksum::internet_checksum;
use super::{SequenceNumber, Ttl};

const PAYLOAD_SIZE: usize = 56;
pub(crate) const ICMP_HEADER_SIZE: usize = 8;
pub(crate) const ECHO_REQUEST_SIZE: usize = ICMP_HEADER_SIZE + PAYLOAD_SIZE;

const IPV4_HEADER_MIN_SIZE: usize = 20;
const IPV4_HEADER_MAX_SIZE: usize = 60;

/// Builds one echo request: type 8, code 0, the given identifier and
/// sequence number, zeroed payload. Deterministic given its inputs.
pub(crate) fn build_echo_request(
    identifier: u16,
    sequence: SequenceNumber,
) -> [u8; ECHO_REQUEST_SIZE] {
    let mut packet = [0u8; ECHO_REQUEST_SIZE];
    packet[0] = IcmpTypes::EchoRequest.0;
    packet[4..6].copy_from_slice(&identifier.to_be_bytes());
    packet[6..8].copy_from_slice(&u16::from(sequence).to_be_bytes());
    // The checksum is computed with its own field zeroed, then written back.
    let sum = internet_checksum(&packet);
    packet[2..4].copy_from_slice(&sum.to_be_bytes());
    packet
}

/// A received datagram decoded as far as reply matching needs.
#[derive(Debug)]
pub(crate) struct ParsedReply {
    pub(crate) icmp_type: IcmpType,
    pub(crate) icmp_code: IcmpCode,
    pub(crate) identifier: u16,
    pub(crate) sequence: SequenceNumber,
    pub(crate) source: Ipv4Addr,
    pub(crate) ttl: Ttl,
}

/// Why a received datagram cannot be an echo reply. A rejection is not an
/// error: the caller keeps waiting for the next datagram.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Reject {
    ShortPacket,
    BadIpHeaderLength,
    WrongIpVersion,
    NotIcmp,
}

/// Validates one raw IPv4 datagram and extracts the ICMP echo fields.
///
/// `datagram` is exactly the bytes one `recv` produced. A RAW socket hands
/// over the IP header as well, so the header length, version and protocol
/// are checked before anything behind them is trusted.
pub(crate) fn parse_reply(datagram: &[u8]) -> Result<ParsedReply, Reject> {
    let ip_packet = Ipv4Packet::new(datagram).ok_or(Reject::ShortPacket)?;
    let header_size = usize::from(ip_packet.get_header_length()) * 4;
    if !(IPV4_HEADER_MIN_SIZE..=IPV4_HEADER_MAX_SIZE).contains(&header_size) {
        return Err(Reject::BadIpHeaderLength);
    }
    if ip_packet.get_version() != 4 {
        return Err(Reject::WrongIpVersion);
    }
    if ip_packet.get_next_level_protocol() != IpNextHeaderProtocols::Icmp {
        return Err(Reject::NotIcmp);
    }
    if datagram.len() < header_size + ICMP_HEADER_SIZE {
        return Err(Reject::ShortPacket);
    }
    let reply = EchoReplyPacket::new(&datagram[header_size..]).ok_or(Reject::ShortPacket)?;
    Ok(ParsedReply {
        icmp_type: reply.get_icmp_type(),
        icmp_code: reply.get_icmp_code(),
        identifier: reply.get_identifier(),
        sequence: reply.get_sequence_number().into(),
        source: ip_packet.get_source(),
        ttl: ip_packet.get_ttl().into(),
    })
}
