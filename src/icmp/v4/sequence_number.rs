/// Sequence number carried in an echo request and echoed back in the reply.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct SequenceNumber(pub u16);

impl SequenceNumber {
    // ICMPv4 sequence numbers conventionally start from 1.
    pub const START: SequenceNumber = SequenceNumber(1);
}

impl From<u16> for SequenceNumber {
    fn from(value: u16) -> Self {
        SequenceNumber(value)
    }
}

impl From<SequenceNumber> for u16 {
    fn from(value: SequenceNumber) -> Self {
        value.0
    }
}
