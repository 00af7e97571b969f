/// Internet checksum (RFC 1071) over `data`.
///
/// Sums the buffer as big-endian 16-bit words, treating an odd trailing byte
/// as the high byte of a zero-padded word, folds the carries back into the
/// low 16 bits and returns the one's complement.
pub(crate) fn internet_checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let mut words = data.chunks_exact(2);
    for word in words.by_ref() {
        sum += u32::from(u16::from_be_bytes([word[0], word[1]]));
    }
    if let Some(&last) = words.remainder().first() {
        sum += u32::from(last) << 8;
    }
    sum = (sum & 0xFFFF) + (sum >> 16);
    sum += sum >> 16;
    !(sum as u16)
}
