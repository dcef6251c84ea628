use bytes::{BufMut, BytesMut};

/// Request packets of the launcher protocol.
#[derive(Debug, PartialEq, Eq)]
pub enum PacketType {
    /// Challenge a server for its full info response.
    LauncherChallenge,
}

impl PacketType {
    /// Wire bytes of the packet, already in send order.
    pub fn value(&self) -> &'static [u8] {
        match self {
            // Reads back as 777123 when taken as a little endian long.
            PacketType::LauncherChallenge => b"\xa3\xdb\x0b\x00",
        }
    }
}

/// Builds the request datagram for `packet`.
pub fn create_packet(packet: PacketType) -> BytesMut {
    let mut buf = BytesMut::with_capacity(4);
    buf.put(packet.value());
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{LittleEndian, ReadBytesExt};

    #[test]
    fn packet_creates() {
        let buf = create_packet(PacketType::LauncherChallenge);
        assert_eq!(&buf[..], b"\xa3\xdb\x0b\x00");

        let mut rdr = &buf[..];
        assert_eq!(rdr.read_u32::<LittleEndian>().unwrap(), 777_123);
    }
}
