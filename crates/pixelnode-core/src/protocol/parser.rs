use super::error::ProtocolError;
use super::layout;
use super::opcode::Opcode;
use super::reader::ArtNetReader;

/// One classified inbound datagram. Opcodes the node does not act upon are
/// kept as `Other`/`Unknown` so the dispatcher can name them in logs instead
/// of falling through an open-ended default branch.
#[derive(Debug)]
pub enum Packet<'a> {
    Poll(ArtPoll),
    Output(ArtDmx<'a>),
    Other(Opcode),
    Unknown(u16),
}

/// The "talk to me" flag set of ArtPoll.
///
/// The wire byte packs these LSB-first: bit 4 requests unicast diagnostics,
/// bit 5 requests diagnostics at all, bit 6 requests unsolicited replies on
/// node-condition changes. Remaining bits are unused and ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TalkToMe {
    pub unicast_diagnostics: bool,
    pub send_diagnostics: bool,
    pub reply_on_change: bool,
}

impl TalkToMe {
    pub fn from_byte(raw: u8) -> Self {
        Self {
            unicast_diagnostics: raw & (1 << 4) != 0,
            send_diagnostics: raw & (1 << 5) != 0,
            reply_on_change: raw & (1 << 6) != 0,
        }
    }

    pub fn to_byte(self) -> u8 {
        (self.unicast_diagnostics as u8) << 4
            | (self.send_diagnostics as u8) << 5
            | (self.reply_on_change as u8) << 6
    }
}

#[derive(Debug)]
pub struct ArtPoll {
    pub prot_ver_hi: u8,
    pub prot_ver_lo: u8,
    pub talk_to_me: TalkToMe,
    pub priority: u8,
}

/// ArtDmx with the channel slice already resolved against the datagram's
/// actual size. `declared_len` is kept so callers can spot senders that
/// mis-report length; `channels` is always within 2..=512 bytes.
#[derive(Debug)]
pub struct ArtDmx<'a> {
    pub sequence: Option<u8>,
    pub physical: u8,
    pub port_address: u16,
    pub declared_len: u16,
    pub channels: &'a [u8],
}

impl ArtDmx<'_> {
    /// True when the declared length was out of bounds and the received byte
    /// count was used instead.
    pub fn clamped(&self) -> bool {
        self.channels.len() != usize::from(self.declared_len)
    }
}

pub fn parse_packet(payload: &[u8]) -> Result<Packet<'_>, ProtocolError> {
    let reader = ArtNetReader::new(payload);
    reader.require_len(layout::MIN_PACKET_LEN)?;

    if reader.read_signature()? != layout::ARTNET_ID {
        return Err(ProtocolError::BadSignature);
    }

    let raw = reader.read_u16_le(layout::OP_CODE_RANGE.clone())?;
    match Opcode::from_u16(raw) {
        Some(Opcode::Poll) => Ok(Packet::Poll(parse_artpoll(payload)?)),
        Some(Opcode::Output) => Ok(Packet::Output(parse_artdmx(payload)?)),
        Some(other) => Ok(Packet::Other(other)),
        None => Ok(Packet::Unknown(raw)),
    }
}

pub fn parse_artpoll(payload: &[u8]) -> Result<ArtPoll, ProtocolError> {
    let reader = ArtNetReader::new(payload);
    reader.require_len(layout::POLL_LEN)?;

    Ok(ArtPoll {
        prot_ver_hi: reader.read_u8(layout::PROT_VER_HI_OFFSET)?,
        prot_ver_lo: reader.read_u8(layout::PROT_VER_LO_OFFSET)?,
        talk_to_me: TalkToMe::from_byte(reader.read_u8(layout::TALK_TO_ME_OFFSET)?),
        priority: reader.read_u8(layout::PRIORITY_OFFSET)?,
    })
}

pub fn parse_artdmx(payload: &[u8]) -> Result<ArtDmx<'_>, ProtocolError> {
    let reader = ArtNetReader::new(payload);
    reader.require_len(layout::DMX_MIN_LEN)?;

    let sequence = reader.read_optional_nonzero_u8(layout::SEQUENCE_OFFSET)?;
    let physical = reader.read_u8(layout::PHYSICAL_OFFSET)?;
    let sub_uni = reader.read_u8(layout::SUB_UNI_OFFSET)?;
    let net = reader.read_u8(layout::NET_OFFSET)?;
    let port_address = u16::from(net) << 8 | u16::from(sub_uni);

    // The declared length is untrustworthy metadata; when it falls outside
    // 2..=maxlength the received byte count wins and the packet is kept.
    let declared_len = reader.read_u16_be(layout::LENGTH_RANGE.clone())?;
    let max_len = layout::DMX_MAX_SLOTS.min(payload.len() - layout::DMX_DATA_OFFSET);
    let resolved = if (layout::DMX_MIN_SLOTS..=max_len).contains(&usize::from(declared_len)) {
        usize::from(declared_len)
    } else {
        max_len
    };
    let channels = reader.read_slice(layout::DMX_DATA_OFFSET..layout::DMX_DATA_OFFSET + resolved)?;

    Ok(ArtDmx {
        sequence,
        physical,
        port_address,
        declared_len,
        channels,
    })
}

#[cfg(test)]
mod tests {
    use super::{Packet, TalkToMe, parse_artdmx, parse_artpoll, parse_packet};
    use crate::protocol::layout;

    fn artdmx_frame(port_address: u16, declared_len: u16, data: &[u8]) -> Vec<u8> {
        let mut payload = vec![0u8; layout::DMX_DATA_OFFSET + data.len()];
        payload[..layout::ARTNET_ID.len()].copy_from_slice(layout::ARTNET_ID);
        payload[layout::OP_CODE_RANGE.clone()]
            .copy_from_slice(&layout::ARTDMX_OPCODE.to_le_bytes());
        payload[layout::SUB_UNI_OFFSET] = (port_address & 0xFF) as u8;
        payload[layout::NET_OFFSET] = (port_address >> 8) as u8;
        payload[layout::LENGTH_RANGE.clone()].copy_from_slice(&declared_len.to_be_bytes());
        payload[layout::DMX_DATA_OFFSET..].copy_from_slice(data);
        payload
    }

    #[test]
    fn parse_valid_artdmx() {
        let mut payload = artdmx_frame(0x0124, 4, &[1, 2, 3, 4]);
        payload[layout::SEQUENCE_OFFSET] = 0x12;
        payload[layout::PHYSICAL_OFFSET] = 1;

        let parsed = parse_artdmx(&payload).unwrap();
        assert_eq!(parsed.port_address, 0x0124);
        assert_eq!(parsed.sequence, Some(0x12));
        assert_eq!(parsed.physical, 1);
        assert_eq!(parsed.channels, &[1, 2, 3, 4]);
        assert!(!parsed.clamped());
    }

    #[test]
    fn parse_artdmx_clamps_oversized_declared_length() {
        let payload = artdmx_frame(0, 600, &[7u8; 512]);
        let parsed = parse_artdmx(&payload).unwrap();
        assert_eq!(parsed.declared_len, 600);
        assert_eq!(parsed.channels.len(), 512);
        assert!(parsed.clamped());
    }

    #[test]
    fn parse_artdmx_clamps_undersized_declared_length() {
        let payload = artdmx_frame(0, 1, &[7u8; 8]);
        let parsed = parse_artdmx(&payload).unwrap();
        assert_eq!(parsed.channels.len(), 8);
        assert!(parsed.clamped());
    }

    #[test]
    fn parse_artdmx_short_payload() {
        let payload = vec![0u8; layout::DMX_MIN_LEN - 1];
        let err = parse_artdmx(&payload).unwrap_err();
        assert!(err.to_string().contains("payload too short"));
    }

    #[test]
    fn parse_packet_rejects_bad_signature() {
        let mut payload = vec![0u8; layout::POLL_LEN];
        payload[..8].copy_from_slice(b"Art-Nut\0");
        let err = parse_packet(&payload).unwrap_err();
        assert!(err.to_string().contains("signature"));
    }

    #[test]
    fn parse_packet_classifies_unhandled_opcodes() {
        let mut payload = vec![0u8; layout::MIN_PACKET_LEN];
        payload[..8].copy_from_slice(layout::ARTNET_ID);
        payload[layout::OP_CODE_RANGE.clone()].copy_from_slice(&0x8300u16.to_le_bytes());
        assert!(matches!(
            parse_packet(&payload).unwrap(),
            Packet::Other(crate::protocol::Opcode::Rdm)
        ));

        payload[layout::OP_CODE_RANGE.clone()].copy_from_slice(&0x0042u16.to_le_bytes());
        assert!(matches!(parse_packet(&payload).unwrap(), Packet::Unknown(0x0042)));
    }

    #[test]
    fn parse_artpoll_flags() {
        let mut payload = vec![0u8; layout::POLL_LEN];
        payload[..8].copy_from_slice(layout::ARTNET_ID);
        payload[layout::OP_CODE_RANGE.clone()]
            .copy_from_slice(&layout::ARTPOLL_OPCODE.to_le_bytes());
        payload[layout::PROT_VER_LO_OFFSET] = 14;
        payload[layout::TALK_TO_ME_OFFSET] = 1 << 5 | 1 << 6;
        payload[layout::PRIORITY_OFFSET] = 0x10;

        let poll = parse_artpoll(&payload).unwrap();
        assert_eq!(poll.prot_ver_lo, 14);
        assert!(poll.talk_to_me.send_diagnostics);
        assert!(poll.talk_to_me.reply_on_change);
        assert!(!poll.talk_to_me.unicast_diagnostics);
        assert_eq!(poll.priority, 0x10);
    }

    #[test]
    fn talk_to_me_byte_roundtrip() {
        let flags = TalkToMe {
            unicast_diagnostics: true,
            send_diagnostics: true,
            reply_on_change: false,
        };
        assert_eq!(TalkToMe::from_byte(flags.to_byte()), flags);
        assert_eq!(flags.to_byte(), 0b0011_0000);
    }
}
