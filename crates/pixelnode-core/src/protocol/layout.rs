pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";

pub const ARTNET_PORT: u16 = 6454;
/// Unicast discovery replies go out from/to the canonical port minus one.
pub const ARTNET_UNICAST_PORT: u16 = ARTNET_PORT - 1;

pub const OP_CODE_RANGE: std::ops::Range<usize> = 8..10;
/// Shortest datagram that can carry the signature and an opcode.
pub const MIN_PACKET_LEN: usize = 10;

pub const PROT_VER_HI_OFFSET: usize = 10;
pub const PROT_VER_LO_OFFSET: usize = 11;

pub const ARTPOLL_OPCODE: u16 = 0x2000;
pub const ARTPOLLREPLY_OPCODE: u16 = 0x2100;
pub const ARTDMX_OPCODE: u16 = 0x5000;

// ArtPoll
pub const TALK_TO_ME_OFFSET: usize = 12;
pub const PRIORITY_OFFSET: usize = 13;
pub const POLL_LEN: usize = 14;

// ArtDmx
pub const SEQUENCE_OFFSET: usize = 12;
pub const PHYSICAL_OFFSET: usize = 13;
pub const SUB_UNI_OFFSET: usize = 14;
pub const NET_OFFSET: usize = 15;
pub const LENGTH_RANGE: std::ops::Range<usize> = 16..18;
pub const DMX_DATA_OFFSET: usize = 18;
pub const DMX_MIN_SLOTS: usize = 2;
pub const DMX_MAX_SLOTS: usize = 512;
pub const DMX_MIN_LEN: usize = DMX_DATA_OFFSET + DMX_MIN_SLOTS;

// ArtPollReply record
pub const REPLY_ID_RANGE: std::ops::Range<usize> = 0..8;
pub const REPLY_OP_CODE_RANGE: std::ops::Range<usize> = 8..10;
pub const REPLY_IP_RANGE: std::ops::Range<usize> = 10..14;
pub const REPLY_PORT_RANGE: std::ops::Range<usize> = 14..16;
pub const REPLY_VERS_HI_OFFSET: usize = 16;
pub const REPLY_VERS_LO_OFFSET: usize = 17;
pub const REPLY_NET_SWITCH_OFFSET: usize = 18;
pub const REPLY_SUB_SWITCH_OFFSET: usize = 19;
pub const REPLY_OEM_HI_OFFSET: usize = 20;
pub const REPLY_OEM_LO_OFFSET: usize = 21;
pub const REPLY_UBEA_OFFSET: usize = 22;
pub const REPLY_STATUS1_OFFSET: usize = 23;
pub const REPLY_ESTA_MAN_LO_OFFSET: usize = 24;
pub const REPLY_ESTA_MAN_HI_OFFSET: usize = 25;
pub const REPLY_SHORT_NAME_RANGE: std::ops::Range<usize> = 26..44;
pub const REPLY_LONG_NAME_RANGE: std::ops::Range<usize> = 44..108;
pub const REPLY_NODE_REPORT_RANGE: std::ops::Range<usize> = 108..172;
pub const REPLY_NUM_PORTS_HI_OFFSET: usize = 172;
pub const REPLY_NUM_PORTS_LO_OFFSET: usize = 173;
pub const REPLY_PORT_TYPES_RANGE: std::ops::Range<usize> = 174..178;
pub const REPLY_GOOD_INPUT_RANGE: std::ops::Range<usize> = 178..182;
pub const REPLY_GOOD_OUTPUT_RANGE: std::ops::Range<usize> = 182..186;
pub const REPLY_SW_IN_RANGE: std::ops::Range<usize> = 186..190;
pub const REPLY_SW_OUT_RANGE: std::ops::Range<usize> = 190..194;
pub const REPLY_SW_VIDEO_OFFSET: usize = 194;
pub const REPLY_SW_MACRO_OFFSET: usize = 195;
pub const REPLY_SW_REMOTE_OFFSET: usize = 196;
pub const REPLY_SPARE_RANGE: std::ops::Range<usize> = 197..200;
pub const REPLY_STYLE_OFFSET: usize = 200;
pub const REPLY_MAC_RANGE: std::ops::Range<usize> = 201..207;
pub const REPLY_BIND_IP_RANGE: std::ops::Range<usize> = 207..211;
pub const REPLY_BIND_INDEX_OFFSET: usize = 211;
pub const REPLY_STATUS2_OFFSET: usize = 212;
pub const REPLY_FILLER_RANGE: std::ops::Range<usize> = 213..239;
pub const REPLY_LEN: usize = 239;

/// Reply slots for port types, good input/output and switch arrays.
pub const REPLY_MAX_PORTS: usize = 4;
