/// Every opcode the protocol defines. The node only acts on `Poll` and
/// `Output`; the rest are decoded so inbound traffic can be named in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Opcode {
    Poll = 0x2000,
    PollReply = 0x2100,
    DiagData = 0x2300,
    Command = 0x2400,
    Output = 0x5000,
    Nzs = 0x5100,
    Address = 0x6000,
    Input = 0x7000,
    TodRequest = 0x8000,
    TodData = 0x8100,
    TodControl = 0x8200,
    Rdm = 0x8300,
    RdmSub = 0x8400,
    Media = 0x9000,
    MediaPatch = 0x9100,
    MediaControl = 0x9200,
    MediaControlReply = 0x9300,
    TimeCode = 0x9700,
    TimeSync = 0x9800,
    Trigger = 0x9900,
    Directory = 0x9a00,
    DirectoryReply = 0x9b00,
    VideoSetup = 0xa010,
    VideoPalette = 0xa020,
    VideoData = 0xa040,
    MacMaster = 0xf000,
    MacSlave = 0xf100,
    FirmwareMaster = 0xf200,
    FirmwareReply = 0xf300,
    FileTnMaster = 0xf400,
    FileFnMaster = 0xf500,
    FileFnReply = 0xf600,
    IpProg = 0xf800,
    IpProgReply = 0xf900,
}

impl Opcode {
    pub fn from_u16(raw: u16) -> Option<Opcode> {
        match raw {
            0x2000 => Some(Opcode::Poll),
            0x2100 => Some(Opcode::PollReply),
            0x2300 => Some(Opcode::DiagData),
            0x2400 => Some(Opcode::Command),
            0x5000 => Some(Opcode::Output),
            0x5100 => Some(Opcode::Nzs),
            0x6000 => Some(Opcode::Address),
            0x7000 => Some(Opcode::Input),
            0x8000 => Some(Opcode::TodRequest),
            0x8100 => Some(Opcode::TodData),
            0x8200 => Some(Opcode::TodControl),
            0x8300 => Some(Opcode::Rdm),
            0x8400 => Some(Opcode::RdmSub),
            0x9000 => Some(Opcode::Media),
            0x9100 => Some(Opcode::MediaPatch),
            0x9200 => Some(Opcode::MediaControl),
            0x9300 => Some(Opcode::MediaControlReply),
            0x9700 => Some(Opcode::TimeCode),
            0x9800 => Some(Opcode::TimeSync),
            0x9900 => Some(Opcode::Trigger),
            0x9a00 => Some(Opcode::Directory),
            0x9b00 => Some(Opcode::DirectoryReply),
            0xa010 => Some(Opcode::VideoSetup),
            0xa020 => Some(Opcode::VideoPalette),
            0xa040 => Some(Opcode::VideoData),
            0xf000 => Some(Opcode::MacMaster),
            0xf100 => Some(Opcode::MacSlave),
            0xf200 => Some(Opcode::FirmwareMaster),
            0xf300 => Some(Opcode::FirmwareReply),
            0xf400 => Some(Opcode::FileTnMaster),
            0xf500 => Some(Opcode::FileFnMaster),
            0xf600 => Some(Opcode::FileFnReply),
            0xf800 => Some(Opcode::IpProg),
            0xf900 => Some(Opcode::IpProgReply),
            _ => None,
        }
    }

    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// Diagnostic priority codes carried in ArtPoll, decoded for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityCode {
    Low,
    Med,
    High,
    Critical,
    Volatile,
}

impl PriorityCode {
    pub fn from_u8(raw: u8) -> Option<PriorityCode> {
        match raw {
            0x10 => Some(PriorityCode::Low),
            0x40 => Some(PriorityCode::Med),
            0x80 => Some(PriorityCode::High),
            0xe0 => Some(PriorityCode::Critical),
            0xff => Some(PriorityCode::Volatile),
            _ => None,
        }
    }
}
