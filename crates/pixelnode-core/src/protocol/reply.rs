use std::net::Ipv4Addr;

use super::layout;

/// Firmware version advertised in every reply.
pub const FIRMWARE_VERSION_HI: u8 = 5;
pub const FIRMWARE_VERSION_LO: u8 = 57;

/// ESTA manufacturer code, low byte then high byte on the wire.
pub const ESTA_MAN_LO: u8 = b'L';
pub const ESTA_MAN_HI: u8 = b'O';

/// Style code for a DMX to/from Art-Net device.
pub const STYLE_NODE: u8 = 0x00;

/// Port data type for DMX512.
pub const DATA_TYPE_DMX512: u8 = 0;

/// Status1 byte, packed LSB-first: indicator state in bits 0-1, port-address
/// programming authority in bits 2-3, booted-from-ROM bit 5, RDM capability
/// bit 6, UBEA presence bit 7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status1 {
    pub indicator_state: u8,
    pub port_address_authority: u8,
    pub booted_from_rom: bool,
    pub rdm_capable: bool,
    pub ubea_present: bool,
}

impl Status1 {
    pub fn to_byte(self) -> u8 {
        (self.indicator_state & 0x03)
            | (self.port_address_authority & 0x03) << 2
            | (self.booted_from_rom as u8) << 5
            | (self.rdm_capable as u8) << 6
            | (self.ubea_present as u8) << 7
    }
}

/// Status2 byte, packed LSB-first from bit 4: 15-bit port-address support,
/// DHCP capability, DHCP-configured, web-browser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status2 {
    pub supports_15bit_port_address: bool,
    pub dhcp_capable: bool,
    pub dhcp_configured: bool,
    pub web_configurable: bool,
}

impl Status2 {
    pub fn to_byte(self) -> u8 {
        (self.supports_15bit_port_address as u8) << 4
            | (self.dhcp_capable as u8) << 5
            | (self.dhcp_configured as u8) << 6
            | (self.web_configurable as u8) << 7
    }
}

/// Port-type byte: output capability bit 0, input capability bit 1, data
/// type in bits 2-7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortType {
    pub can_output: bool,
    pub can_input: bool,
    pub data_type: u8,
}

impl PortType {
    pub fn dmx_output() -> Self {
        Self {
            can_output: true,
            can_input: false,
            data_type: DATA_TYPE_DMX512,
        }
    }

    pub fn to_byte(self) -> u8 {
        (self.can_output as u8) | (self.can_input as u8) << 1 | (self.data_type & 0x3F) << 2
    }

    pub fn from_byte(raw: u8) -> Self {
        Self {
            can_output: raw & 0x01 != 0,
            can_input: raw & 0x02 != 0,
            data_type: raw >> 2,
        }
    }
}

/// The node identity/capability record answered to discovery.
///
/// `encode` is deterministic: the buffer is zero-initialised, so two calls
/// with identical state produce byte-identical records and the unspecified
/// capability fields all read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReply {
    pub ip: Ipv4Addr,
    pub mac: [u8; 6],
    pub port_address: u16,
    pub short_name: &'static str,
    pub long_name: &'static str,
    pub output_ports: u8,
    pub dhcp: bool,
}

impl PollReply {
    pub fn encode(&self) -> [u8; layout::REPLY_LEN] {
        let mut buf = [0u8; layout::REPLY_LEN];

        buf[layout::REPLY_ID_RANGE].copy_from_slice(layout::ARTNET_ID);
        buf[layout::REPLY_OP_CODE_RANGE]
            .copy_from_slice(&layout::ARTPOLLREPLY_OPCODE.to_le_bytes());
        buf[layout::REPLY_IP_RANGE].copy_from_slice(&self.ip.octets());
        buf[layout::REPLY_PORT_RANGE].copy_from_slice(&layout::ARTNET_PORT.to_le_bytes());
        buf[layout::REPLY_VERS_HI_OFFSET] = FIRMWARE_VERSION_HI;
        buf[layout::REPLY_VERS_LO_OFFSET] = FIRMWARE_VERSION_LO;
        buf[layout::REPLY_NET_SWITCH_OFFSET] = ((self.port_address & 0x7F00) >> 8) as u8;
        buf[layout::REPLY_SUB_SWITCH_OFFSET] = ((self.port_address & 0x00F0) >> 4) as u8;
        buf[layout::REPLY_STATUS1_OFFSET] = Status1::default().to_byte();
        buf[layout::REPLY_ESTA_MAN_LO_OFFSET] = ESTA_MAN_LO;
        buf[layout::REPLY_ESTA_MAN_HI_OFFSET] = ESTA_MAN_HI;

        write_name(&mut buf[layout::REPLY_SHORT_NAME_RANGE], self.short_name);
        write_name(&mut buf[layout::REPLY_LONG_NAME_RANGE], self.long_name);

        buf[layout::REPLY_NUM_PORTS_LO_OFFSET] = self.output_ports;
        let port_types = &mut buf[layout::REPLY_PORT_TYPES_RANGE];
        for slot in port_types
            .iter_mut()
            .take(usize::from(self.output_ports).min(layout::REPLY_MAX_PORTS))
        {
            *slot = PortType::dmx_output().to_byte();
        }

        // Only the second switch-out slot carries the universe nibble; the
        // first output port stays on universe 0 of the node's sub-net.
        buf[layout::REPLY_SW_OUT_RANGE][1] = (self.port_address & 0x0F) as u8;

        buf[layout::REPLY_STYLE_OFFSET] = STYLE_NODE;
        buf[layout::REPLY_MAC_RANGE].copy_from_slice(&self.mac);
        buf[layout::REPLY_BIND_IP_RANGE].copy_from_slice(&self.ip.octets());
        buf[layout::REPLY_STATUS2_OFFSET] = Status2 {
            supports_15bit_port_address: true,
            dhcp_capable: self.dhcp,
            dhcp_configured: self.dhcp,
            web_configurable: false,
        }
        .to_byte();

        buf
    }
}

/// Copy a configured name into a fixed NUL-terminated field, truncating
/// over-long input so the terminator is never overwritten.
fn write_name(field: &mut [u8], name: &str) {
    let len = name.len().min(field.len() - 1);
    field[..len].copy_from_slice(&name.as_bytes()[..len]);
}
