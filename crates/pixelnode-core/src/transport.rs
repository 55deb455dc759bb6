use std::net::Ipv4Addr;

/// One inbound UDP datagram as handed over by the transport collaborator.
///
/// The destination port matters: polls that arrive on the canonical Art-Net
/// port are debounced, polls on any other port are answered immediately.
#[derive(Debug, Clone, Copy)]
pub struct Datagram<'a> {
    pub source: Ipv4Addr,
    pub dest_port: u16,
    pub data: &'a [u8],
}

/// Network identity owned by the transport collaborator; the node only
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIdentity {
    pub ip: Ipv4Addr,
    pub mac: [u8; 6],
    /// Whether the address came from DHCP; advertised in Status2.
    pub dhcp_assigned: bool,
}

/// Send path of the transport collaborator.
///
/// Transmission is fire-and-forget from the node's point of view; transport
/// faults stay inside the implementation (log and drop).
pub trait Transport {
    fn transmit(&mut self, data: &[u8], source_port: u16, dest: Ipv4Addr, dest_port: u16);
}

/// Downstream pixel/strip output. Receives at most 512 channel values per
/// call, already validated and resolved against the datagram size.
pub trait DmxSink {
    fn on_channel_data(&mut self, channels: &[u8]);
}
