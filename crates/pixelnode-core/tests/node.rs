use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use pixelnode_core::protocol::layout;
use pixelnode_core::{Datagram, DmxSink, Node, NodeConfig, NodeIdentity, Transport};

#[derive(Default)]
struct RecordingTransport {
    sent: Vec<(Vec<u8>, u16, Ipv4Addr, u16)>,
}

impl Transport for RecordingTransport {
    fn transmit(&mut self, data: &[u8], source_port: u16, dest: Ipv4Addr, dest_port: u16) {
        self.sent.push((data.to_vec(), source_port, dest, dest_port));
    }
}

#[derive(Default)]
struct RecordingSink {
    frames: Vec<Vec<u8>>,
}

impl DmxSink for RecordingSink {
    fn on_channel_data(&mut self, channels: &[u8]) {
        self.frames.push(channels.to_vec());
    }
}

fn node() -> Node {
    let identity = NodeIdentity {
        ip: Ipv4Addr::new(10, 0, 1, 37),
        mac: [0x70, 0x69, 0x69, 0x2d, 0x30, 0x31],
        dhcp_assigned: true,
    };
    // host address 37: port address 36, reply delay 74 ms
    Node::new(identity, Ipv4Addr::new(255, 255, 255, 0), NodeConfig::default())
}

fn sender() -> Ipv4Addr {
    Ipv4Addr::new(10, 0, 1, 2)
}

fn art_poll() -> Vec<u8> {
    let mut payload = vec![0u8; layout::POLL_LEN];
    payload[..8].copy_from_slice(layout::ARTNET_ID);
    payload[layout::OP_CODE_RANGE].copy_from_slice(&layout::ARTPOLL_OPCODE.to_le_bytes());
    payload[layout::PROT_VER_LO_OFFSET] = 14;
    payload
}

fn art_dmx(port_address: u16, declared_len: u16, data: &[u8]) -> Vec<u8> {
    let mut payload = vec![0u8; layout::DMX_DATA_OFFSET + data.len()];
    payload[..8].copy_from_slice(layout::ARTNET_ID);
    payload[layout::OP_CODE_RANGE].copy_from_slice(&layout::ARTDMX_OPCODE.to_le_bytes());
    payload[layout::SUB_UNI_OFFSET] = (port_address & 0xFF) as u8;
    payload[layout::NET_OFFSET] = (port_address >> 8) as u8;
    payload[layout::LENGTH_RANGE].copy_from_slice(&declared_len.to_be_bytes());
    payload[layout::DMX_DATA_OFFSET..].copy_from_slice(data);
    payload
}

fn deliver(node: &mut Node, data: &[u8], dest_port: u16, now: Instant) -> (RecordingTransport, RecordingSink) {
    let mut transport = RecordingTransport::default();
    let mut sink = RecordingSink::default();
    let datagram = Datagram {
        source: sender(),
        dest_port,
        data,
    };
    node.handle_datagram(datagram, now, &mut transport, &mut sink);
    (transport, sink)
}

#[test]
fn short_datagrams_are_discarded() {
    let mut node = node();
    let now = Instant::now();
    let poll = art_poll();

    for len in 0..layout::MIN_PACKET_LEN {
        let (transport, sink) = deliver(&mut node, &poll[..len], layout::ARTNET_PORT, now);
        assert!(transport.sent.is_empty());
        assert!(sink.frames.is_empty());
    }
    assert_eq!(node.last_valid_traffic(), None);

    // Nothing was scheduled either.
    let mut transport = RecordingTransport::default();
    node.tick(now + Duration::from_secs(1), &mut transport);
    assert!(transport.sent.is_empty());
}

#[test]
fn corrupted_magic_is_discarded() {
    let mut node = node();
    let mut poll = art_poll();
    poll[3] = b'X';

    let (transport, sink) = deliver(&mut node, &poll, layout::ARTNET_PORT, Instant::now());
    assert!(transport.sent.is_empty());
    assert!(sink.frames.is_empty());
    assert_eq!(node.last_valid_traffic(), None);
}

#[test]
fn truncated_poll_is_discarded() {
    let mut node = node();
    let poll = art_poll();

    let (transport, _) = deliver(&mut node, &poll[..12], layout::ARTNET_PORT, Instant::now());
    assert!(transport.sent.is_empty());
    assert_eq!(node.last_valid_traffic(), None);
}

#[test]
fn broadcast_poll_is_debounced() {
    let mut node = node();
    let start = Instant::now();
    let poll = art_poll();

    // Three polls inside the delay window schedule exactly one reply.
    for offset in [0u64, 10, 20] {
        let (transport, _) = deliver(
            &mut node,
            &poll,
            layout::ARTNET_PORT,
            start + Duration::from_millis(offset),
        );
        assert!(transport.sent.is_empty());
    }

    let mut transport = RecordingTransport::default();
    node.tick(start + Duration::from_millis(73), &mut transport);
    assert!(transport.sent.is_empty());

    node.tick(start + Duration::from_millis(74), &mut transport);
    assert_eq!(transport.sent.len(), 1);
    let (data, source_port, dest, dest_port) = &transport.sent[0];
    assert_eq!(data.len(), layout::REPLY_LEN);
    assert_eq!(
        u16::from_le_bytes([data[8], data[9]]),
        layout::ARTPOLLREPLY_OPCODE
    );
    assert_eq!(*source_port, layout::ARTNET_PORT);
    assert_eq!(*dest, Ipv4Addr::BROADCAST);
    assert_eq!(*dest_port, layout::ARTNET_PORT);

    // Nothing left pending afterwards.
    node.tick(start + Duration::from_secs(5), &mut transport);
    assert_eq!(transport.sent.len(), 1);
}

#[test]
fn out_of_band_poll_answered_immediately() {
    let mut node = node();
    let now = Instant::now();
    let poll = art_poll();

    let (transport, _) = deliver(&mut node, &poll, 6000, now);
    assert_eq!(transport.sent.len(), 1);
    let (data, source_port, dest, dest_port) = &transport.sent[0];
    assert_eq!(data.len(), layout::REPLY_LEN);
    assert_eq!(*source_port, layout::ARTNET_UNICAST_PORT);
    assert_eq!(*dest, sender());
    assert_eq!(*dest_port, layout::ARTNET_UNICAST_PORT);
}

#[test]
fn out_of_band_poll_bypasses_pending_broadcast() {
    let mut node = node();
    let start = Instant::now();
    let poll = art_poll();

    let (transport, _) = deliver(&mut node, &poll, layout::ARTNET_PORT, start);
    assert!(transport.sent.is_empty());

    // The unicast answer goes out while the broadcast is still pending...
    let (transport, _) = deliver(&mut node, &poll, 6000, start + Duration::from_millis(5));
    assert_eq!(transport.sent.len(), 1);
    assert_eq!(transport.sent[0].3, layout::ARTNET_UNICAST_PORT);

    // ...and the broadcast still fires on schedule.
    let mut transport = RecordingTransport::default();
    node.tick(start + Duration::from_millis(74), &mut transport);
    assert_eq!(transport.sent.len(), 1);
    assert_eq!(transport.sent[0].2, Ipv4Addr::BROADCAST);
}

#[test]
fn unicast_replies_are_identical_across_polls() {
    let mut node = node();
    let now = Instant::now();
    let poll = art_poll();

    let (first, _) = deliver(&mut node, &poll, 6000, now);
    let (second, _) = deliver(&mut node, &poll, 6000, now + Duration::from_secs(1));
    assert_eq!(first.sent[0].0, second.sent[0].0);
}

#[test]
fn valid_poll_updates_liveness() {
    let mut node = node();
    let now = Instant::now();

    deliver(&mut node, &art_poll(), layout::ARTNET_PORT, now);
    assert_eq!(node.last_valid_traffic(), Some(now));
    assert_eq!(
        node.time_since_valid(now + Duration::from_secs(2)),
        Some(Duration::from_secs(2))
    );
}

#[test]
fn dmx_for_other_universe_is_ignored() {
    let mut node = node();
    let dmx = art_dmx(99, 4, &[1, 2, 3, 4]);

    let (transport, sink) = deliver(&mut node, &dmx, layout::ARTNET_PORT, Instant::now());
    assert!(transport.sent.is_empty());
    assert!(sink.frames.is_empty());
    assert_eq!(node.last_valid_traffic(), None);
}

#[test]
fn dmx_for_own_universe_is_forwarded() {
    let mut node = node();
    let now = Instant::now();
    let dmx = art_dmx(36, 4, &[10, 20, 30, 40]);

    let (_, sink) = deliver(&mut node, &dmx, layout::ARTNET_PORT, now);
    assert_eq!(sink.frames, vec![vec![10, 20, 30, 40]]);
    assert_eq!(node.last_valid_traffic(), Some(now));
}

#[test]
fn dmx_for_wildcard_universe_is_forwarded() {
    let mut node = node();
    let dmx = art_dmx(0, 2, &[1, 2]);

    let (_, sink) = deliver(&mut node, &dmx, layout::ARTNET_PORT, Instant::now());
    assert_eq!(sink.frames, vec![vec![1, 2]]);
}

#[test]
fn dmx_oversized_declared_length_is_clamped() {
    let mut node = node();
    let dmx = art_dmx(36, 600, &[7u8; 512]);

    let (_, sink) = deliver(&mut node, &dmx, layout::ARTNET_PORT, Instant::now());
    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.frames[0].len(), 512);
}

#[test]
fn dmx_undersized_declared_length_is_clamped() {
    let mut node = node();
    let dmx = art_dmx(36, 1, &[7u8; 8]);

    let (_, sink) = deliver(&mut node, &dmx, layout::ARTNET_PORT, Instant::now());
    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.frames[0].len(), 8);
}

#[test]
fn announce_broadcasts_once() {
    let mut node = node();
    let mut transport = RecordingTransport::default();

    node.announce(&mut transport);
    assert_eq!(transport.sent.len(), 1);
    assert_eq!(transport.sent[0].2, Ipv4Addr::BROADCAST);
    assert_eq!(transport.sent[0].0.len(), layout::REPLY_LEN);
}

#[test]
fn refresh_addressing_moves_the_node() {
    let mut node = node();
    assert_eq!(node.port_address().raw(), 36);
    assert_eq!(node.reply_delay(), Duration::from_millis(74));

    let renewed = NodeIdentity {
        ip: Ipv4Addr::new(10, 0, 1, 50),
        mac: [0x70, 0x69, 0x69, 0x2d, 0x30, 0x31],
        dhcp_assigned: true,
    };
    node.refresh_addressing(renewed, Ipv4Addr::new(255, 255, 255, 0));
    assert_eq!(node.port_address().raw(), 49);
    assert_eq!(node.reply_delay(), Duration::from_millis(100));

    // DMX addressed to the old universe no longer lands.
    let dmx = art_dmx(36, 2, &[1, 2]);
    let (_, sink) = deliver(&mut node, &dmx, layout::ARTNET_PORT, Instant::now());
    assert!(sink.frames.is_empty());
}
