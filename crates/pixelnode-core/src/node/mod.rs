//! The Art-Net node state machine.
//!
//! `Node` owns all mutable node state (identity, derived addressing,
//! reply-scheduling state, liveness timestamp) and is driven from a single
//! control flow: `handle_datagram` for each inbound datagram, `tick` once
//! per loop iteration. Collaborators (send path, pixel sink) are passed in
//! per call, so the core stays clock-free and testable.

mod addressing;
mod health;
mod scheduler;

pub use addressing::{PortAddress, ResolvedAddress, resolve};

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::NodeConfig;
use crate::protocol::opcode::PriorityCode;
use crate::protocol::parser::{ArtDmx, ArtPoll};
use crate::protocol::reply::PollReply;
use crate::protocol::{Packet, layout, parse_packet};
use crate::transport::{Datagram, DmxSink, NodeIdentity, Transport};

use health::Liveness;
use scheduler::ReplyScheduler;

pub struct Node {
    identity: NodeIdentity,
    config: NodeConfig,
    addressing: ResolvedAddress,
    scheduler: ReplyScheduler,
    liveness: Liveness,
}

impl Node {
    pub fn new(identity: NodeIdentity, netmask: Ipv4Addr, config: NodeConfig) -> Self {
        let addressing = resolve(identity.ip, netmask);
        debug!(
            "node on port address {} (net {} sub-net {} universe {}), reply delay {:?}",
            addressing.port_address.raw(),
            addressing.port_address.net(),
            addressing.port_address.sub_net(),
            addressing.port_address.universe(),
            addressing.reply_delay
        );
        Self {
            identity,
            config,
            addressing,
            scheduler: ReplyScheduler::new(addressing.reply_delay),
            liveness: Liveness::default(),
        }
    }

    /// Re-derive addressing after the transport reports a new lease.
    pub fn refresh_addressing(&mut self, identity: NodeIdentity, netmask: Ipv4Addr) {
        self.identity = identity;
        self.addressing = resolve(identity.ip, netmask);
        self.scheduler.set_delay(self.addressing.reply_delay);
        debug!(
            "addressing refreshed, port address {}",
            self.addressing.port_address.raw()
        );
    }

    pub fn port_address(&self) -> PortAddress {
        self.addressing.port_address
    }

    pub fn reply_delay(&self) -> Duration {
        self.addressing.reply_delay
    }

    /// Broadcast an ArtPollReply unprompted; a node announces itself when it
    /// comes online.
    pub fn announce(&mut self, transport: &mut impl Transport) {
        self.send_poll_reply(transport, None);
    }

    /// Validate, classify and dispatch one inbound datagram. Malformed input
    /// is logged and dropped; this never fails.
    pub fn handle_datagram(
        &mut self,
        datagram: Datagram<'_>,
        now: Instant,
        transport: &mut impl Transport,
        sink: &mut impl DmxSink,
    ) {
        let packet = match parse_packet(datagram.data) {
            Ok(packet) => packet,
            Err(err) => {
                debug!(
                    "discarding {} byte datagram from {}: {}",
                    datagram.data.len(),
                    datagram.source,
                    err
                );
                return;
            }
        };

        match packet {
            Packet::Poll(poll) => self.handle_poll(&poll, &datagram, now, transport),
            Packet::Output(dmx) => self.handle_output(&dmx, now, sink),
            Packet::Other(opcode) => {
                trace!("ignoring {:?} from {}", opcode, datagram.source);
            }
            Packet::Unknown(raw) => {
                trace!("ignoring unknown opcode {:#06x} from {}", raw, datagram.source);
            }
        }
    }

    /// Drain the reply scheduler; called once per loop iteration.
    pub fn tick(&mut self, now: Instant, transport: &mut impl Transport) {
        if self.scheduler.take_due(now) {
            self.send_poll_reply(transport, None);
        }
    }

    pub fn last_valid_traffic(&self) -> Option<Instant> {
        self.liveness.last_valid()
    }

    pub fn time_since_valid(&self, now: Instant) -> Option<Duration> {
        self.liveness.time_since(now)
    }

    fn handle_poll(
        &mut self,
        poll: &ArtPoll,
        datagram: &Datagram<'_>,
        now: Instant,
        transport: &mut impl Transport,
    ) {
        trace!(
            "poll v{}.{} from {}, talk-to-me {:?}, priority {:?}",
            poll.prot_ver_hi,
            poll.prot_ver_lo,
            datagram.source,
            poll.talk_to_me,
            PriorityCode::from_u8(poll.priority)
        );
        self.liveness.record(now);

        if datagram.dest_port == layout::ARTNET_PORT {
            // Broadcast discovery is debounced; a poll while a reply is
            // pending keeps the original slot.
            if self.scheduler.schedule(now) {
                trace!("broadcast reply scheduled in {:?}", self.addressing.reply_delay);
            }
        } else {
            // Out-of-band poll, answer the sender right away.
            self.send_poll_reply(transport, Some(datagram.source));
        }
    }

    fn handle_output(&mut self, dmx: &ArtDmx<'_>, now: Instant, sink: &mut impl DmxSink) {
        let own = self.addressing.port_address.raw();
        if dmx.port_address != 0 && dmx.port_address != own {
            // Normal on a shared broadcast domain, not an error.
            trace!(
                "dmx for universe {} ignored, node is on {}",
                dmx.port_address, own
            );
            return;
        }
        self.liveness.record(now);

        if dmx.clamped() {
            debug!(
                "declared dmx length {} out of bounds, using {} received channels",
                dmx.declared_len,
                dmx.channels.len()
            );
        }
        sink.on_channel_data(dmx.channels);
    }

    fn send_poll_reply(&self, transport: &mut impl Transport, unicast_to: Option<Ipv4Addr>) {
        let reply = PollReply {
            ip: self.identity.ip,
            mac: self.identity.mac,
            port_address: self.addressing.port_address.raw(),
            short_name: self.config.short_name,
            long_name: self.config.long_name,
            output_ports: self.config.output_ports,
            dhcp: self.identity.dhcp_assigned,
        };
        let encoded = reply.encode();

        match unicast_to {
            None => {
                trace!("broadcasting poll reply");
                transport.transmit(
                    &encoded,
                    layout::ARTNET_PORT,
                    Ipv4Addr::BROADCAST,
                    layout::ARTNET_PORT,
                );
            }
            Some(dest) => {
                trace!("unicasting poll reply to {}", dest);
                transport.transmit(
                    &encoded,
                    layout::ARTNET_UNICAST_PORT,
                    dest,
                    layout::ARTNET_UNICAST_PORT,
                );
            }
        }
    }
}
