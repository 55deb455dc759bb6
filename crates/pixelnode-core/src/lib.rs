//! pixelnode core: an Art-Net node for a single DMX universe.
//!
//! This crate implements the protocol engine behind the runnable node: the
//! dispatcher validates and classifies inbound datagrams, the poll handler
//! schedules debounced broadcast discovery replies (immediate unicast for
//! out-of-band polls), the output handler extracts channel data for the
//! pixel sink, and the reply builder encodes the node's identity record.
//! All I/O stays behind the `Transport`/`DmxSink` seams; the core never
//! touches a socket or reads a clock on its own.
//!
//! Invariants:
//! - The port address derived from the node's IP is stable until the
//!   transport reports an address renewal.
//! - At most one broadcast reply is pending at a time; duplicate polls do
//!   not reschedule it.
//! - Channel data forwarded to the sink is always 2..=512 bytes and belongs
//!   to the node's universe (or the wildcard universe 0).
//!
//! Version française (résumé):
//! Cœur du nœud Art-Net : validation et classification des datagrammes,
//! réponses de découverte différées (unicast immédiat hors bande),
//! extraction des canaux DMX pour la sortie pixel. Les E/S restent derrière
//! `Transport`/`DmxSink`; l'adresse de port est stable entre deux baux et
//! une seule réponse diffusée peut être en attente.
//!
//! # Examples
//! ```
//! use std::net::Ipv4Addr;
//! use std::time::Instant;
//!
//! use pixelnode_core::{Datagram, DmxSink, Node, NodeConfig, NodeIdentity, Transport};
//!
//! struct Recorder(Vec<Vec<u8>>);
//!
//! impl Transport for Recorder {
//!     fn transmit(&mut self, data: &[u8], _source_port: u16, _dest: Ipv4Addr, _dest_port: u16) {
//!         self.0.push(data.to_vec());
//!     }
//! }
//!
//! struct NullSink;
//!
//! impl DmxSink for NullSink {
//!     fn on_channel_data(&mut self, _channels: &[u8]) {}
//! }
//!
//! let identity = NodeIdentity {
//!     ip: Ipv4Addr::new(10, 0, 1, 37),
//!     mac: [0x70, 0x69, 0x69, 0x2d, 0x30, 0x31],
//!     dhcp_assigned: true,
//! };
//! let mut node = Node::new(identity, Ipv4Addr::new(255, 255, 255, 0), NodeConfig::default());
//! assert_eq!(node.port_address().raw(), 36);
//!
//! // An ArtPoll on a non-canonical port is answered immediately as unicast.
//! let mut poll = b"Art-Net\0".to_vec();
//! poll.extend_from_slice(&[0x00, 0x20, 0, 14, 0, 0]);
//! let mut transport = Recorder(Vec::new());
//! let datagram = Datagram {
//!     source: Ipv4Addr::new(10, 0, 1, 2),
//!     dest_port: 6000,
//!     data: &poll,
//! };
//! node.handle_datagram(datagram, Instant::now(), &mut transport, &mut NullSink);
//! assert_eq!(transport.0.len(), 1);
//! ```

mod config;
mod node;
mod transport;

pub mod protocol;

pub use config::NodeConfig;
pub use node::{Node, PortAddress, ResolvedAddress, resolve};
pub use transport::{Datagram, DmxSink, NodeIdentity, Transport};
