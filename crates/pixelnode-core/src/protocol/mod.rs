//! Art-Net wire format.
//!
//! The parser validates the Art-Net signature, classifies the opcode and
//! decodes ArtPoll/ArtDmx payloads into domain-friendly structures; the
//! reply side encodes the fixed 239-byte ArtPollReply record byte-for-byte.
//! Byte offsets live in `layout`, byte-access conventions in `reader`, and
//! bit-packed flag bytes are explicit shift-and-mask structs rather than
//! compiler-defined bitfields.
//!
//! A deliberate permissiveness: an ArtDmx declared length outside 2..=512 is
//! clamped to the received byte count instead of rejecting the packet, so
//! senders that mis-report length still drive the output.
//!
//! Version française (résumé):
//! Le module décode Art-Net (signature, opcode, ArtPoll, ArtDmx) et encode
//! la réponse ArtPollReply de 239 octets à l'identique. Les positions sont
//! dans `layout`, les conventions dans `reader`; les champs de bits sont
//! explicites. Une longueur ArtDmx hors bornes est bornée, pas rejetée.

pub mod error;
pub mod layout;
pub mod opcode;
pub mod parser;
pub mod reader;
pub mod reply;

pub use error::ProtocolError;
pub use opcode::{Opcode, PriorityCode};
pub use parser::{ArtDmx, ArtPoll, Packet, TalkToMe, parse_packet};
pub use reply::PollReply;
