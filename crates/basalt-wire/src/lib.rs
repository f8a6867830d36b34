//! Wire message layer for basalt peers.
//!
//! Messages are framed as a fixed 12-byte command, a u32 payload length, and
//! the payload bytes, which are exactly the codec encoding of the record
//! type registered for that command. Transport (sockets, handshake
//! orchestration, peer discovery) lives outside this crate; it consumes and
//! produces [`Message`] frames as opaque byte slices.
//!
//! # Types
//!
//! - [`Command`] — the closed command set and its fixed-width encoding
//! - [`Message`] — the framed envelope
//! - [`VersionPayload`] / [`VersionAckPayload`] — the handshake payloads
//! - [`PayloadRecord`] — the static command registry

pub mod command;
pub mod error;
pub mod message;
pub mod payload;

pub use command::{Command, COMMAND_LEN};
pub use error::{WireError, WireResult};
pub use message::{Message, MAX_PAYLOAD_SIZE};
pub use payload::{PayloadRecord, VersionAckPayload, VersionPayload};
