use basalt_codec::{decode_record, encode_record, ByteReader, ByteWriter, CodecError};

use crate::command::{Command, COMMAND_LEN};
use crate::error::{WireError, WireResult};
use crate::payload::PayloadRecord;

/// Hard cap on payload bytes in a single message.
pub const MAX_PAYLOAD_SIZE: usize = 0x0200_0000;

/// A framed wire message: a command plus the encoded payload bytes.
///
/// Frame layout: `command (12 bytes) · payload length (u32 LE) · payload`.
/// The command is resolved from the payload type's [`PayloadRecord`]
/// registration when the message is built, and checked against it again when
/// the payload is decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    command: Command,
    payload: Vec<u8>,
}

impl Message {
    /// Build a message from a typed payload.
    pub fn from_payload<P: PayloadRecord>(payload: &P) -> WireResult<Self> {
        let bytes = encode_record(payload)?;
        if bytes.len() > MAX_PAYLOAD_SIZE {
            return Err(WireError::PayloadTooLarge {
                size: bytes.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }
        Ok(Self {
            command: P::COMMAND,
            payload: bytes,
        })
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// The raw payload bytes. Zero-length for acknowledgment commands.
    pub fn payload_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Decode the payload as the given registered type.
    ///
    /// Fails with [`WireError::UnexpectedCommand`] if this message carries a
    /// different command than the type is registered for.
    pub fn decode_payload<P: PayloadRecord>(&self) -> WireResult<P> {
        if self.command != P::COMMAND {
            return Err(WireError::UnexpectedCommand {
                expected: P::COMMAND,
                actual: self.command,
            });
        }
        Ok(decode_record(&self.payload)?)
    }

    /// Encode the full frame.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(COMMAND_LEN + 4 + self.payload.len());
        self.command.encode_into(&mut w);
        w.put_u32_le(self.payload.len() as u32);
        w.put_bytes(&self.payload);
        w.into_bytes()
    }

    /// Decode one frame from the front of `data`.
    ///
    /// Returns the message and the number of bytes consumed, so a caller can
    /// pull successive frames out of a stream buffer.
    pub fn decode(data: &[u8]) -> WireResult<(Self, usize)> {
        let mut r = ByteReader::new(data);
        let command = Command::decode_from(&mut r)?;
        let declared = r.get_u32_le().map_err(WireError::Codec)? as usize;
        if declared > MAX_PAYLOAD_SIZE {
            return Err(WireError::PayloadTooLarge {
                size: declared,
                max: MAX_PAYLOAD_SIZE,
            });
        }
        if declared > r.remaining() {
            return Err(WireError::Codec(CodecError::InvalidLength {
                declared: declared as u64,
                remaining: r.remaining(),
            }));
        }
        let payload = r.get_bytes(declared)?.to_vec();
        Ok((Self { command, payload }, r.position()))
    }
}
