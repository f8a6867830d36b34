use std::fmt;

use basalt_codec::{ByteReader, ByteWriter};

use crate::error::{WireError, WireResult};

/// Width of the command field on the wire.
pub const COMMAND_LEN: usize = 12;

/// The closed set of wire commands.
///
/// On the wire a command is a fixed 12-byte field: the ASCII name followed
/// by zero padding. The command for a message is resolved from the payload
/// type's registration, never embedded redundantly in the payload bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Handshake announcement carrying a [`VersionPayload`].
    ///
    /// [`VersionPayload`]: crate::payload::VersionPayload
    Version,
    /// Handshake acknowledgment; its payload is zero bytes.
    VersionAck,
}

impl Command {
    /// The ASCII name written to the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::VersionAck => "verack",
        }
    }

    /// Resolve a wire name back to a command.
    pub fn from_wire_name(name: &str) -> WireResult<Self> {
        match name {
            "version" => Ok(Self::Version),
            "verack" => Ok(Self::VersionAck),
            other => Err(WireError::UnknownCommand(other.to_string())),
        }
    }

    /// Write the fixed 12-byte field: ASCII name, zero padded.
    pub fn encode_into(self, w: &mut ByteWriter) {
        let name = self.wire_name().as_bytes();
        let mut field = [0u8; COMMAND_LEN];
        field[..name.len()].copy_from_slice(name);
        w.put_bytes(&field);
    }

    /// Read and validate the fixed 12-byte field.
    ///
    /// Every byte after the name must be zero, and the name must be ASCII;
    /// anything else is a framing error, not a decode default.
    pub fn decode_from(r: &mut ByteReader<'_>) -> WireResult<Self> {
        let field = r.get_bytes(COMMAND_LEN)?;
        let name_len = field.iter().position(|b| *b == 0).unwrap_or(COMMAND_LEN);
        if field[name_len..].iter().any(|b| *b != 0) {
            return Err(WireError::InvalidCommandEncoding);
        }
        let name = &field[..name_len];
        if name.is_empty() || !name.is_ascii() {
            return Err(WireError::InvalidCommandEncoding);
        }
        // The name is ASCII, so this cannot fail.
        let name = std::str::from_utf8(name).map_err(|_| WireError::InvalidCommandEncoding)?;
        Self::from_wire_name(name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(command: Command) -> Command {
        let mut w = ByteWriter::new();
        command.encode_into(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), COMMAND_LEN);
        Command::decode_from(&mut ByteReader::new(&bytes)).unwrap()
    }

    #[test]
    fn version_roundtrip() {
        assert_eq!(roundtrip(Command::Version), Command::Version);
    }

    #[test]
    fn verack_roundtrip() {
        assert_eq!(roundtrip(Command::VersionAck), Command::VersionAck);
    }

    #[test]
    fn encoding_is_zero_padded_ascii() {
        let mut w = ByteWriter::new();
        Command::Version.encode_into(&mut w);
        let mut expected = b"version".to_vec();
        expected.resize(COMMAND_LEN, 0);
        assert_eq!(w.into_bytes(), expected);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let mut field = [0u8; COMMAND_LEN];
        field[..5].copy_from_slice(b"bogus");
        let err = Command::decode_from(&mut ByteReader::new(&field)).unwrap_err();
        assert_eq!(err, WireError::UnknownCommand("bogus".to_string()));
    }

    #[test]
    fn nonzero_padding_is_rejected() {
        let mut field = [0u8; COMMAND_LEN];
        field[..7].copy_from_slice(b"version");
        field[COMMAND_LEN - 1] = 0x20;
        let err = Command::decode_from(&mut ByteReader::new(&field)).unwrap_err();
        assert_eq!(err, WireError::InvalidCommandEncoding);
    }

    #[test]
    fn empty_name_is_rejected() {
        let field = [0u8; COMMAND_LEN];
        let err = Command::decode_from(&mut ByteReader::new(&field)).unwrap_err();
        assert_eq!(err, WireError::InvalidCommandEncoding);
    }

    #[test]
    fn non_ascii_name_is_rejected() {
        let mut field = [0u8; COMMAND_LEN];
        field[0] = 0xC3;
        field[1] = 0xA9;
        let err = Command::decode_from(&mut ByteReader::new(&field)).unwrap_err();
        assert_eq!(err, WireError::InvalidCommandEncoding);
    }

    #[test]
    fn truncated_field_is_rejected() {
        let err = Command::decode_from(&mut ByteReader::new(&[0u8; 4])).unwrap_err();
        assert_eq!(err, WireError::Codec(basalt_codec::CodecError::TruncatedInput));
    }
}
