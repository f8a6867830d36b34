use basalt_codec::{CodecError, CodecResult, FieldEncoding, FieldValue, Record, Schema};

use crate::command::Command;

/// A record registered as the payload of a wire command.
///
/// The registry is static: each payload type names its command here, and the
/// message envelope resolves commands from this association in both
/// directions.
pub trait PayloadRecord: Record {
    const COMMAND: Command;
}

/// Handshake announcement exchanged when two peers connect.
///
/// The wire layout is the schema declaration order, and must not change:
/// peers parse these bytes positionally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionPayload {
    /// Protocol version spoken by the sender.
    pub version: u32,
    /// Service bitmask advertised by the sender.
    pub services: u64,
    /// Seconds since the Unix epoch at send time.
    pub timestamp: u32,
    /// Port the sender accepts connections on.
    pub port: u16,
    /// Random nonce for self-connection detection.
    pub nonce: u32,
    /// Free-form client identifier, e.g. `/basalt:0.1.0/`.
    pub user_agent: String,
    /// Block height of the sender's chain.
    pub start_height: u32,
    /// Whether the sender wants transactions relayed to it.
    pub relay: bool,
}

impl Record for VersionPayload {
    const SCHEMA: Schema = &[
        FieldEncoding::U32,
        FieldEncoding::U64,
        FieldEncoding::U32,
        FieldEncoding::U16,
        FieldEncoding::U32,
        FieldEncoding::VarString,
        FieldEncoding::U32,
        FieldEncoding::Bool,
    ];

    fn to_fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::U32(self.version),
            FieldValue::U64(self.services),
            FieldValue::U32(self.timestamp),
            FieldValue::U16(self.port),
            FieldValue::U32(self.nonce),
            FieldValue::Str(self.user_agent.clone()),
            FieldValue::U32(self.start_height),
            FieldValue::Bool(self.relay),
        ]
    }

    fn from_fields(fields: Vec<FieldValue>) -> CodecResult<Self> {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().ok_or(CodecError::TruncatedInput);
        Ok(Self {
            version: next()?.into_u32()?,
            services: next()?.into_u64()?,
            timestamp: next()?.into_u32()?,
            port: next()?.into_u16()?,
            nonce: next()?.into_u32()?,
            user_agent: next()?.into_string()?,
            start_height: next()?.into_u32()?,
            relay: next()?.into_bool()?,
        })
    }
}

impl PayloadRecord for VersionPayload {
    const COMMAND: Command = Command::Version;
}

/// Handshake acknowledgment.
///
/// Carries no fields: it encodes to zero payload bytes and decodes from zero
/// bytes to this canonical instance. An empty payload is still a payload —
/// it is not the same thing as an absent one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VersionAckPayload;

impl Record for VersionAckPayload {
    const SCHEMA: Schema = &[];

    fn to_fields(&self) -> Vec<FieldValue> {
        Vec::new()
    }

    fn from_fields(fields: Vec<FieldValue>) -> CodecResult<Self> {
        if !fields.is_empty() {
            return Err(CodecError::SchemaMismatch {
                expected: "no fields",
                actual: "fields",
            });
        }
        Ok(Self)
    }
}

impl PayloadRecord for VersionAckPayload {
    const COMMAND: Command = Command::VersionAck;
}
