//! Declarative field schemas and the generic record traversal.
//!
//! A record type declares its wire layout as a [`Schema`]: an ordered list of
//! [`FieldEncoding`]s. One traversal routine walks the schema for both
//! encoding and decoding, so adding a record type means adding a schema
//! constant and two field adapters, never touching the codec itself.

use std::collections::HashSet;

use basalt_types::{CoinReference, UInt160, UInt256};

use crate::error::{CodecError, CodecResult};
use crate::reader::ByteReader;
use crate::writer::ByteWriter;

/// On-wire encoding of a single record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldEncoding {
    U8,
    U16,
    U32,
    U64,
    Bool,
    VarString,
    Hash160,
    Hash256,
    CoinRefSet,
}

impl FieldEncoding {
    /// Name used in schema-mismatch diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Bool => "bool",
            Self::VarString => "var-string",
            Self::Hash160 => "hash160",
            Self::Hash256 => "hash256",
            Self::CoinRefSet => "coin-ref-set",
        }
    }
}

/// A record's wire layout: declaration order is wire order.
pub type Schema = &'static [FieldEncoding];

/// A typed field value carried through the generic traversal.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Bool(bool),
    Str(String),
    Hash160(UInt160),
    Hash256(UInt256),
    CoinRefSet(HashSet<CoinReference>),
}

impl FieldValue {
    /// The encoding this value belongs to.
    pub fn encoding(&self) -> FieldEncoding {
        match self {
            Self::U8(_) => FieldEncoding::U8,
            Self::U16(_) => FieldEncoding::U16,
            Self::U32(_) => FieldEncoding::U32,
            Self::U64(_) => FieldEncoding::U64,
            Self::Bool(_) => FieldEncoding::Bool,
            Self::Str(_) => FieldEncoding::VarString,
            Self::Hash160(_) => FieldEncoding::Hash160,
            Self::Hash256(_) => FieldEncoding::Hash256,
            Self::CoinRefSet(_) => FieldEncoding::CoinRefSet,
        }
    }

    fn mismatch<T>(&self, expected: FieldEncoding) -> CodecResult<T> {
        Err(CodecError::SchemaMismatch {
            expected: expected.name(),
            actual: self.encoding().name(),
        })
    }

    pub fn into_u8(self) -> CodecResult<u8> {
        match self {
            Self::U8(v) => Ok(v),
            other => other.mismatch(FieldEncoding::U8),
        }
    }

    pub fn into_u16(self) -> CodecResult<u16> {
        match self {
            Self::U16(v) => Ok(v),
            other => other.mismatch(FieldEncoding::U16),
        }
    }

    pub fn into_u32(self) -> CodecResult<u32> {
        match self {
            Self::U32(v) => Ok(v),
            other => other.mismatch(FieldEncoding::U32),
        }
    }

    pub fn into_u64(self) -> CodecResult<u64> {
        match self {
            Self::U64(v) => Ok(v),
            other => other.mismatch(FieldEncoding::U64),
        }
    }

    pub fn into_bool(self) -> CodecResult<bool> {
        match self {
            Self::Bool(v) => Ok(v),
            other => other.mismatch(FieldEncoding::Bool),
        }
    }

    pub fn into_string(self) -> CodecResult<String> {
        match self {
            Self::Str(v) => Ok(v),
            other => other.mismatch(FieldEncoding::VarString),
        }
    }

    pub fn into_hash160(self) -> CodecResult<UInt160> {
        match self {
            Self::Hash160(v) => Ok(v),
            other => other.mismatch(FieldEncoding::Hash160),
        }
    }

    pub fn into_hash256(self) -> CodecResult<UInt256> {
        match self {
            Self::Hash256(v) => Ok(v),
            other => other.mismatch(FieldEncoding::Hash256),
        }
    }

    pub fn into_coin_set(self) -> CodecResult<HashSet<CoinReference>> {
        match self {
            Self::CoinRefSet(v) => Ok(v),
            other => other.mismatch(FieldEncoding::CoinRefSet),
        }
    }
}

/// A record type with a declared wire schema.
///
/// `to_fields` must yield values matching `SCHEMA` position by position;
/// `from_fields` receives them back in the same order. A record with an
/// empty schema encodes to zero bytes and decodes to its canonical empty
/// instance — which is a valid payload, distinct from "absent".
pub trait Record: Sized {
    const SCHEMA: Schema;

    fn to_fields(&self) -> Vec<FieldValue>;

    fn from_fields(fields: Vec<FieldValue>) -> CodecResult<Self>;
}

/// Encode a record into `writer` following its schema. Returns the number of
/// bytes written.
pub fn encode_record_into<R: Record>(record: &R, writer: &mut ByteWriter) -> CodecResult<usize> {
    let start = writer.len();
    let fields = record.to_fields();
    if fields.len() != R::SCHEMA.len() {
        return Err(CodecError::SchemaMismatch {
            expected: "schema arity",
            actual: "field count",
        });
    }
    for (encoding, value) in R::SCHEMA.iter().zip(fields) {
        if value.encoding() != *encoding {
            return Err(CodecError::SchemaMismatch {
                expected: encoding.name(),
                actual: value.encoding().name(),
            });
        }
        encode_field(&value, writer);
    }
    Ok(writer.len() - start)
}

/// Encode a record to a fresh byte buffer.
pub fn encode_record<R: Record>(record: &R) -> CodecResult<Vec<u8>> {
    let mut writer = ByteWriter::new();
    encode_record_into(record, &mut writer)?;
    Ok(writer.into_bytes())
}

/// Decode a record from `reader` following its schema.
pub fn decode_record_from<R: Record>(reader: &mut ByteReader<'_>) -> CodecResult<R> {
    let mut fields = Vec::with_capacity(R::SCHEMA.len());
    for encoding in R::SCHEMA {
        fields.push(decode_field(*encoding, reader)?);
    }
    R::from_fields(fields)
}

/// Decode a record from a byte slice, requiring the input to be fully
/// consumed.
pub fn decode_record<R: Record>(bytes: &[u8]) -> CodecResult<R> {
    let mut reader = ByteReader::new(bytes);
    let record = decode_record_from(&mut reader)?;
    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes(reader.remaining()));
    }
    Ok(record)
}

fn encode_field(value: &FieldValue, w: &mut ByteWriter) {
    match value {
        FieldValue::U8(v) => w.put_u8(*v),
        FieldValue::U16(v) => w.put_u16_le(*v),
        FieldValue::U32(v) => w.put_u32_le(*v),
        FieldValue::U64(v) => w.put_u64_le(*v),
        FieldValue::Bool(v) => w.put_bool(*v),
        FieldValue::Str(v) => w.put_var_string(v),
        FieldValue::Hash160(v) => w.put_bytes(v.as_bytes()),
        FieldValue::Hash256(v) => w.put_bytes(v.as_bytes()),
        FieldValue::CoinRefSet(set) => encode_coin_set_into(set, w),
    }
}

fn decode_field(encoding: FieldEncoding, r: &mut ByteReader<'_>) -> CodecResult<FieldValue> {
    Ok(match encoding {
        FieldEncoding::U8 => FieldValue::U8(r.get_u8()?),
        FieldEncoding::U16 => FieldValue::U16(r.get_u16_le()?),
        FieldEncoding::U32 => FieldValue::U32(r.get_u32_le()?),
        FieldEncoding::U64 => FieldValue::U64(r.get_u64_le()?),
        FieldEncoding::Bool => FieldValue::Bool(r.get_bool()?),
        FieldEncoding::VarString => FieldValue::Str(r.get_var_string()?),
        FieldEncoding::Hash160 => {
            let mut arr = [0u8; UInt160::LEN];
            arr.copy_from_slice(r.get_bytes(UInt160::LEN)?);
            FieldValue::Hash160(UInt160::from_raw(arr))
        }
        FieldEncoding::Hash256 => {
            let mut arr = [0u8; UInt256::LEN];
            arr.copy_from_slice(r.get_bytes(UInt256::LEN)?);
            FieldValue::Hash256(UInt256::from_raw(arr))
        }
        FieldEncoding::CoinRefSet => FieldValue::CoinRefSet(decode_coin_set_from(r)?),
    })
}

/// Encoded size of one [`CoinReference`]: 32-byte hash plus u16 index.
const COIN_REF_SIZE: usize = UInt256::LEN + 2;

/// Coin references are written in sorted order so the same set always
/// produces the same bytes.
fn encode_coin_set_into(set: &HashSet<CoinReference>, w: &mut ByteWriter) {
    let mut coins: Vec<&CoinReference> = set.iter().collect();
    coins.sort();
    w.put_var_int(coins.len() as u64);
    for coin in coins {
        w.put_bytes(coin.prev_hash.as_bytes());
        w.put_u16_le(coin.prev_index);
    }
}

fn decode_coin_set_from(r: &mut ByteReader<'_>) -> CodecResult<HashSet<CoinReference>> {
    let count = r.get_var_len(COIN_REF_SIZE)?;
    let mut set = HashSet::with_capacity(count);
    for _ in 0..count {
        let mut arr = [0u8; UInt256::LEN];
        arr.copy_from_slice(r.get_bytes(UInt256::LEN)?);
        let prev_index = r.get_u16_le()?;
        // Structural duplicates collapse by set semantics.
        set.insert(CoinReference::new(UInt256::from_raw(arr), prev_index));
    }
    Ok(set)
}

/// Encode a bare coin-reference set: var-int count, then each element.
///
/// This is the on-disk representation of a per-address index entry.
pub fn encode_coin_set(set: &HashSet<CoinReference>) -> Vec<u8> {
    let mut w = ByteWriter::new();
    encode_coin_set_into(set, &mut w);
    w.into_bytes()
}

/// Decode a bare coin-reference set, requiring full input consumption.
pub fn decode_coin_set(bytes: &[u8]) -> CodecResult<HashSet<CoinReference>> {
    let mut r = ByteReader::new(bytes);
    let set = decode_coin_set_from(&mut r)?;
    if !r.is_empty() {
        return Err(CodecError::TrailingBytes(r.remaining()));
    }
    Ok(set)
}

impl Record for CoinReference {
    const SCHEMA: Schema = &[FieldEncoding::Hash256, FieldEncoding::U16];

    fn to_fields(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Hash256(self.prev_hash),
            FieldValue::U16(self.prev_index),
        ]
    }

    fn from_fields(fields: Vec<FieldValue>) -> CodecResult<Self> {
        let mut fields = fields.into_iter();
        let prev_hash = fields
            .next()
            .ok_or(CodecError::TruncatedInput)?
            .into_hash256()?;
        let prev_index = fields
            .next()
            .ok_or(CodecError::TruncatedInput)?
            .into_u16()?;
        Ok(Self::new(prev_hash, prev_index))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn coin(hash_byte: u8, index: u16) -> CoinReference {
        CoinReference::new(UInt256::from_raw([hash_byte; 32]), index)
    }

    // -----------------------------------------------------------------------
    // Record round trips
    // -----------------------------------------------------------------------

    #[test]
    fn coin_reference_roundtrip() {
        let original = coin(0xAB, 513);
        let bytes = encode_record(&original).unwrap();
        assert_eq!(bytes.len(), COIN_REF_SIZE);
        let decoded: CoinReference = decode_record(&bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn coin_reference_layout_is_hash_then_index_le() {
        let bytes = encode_record(&coin(0x11, 0x0302)).unwrap();
        assert_eq!(&bytes[..32], &[0x11u8; 32]);
        assert_eq!(&bytes[32..], &[0x02, 0x03]);
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let mut bytes = encode_record(&coin(1, 1)).unwrap();
        bytes.push(0);
        let err = decode_record::<CoinReference>(&bytes).unwrap_err();
        assert_eq!(err, CodecError::TrailingBytes(1));
    }

    #[test]
    fn decode_rejects_truncated_record() {
        let bytes = encode_record(&coin(1, 1)).unwrap();
        let err = decode_record::<CoinReference>(&bytes[..33]).unwrap_err();
        assert_eq!(err, CodecError::TruncatedInput);
    }

    // -----------------------------------------------------------------------
    // Coin set encoding
    // -----------------------------------------------------------------------

    #[test]
    fn empty_set_is_single_zero_byte() {
        assert_eq!(encode_coin_set(&HashSet::new()), vec![0]);
        assert!(decode_coin_set(&[0]).unwrap().is_empty());
    }

    #[test]
    fn set_roundtrip_is_order_independent() {
        let set: HashSet<_> = [coin(1, 0), coin(2, 0), coin(2, 1)].into();
        let decoded = decode_coin_set(&encode_coin_set(&set)).unwrap();
        assert_eq!(decoded, set);
    }

    #[test]
    fn set_encoding_is_deterministic() {
        let a: HashSet<_> = [coin(1, 0), coin(2, 0), coin(3, 0)].into();
        let b: HashSet<_> = [coin(3, 0), coin(1, 0), coin(2, 0)].into();
        assert_eq!(encode_coin_set(&a), encode_coin_set(&b));
    }

    #[test]
    fn duplicate_elements_collapse_on_decode() {
        let mut w = ByteWriter::new();
        w.put_var_int(2);
        for _ in 0..2 {
            w.put_bytes(&[9u8; 32]);
            w.put_u16_le(7);
        }
        let set = decode_coin_set(&w.into_bytes()).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&coin(9, 7)));
    }

    #[test]
    fn set_count_past_end_fails_invalid_length() {
        // Claims 3 elements but carries only one.
        let mut w = ByteWriter::new();
        w.put_var_int(3);
        w.put_bytes(&[0u8; COIN_REF_SIZE]);
        let err = decode_coin_set(&w.into_bytes()).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidLength {
                declared: 3,
                remaining: COIN_REF_SIZE
            }
        );
    }

    // -----------------------------------------------------------------------
    // Schema mismatches
    // -----------------------------------------------------------------------

    #[test]
    fn field_value_extractors_enforce_encoding() {
        let err = FieldValue::U32(1).into_bool().unwrap_err();
        assert_eq!(
            err,
            CodecError::SchemaMismatch {
                expected: "bool",
                actual: "u32"
            }
        );
    }

    struct LyingRecord;

    impl Record for LyingRecord {
        const SCHEMA: Schema = &[FieldEncoding::U32];

        fn to_fields(&self) -> Vec<FieldValue> {
            vec![FieldValue::Bool(true)]
        }

        fn from_fields(_fields: Vec<FieldValue>) -> CodecResult<Self> {
            Ok(Self)
        }
    }

    #[test]
    fn encode_rejects_value_not_matching_schema() {
        assert!(matches!(
            encode_record(&LyingRecord).unwrap_err(),
            CodecError::SchemaMismatch { .. }
        ));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    fn arb_coin() -> impl Strategy<Value = CoinReference> {
        (any::<[u8; 32]>(), any::<u16>())
            .prop_map(|(hash, index)| CoinReference::new(UInt256::from_raw(hash), index))
    }

    proptest! {
        #[test]
        fn coin_reference_roundtrip_property(coin in arb_coin()) {
            let bytes = encode_record(&coin).unwrap();
            let decoded: CoinReference = decode_record(&bytes).unwrap();
            prop_assert_eq!(decoded, coin);
        }

        #[test]
        fn coin_set_roundtrip_property(coins in proptest::collection::hash_set(arb_coin(), 0..24)) {
            let decoded = decode_coin_set(&encode_coin_set(&coins)).unwrap();
            prop_assert_eq!(decoded, coins);
        }

        #[test]
        fn decode_arbitrary_bytes_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
            let _ = decode_coin_set(&bytes);
            let _ = decode_record::<CoinReference>(&bytes);
        }
    }
}
