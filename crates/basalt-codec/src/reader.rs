use bytes::Buf;

use crate::error::{CodecError, CodecResult};

/// Checked reader over a byte slice.
///
/// Every read verifies the remaining length first and fails with
/// [`CodecError::TruncatedInput`] instead of panicking, so arbitrary peer or
/// on-disk bytes can be fed in safely.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    total: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            total: buf.len(),
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.total - self.buf.len()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn need(&self, n: usize) -> CodecResult<()> {
        if self.buf.len() < n {
            return Err(CodecError::TruncatedInput);
        }
        Ok(())
    }

    pub fn get_u8(&mut self) -> CodecResult<u8> {
        self.need(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn get_u16_le(&mut self) -> CodecResult<u16> {
        self.need(2)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn get_u32_le(&mut self) -> CodecResult<u32> {
        self.need(4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn get_u64_le(&mut self) -> CodecResult<u64> {
        self.need(8)?;
        Ok(self.buf.get_u64_le())
    }

    /// A boolean byte must be exactly 0 or 1.
    pub fn get_bool(&mut self) -> CodecResult<bool> {
        match self.get_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBooleanEncoding(other)),
        }
    }

    pub fn get_bytes(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        self.need(n)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    /// Compact variable-length integer. Over-long encodings are rejected as
    /// non-canonical so every value has exactly one byte representation.
    pub fn get_var_int(&mut self) -> CodecResult<u64> {
        let prefix = self.get_u8()?;
        match prefix {
            0xFD => {
                let v = u64::from(self.get_u16_le()?);
                if v < 0xFD {
                    return Err(CodecError::NonCanonicalVarInt);
                }
                Ok(v)
            }
            0xFE => {
                let v = u64::from(self.get_u32_le()?);
                if v <= 0xFFFF {
                    return Err(CodecError::NonCanonicalVarInt);
                }
                Ok(v)
            }
            0xFF => {
                let v = self.get_u64_le()?;
                if v <= 0xFFFF_FFFF {
                    return Err(CodecError::NonCanonicalVarInt);
                }
                Ok(v)
            }
            small => Ok(u64::from(small)),
        }
    }

    /// Var-int length that must fit in the remaining input.
    ///
    /// `min_element_size` is the smallest possible encoded size of one
    /// counted element; a count that could not possibly be satisfied fails
    /// with [`CodecError::InvalidLength`] before anything is read.
    pub fn get_var_len(&mut self, min_element_size: usize) -> CodecResult<usize> {
        let declared = self.get_var_int()?;
        let max = (self.remaining() / min_element_size.max(1)) as u64;
        if declared > max {
            return Err(CodecError::InvalidLength {
                declared,
                remaining: self.remaining(),
            });
        }
        Ok(declared as usize)
    }

    /// Var-int byte length followed by that many UTF-8 bytes.
    ///
    /// Fails with [`CodecError::TruncatedInput`] when fewer bytes remain
    /// than the prefix declares; nothing is allocated for the declared
    /// length until the bytes are actually present.
    pub fn get_var_string(&mut self) -> CodecResult<String> {
        let declared = self.get_var_int()?;
        let len =
            usize::try_from(declared).map_err(|_| CodecError::VarIntOutOfRange(declared))?;
        let bytes = self.get_bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }
}
