use bytes::BufMut;

/// Append-only writer producing the exact wire byte layout.
///
/// Fixed-width integers are written little-endian. Variable-length integers
/// use the compact encoding: values below `0xFD` as a single byte, then
/// `0xFD` + u16, `0xFE` + u32, `0xFF` + u64, always the shortest form.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn put_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    pub fn put_u16_le(&mut self, v: u16) {
        self.buf.put_u16_le(v);
    }

    pub fn put_u32_le(&mut self, v: u32) {
        self.buf.put_u32_le(v);
    }

    pub fn put_u64_le(&mut self, v: u64) {
        self.buf.put_u64_le(v);
    }

    /// A boolean is a single byte, 0 or 1.
    pub fn put_bool(&mut self, v: bool) {
        self.buf.put_u8(u8::from(v));
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Shortest-form compact variable-length integer.
    pub fn put_var_int(&mut self, v: u64) {
        match v {
            0..=0xFC => self.buf.put_u8(v as u8),
            0xFD..=0xFFFF => {
                self.buf.put_u8(0xFD);
                self.buf.put_u16_le(v as u16);
            }
            0x1_0000..=0xFFFF_FFFF => {
                self.buf.put_u8(0xFE);
                self.buf.put_u32_le(v as u32);
            }
            _ => {
                self.buf.put_u8(0xFF);
                self.buf.put_u64_le(v);
            }
        }
    }

    /// Var-int byte length followed by the UTF-8 bytes.
    pub fn put_var_string(&mut self, s: &str) {
        self.put_var_int(s.len() as u64);
        self.buf.put_slice(s.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_widths_are_little_endian() {
        let mut w = ByteWriter::new();
        w.put_u8(0x01);
        w.put_u16_le(0x0302);
        w.put_u32_le(0x0706_0504);
        w.put_u64_le(0x0F0E_0D0C_0B0A_0908);
        assert_eq!(
            w.into_bytes(),
            (0x01u8..=0x0F).collect::<Vec<_>>()
        );
    }

    #[test]
    fn bool_is_one_byte() {
        let mut w = ByteWriter::new();
        w.put_bool(true);
        w.put_bool(false);
        assert_eq!(w.into_bytes(), vec![1, 0]);
    }

    #[test]
    fn var_int_boundaries() {
        let cases: &[(u64, Vec<u8>)] = &[
            (0x00, vec![0x00]),
            (0xFC, vec![0xFC]),
            (0xFD, vec![0xFD, 0xFD, 0x00]),
            (0xFFFF, vec![0xFD, 0xFF, 0xFF]),
            (0x1_0000, vec![0xFE, 0x00, 0x00, 0x01, 0x00]),
            (0xFFFF_FFFF, vec![0xFE, 0xFF, 0xFF, 0xFF, 0xFF]),
            (
                0x1_0000_0000,
                vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00],
            ),
        ];
        for (value, expected) in cases {
            let mut w = ByteWriter::new();
            w.put_var_int(*value);
            assert_eq!(&w.into_bytes(), expected, "value {value:#x}");
        }
    }

    #[test]
    fn var_string_prefixes_byte_length() {
        let mut w = ByteWriter::new();
        w.put_var_string("abc");
        assert_eq!(w.into_bytes(), vec![3, b'a', b'b', b'c']);
    }

    #[test]
    fn empty_var_string() {
        let mut w = ByteWriter::new();
        w.put_var_string("");
        assert_eq!(w.into_bytes(), vec![0]);
    }
}
