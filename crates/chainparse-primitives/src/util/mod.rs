//! Byte stream primitives for Bitcoin wire data.
//!
//! Provides `VarInt` (CompactSize) encoding, and the `ByteReader` /
//! `ByteWriter` pair used to decode and encode little-endian fixed-width
//! integers and length-prefixed byte strings.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A Bitcoin protocol variable-length integer.
///
/// Encoded in 1, 3, 5 or 9 bytes depending on magnitude: values below
/// 0xfd are a single byte, larger values carry a 0xfd/0xfe/0xff marker
/// followed by a 2/4/8-byte little-endian integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Return the wire-format byte length of this VarInt.
    pub fn length(&self) -> usize {
        match self.0 {
            0..=0xfc => 1,
            0xfd..=0xffff => 3,
            0x1_0000..=0xffff_ffff => 5,
            _ => 9,
        }
    }

    /// Encode the VarInt into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let v = self.0;
        let mut buf = Vec::with_capacity(self.length());
        match self.length() {
            1 => buf.push(v as u8),
            3 => {
                buf.push(0xfd);
                buf.extend_from_slice(&(v as u16).to_le_bytes());
            }
            5 => {
                buf.push(0xfe);
                buf.extend_from_slice(&(v as u32).to_le_bytes());
            }
            _ => {
                buf.push(0xff);
                buf.extend_from_slice(&v.to_le_bytes());
            }
        }
        buf
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// ByteReader
// ---------------------------------------------------------------------------

/// A cursor-based reader over a borrowed byte buffer.
///
/// Every read either consumes exactly the requested bytes or fails with
/// `PrimitivesError::StreamUnderrun` without moving the cursor.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or `StreamUnderrun` if fewer remain.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(PrimitivesError::StreamUnderrun { requested: n, remaining });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian i32 and advance the position by 4 bytes.
    pub fn read_i32_le(&mut self) -> Result<i32, PrimitivesError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a VarInt and advance the position accordingly.
    ///
    /// The cursor is left untouched if the encoding is truncated.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let start = self.pos;
        let result = match self.read_u8()? {
            0xff => self.read_u64_le(),
            0xfe => self.read_u32_le().map(u64::from),
            0xfd => self.read_u16_le().map(u64::from),
            b => Ok(u64::from(b)),
        };
        if result.is_err() {
            self.pos = start;
        }
        result.map(VarInt)
    }

    /// Read a VarInt length prefix followed by that many bytes.
    ///
    /// The cursor is left untouched if either part is truncated.
    pub fn read_string(&mut self) -> Result<&'a [u8], PrimitivesError> {
        let start = self.pos;
        let len = self.read_varint()?.value();
        let remaining = self.remaining();
        let len = match usize::try_from(len) {
            Ok(len) if len <= remaining => len,
            _ => {
                self.pos = start;
                return Err(PrimitivesError::StreamUnderrun {
                    requested: usize::try_from(len).unwrap_or(usize::MAX),
                    remaining,
                });
            }
        };
        self.read_bytes(len)
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Return the current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }
}

// ---------------------------------------------------------------------------
// ByteWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer mirroring `ByteReader`.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        ByteWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32 (4 bytes).
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian i32 (4 bytes).
    pub fn write_i32_le(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt.
    pub fn write_varint(&mut self, varint: VarInt) {
        self.buf.extend_from_slice(&varint.to_bytes());
    }

    /// Append a VarInt length prefix followed by the bytes themselves.
    pub fn write_string(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.write_bytes(bytes);
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_encoding_boundaries() {
        let cases: Vec<(u64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (252, vec![0xfc]),
            (253, vec![0xfd, 0xfd, 0x00]),
            (65535, vec![0xfd, 0xff, 0xff]),
            (65536, vec![0xfe, 0x00, 0x00, 0x01, 0x00]),
            (4294967295, vec![0xfe, 0xff, 0xff, 0xff, 0xff]),
            (4294967296, vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]),
        ];

        for (value, expected) in cases {
            let vi = VarInt(value);
            assert_eq!(vi.to_bytes(), expected, "encoding mismatch for {}", value);
            assert_eq!(vi.length(), expected.len(), "length mismatch for {}", value);

            let mut reader = ByteReader::new(&expected);
            assert_eq!(reader.read_varint().unwrap(), vi);
            assert_eq!(reader.remaining(), 0);
        }
    }

    #[test]
    fn test_reader_writer_fixed_width() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0x42);
        writer.write_u16_le(0x1234);
        writer.write_u32_le(0xDEADBEEF);
        writer.write_i32_le(-2);
        writer.write_u64_le(0x0102030405060708);
        writer.write_string(b"hello");

        let data = writer.into_bytes();
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x42);
        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_i32_le().unwrap(), -2);
        assert_eq!(reader.read_u64_le().unwrap(), 0x0102030405060708);
        assert_eq!(reader.read_string().unwrap(), b"hello");
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), data.len());
    }

    #[test]
    fn test_u32_is_little_endian() {
        let mut reader = ByteReader::new(&[0x01, 0x00, 0x00, 0x00]);
        assert_eq!(reader.read_u32_le().unwrap(), 1);
    }

    #[test]
    fn test_read_bytes_underrun() {
        let mut reader = ByteReader::new(&[0x01, 0x02]);
        assert_eq!(
            reader.read_bytes(3),
            Err(PrimitivesError::StreamUnderrun { requested: 3, remaining: 2 })
        );
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_bytes(2).unwrap(), &[0x01, 0x02]);
        assert!(reader.read_u8().is_err());
    }

    #[test]
    fn test_truncated_varint_keeps_cursor() {
        let mut reader = ByteReader::new(&[0xfd, 0x01]);
        assert!(matches!(
            reader.read_varint(),
            Err(PrimitivesError::StreamUnderrun { .. })
        ));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_string_declares_too_much() {
        let mut reader = ByteReader::new(&[0x05, 0xaa, 0xbb]);
        assert_eq!(
            reader.read_string(),
            Err(PrimitivesError::StreamUnderrun { requested: 5, remaining: 2 })
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_string_empty() {
        let mut reader = ByteReader::new(&[0x00, 0x99]);
        assert!(reader.read_string().unwrap().is_empty());
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_write_string_long_prefix() {
        let payload = vec![0xab; 300];
        let mut writer = ByteWriter::with_capacity(303);
        writer.write_string(&payload);
        assert_eq!(&writer.as_bytes()[..3], &[0xfd, 0x2c, 0x01]);
        assert_eq!(writer.len(), 303);
    }
}
