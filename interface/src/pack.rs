//! Little-endian packing primitives shared by every instruction payload.
//!
//! Fixed-width integers and byte arrays are written as-is. Strings and byte vectors are written as
//! a `u32` little-endian length followed by the raw bytes.

use crate::error::{
    CodecError,
    CodecResult,
    MalformedReason,
};

/// The byte length of a length prefix on variable-length fields.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// A type that can append its packed bytes to a buffer.
pub trait Pack {
    fn pack_into(&self, dst: &mut Vec<u8>) -> CodecResult<()>;

    fn pack(&self) -> CodecResult<Vec<u8>> {
        let mut dst = Vec::new();
        self.pack_into(&mut dst)?;
        Ok(dst)
    }
}

/// A type that can be read back out of packed bytes.
pub trait Unpack: Sized {
    fn unpack(src: &mut ByteReader<'_>) -> CodecResult<Self>;
}

/// Instructions without arguments pack to nothing.
impl Pack for () {
    fn pack_into(&self, _dst: &mut Vec<u8>) -> CodecResult<()> {
        Ok(())
    }
}

impl Unpack for () {
    fn unpack(_src: &mut ByteReader<'_>) -> CodecResult<Self> {
        Ok(())
    }
}

/// What to do with bytes left over after a payload has been fully read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TrailingBytes {
    /// Leave them unread, as generated Anchor clients do.
    #[default]
    Ignore,
    /// Fail with [`CodecError::TrailingBytes`].
    Reject,
}

/// A forward-only cursor over packed bytes.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let bytes = self.take(N)?;
        // `take` returned exactly N bytes.
        let mut arr = [0u8; N];
        arr.copy_from_slice(bytes);
        Ok(arr)
    }

    pub fn read_u32(&mut self) -> CodecResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> CodecResult<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Reads a `u32` length prefix and then that many bytes.
    pub fn read_prefixed_bytes(&mut self, field: &'static str) -> CodecResult<&'a [u8]> {
        let length = self.read_u32()? as usize;
        let remaining = self.remaining();
        if length > remaining {
            return Err(CodecError::MalformedPayload {
                field,
                reason: MalformedReason::LengthExceedsBuffer { length, remaining },
            });
        }
        self.take(length)
    }

    pub fn read_string(&mut self, field: &'static str) -> CodecResult<String> {
        let bytes = self.read_prefixed_bytes(field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::MalformedPayload {
            field,
            reason: MalformedReason::InvalidUtf8,
        })
    }

    /// Applies the trailing byte policy to whatever is left unread.
    pub fn check_trailing(&self, trailing_bytes: TrailingBytes) -> CodecResult<()> {
        match (trailing_bytes, self.remaining()) {
            (TrailingBytes::Reject, remaining) if remaining > 0 => {
                Err(CodecError::TrailingBytes { remaining })
            }
            _ => Ok(()),
        }
    }

    fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(CodecError::TruncatedInput {
                needed: len,
                available,
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }
}

#[inline(always)]
pub fn write_u64(dst: &mut Vec<u8>, value: u64) {
    dst.extend_from_slice(&value.to_le_bytes());
}

/// Writes `bytes` behind a `u32` little-endian length prefix.
pub fn write_prefixed_bytes(
    dst: &mut Vec<u8>,
    field: &'static str,
    bytes: &[u8],
) -> CodecResult<()> {
    let length = u32::try_from(bytes.len()).map_err(|_| CodecError::LengthOverflow { field })?;
    dst.reserve(LENGTH_PREFIX_LEN + bytes.len());
    dst.extend_from_slice(&length.to_le_bytes());
    dst.extend_from_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_array_reports_truncation() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        assert_eq!(
            reader.read_u64(),
            Err(CodecError::TruncatedInput {
                needed: 8,
                available: 3
            })
        );
    }

    #[test]
    fn prefixed_bytes_longer_than_buffer_are_malformed() {
        let mut data = 10u32.to_le_bytes().to_vec();
        data.extend_from_slice(&[0xaa; 4]);
        let mut reader = ByteReader::new(&data);
        assert_eq!(
            reader.read_prefixed_bytes("proof_chunk"),
            Err(CodecError::MalformedPayload {
                field: "proof_chunk",
                reason: MalformedReason::LengthExceedsBuffer {
                    length: 10,
                    remaining: 4
                },
            })
        );
    }

    #[test]
    fn string_must_be_utf8() {
        let mut data = Vec::new();
        write_prefixed_bytes(&mut data, "client_type", &[0xff, 0xfe]).unwrap();
        let mut reader = ByteReader::new(&data);
        assert_eq!(
            reader.read_string("client_type"),
            Err(CodecError::MalformedPayload {
                field: "client_type",
                reason: MalformedReason::InvalidUtf8,
            })
        );
    }

    #[test]
    fn check_trailing_applies_policy() {
        let data = [7u8; 10];
        let mut reader = ByteReader::new(&data);
        reader.read_u64().unwrap();
        assert_eq!(reader.check_trailing(TrailingBytes::Ignore), Ok(()));

        let mut reader = ByteReader::new(&data);
        reader.read_u64().unwrap();
        assert_eq!(
            reader.check_trailing(TrailingBytes::Reject),
            Err(CodecError::TrailingBytes { remaining: 2 })
        );
    }

    #[test]
    fn empty_prefixed_bytes() {
        let mut data = Vec::new();
        write_prefixed_bytes(&mut data, "proof_chunk", &[]).unwrap();
        assert_eq!(data, [0, 0, 0, 0]);
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_prefixed_bytes("proof_chunk"), Ok(&[][..]));
        assert_eq!(reader.remaining(), 0);
    }
}
