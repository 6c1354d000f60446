use alloc::string::String;

use crate::{error::DecodeError, ubx_packets::UbxPacketMeta};

/// Bounds-checked little-endian cursor over a payload.
///
/// Every read that would run past the end yields
/// [`DecodeError::TruncatedPayload`] naming the packet and the number of
/// bytes the read required.
#[derive(Debug, Clone)]
pub(crate) struct PayloadReader<'a> {
    packet: &'static str,
    data: &'a [u8],
    offset: usize,
}

impl<'a> PayloadReader<'a> {
    pub(crate) const fn new(packet: &'static str, data: &'a [u8]) -> Self {
        Self {
            packet,
            data,
            offset: 0,
        }
    }

    /// Reader for packet `P`, checking its fixed payload length up front
    pub(crate) fn for_packet<P: UbxPacketMeta>(data: &'a [u8]) -> Result<Self, DecodeError> {
        let reader = Self::new(P::NAME, data);
        if let Some(len) = P::FIXED_PAYLOAD_LEN {
            reader.require(usize::from(len))?;
        }
        Ok(reader)
    }

    /// Fail early if the payload cannot hold `len` bytes
    pub(crate) fn require(&self, len: usize) -> Result<(), DecodeError> {
        if self.data.len() < len {
            return Err(self.truncated(len));
        }
        Ok(())
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn truncated(&self, expect: usize) -> DecodeError {
        DecodeError::TruncatedPayload {
            packet: self.packet,
            expect,
            got: self.data.len(),
        }
    }

    pub(crate) fn bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.offset + len;
        if end > self.data.len() {
            return Err(self.truncated(end));
        }
        let out = &self.data[self.offset..end];
        self.offset = end;
        Ok(out)
    }

    pub(crate) fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.bytes(len).map(|_| ())
    }

    pub(crate) fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.bytes(1)?[0])
    }

    pub(crate) fn i8(&mut self) -> Result<i8, DecodeError> {
        Ok(i8::from_le_bytes([self.u8()?]))
    }

    pub(crate) fn u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn i16(&mut self) -> Result<i16, DecodeError> {
        let b = self.bytes(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub(crate) fn i32(&mut self) -> Result<i32, DecodeError> {
        let b = self.bytes(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Fixed-width, null padded text field
    pub(crate) fn fixed_str(&mut self, len: usize) -> Result<String, DecodeError> {
        self.bytes(len).map(null_padded_str)
    }
}

/// Text up to the first null byte; invalid UTF-8 is replaced rather than
/// rejected since these strings are informational only.
pub(crate) fn null_padded_str(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let data = [0x01, 0x34, 0x12, 0xff, 0xff, 0xff, 0xff, 0x80];
        let mut r = PayloadReader::new("TEST", &data);
        assert_eq!(r.u8().unwrap(), 1);
        assert_eq!(r.u16().unwrap(), 0x1234);
        assert_eq!(r.i32().unwrap(), -1);
        assert_eq!(r.i8().unwrap(), -128);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn read_past_end_is_truncated() {
        let data = [0x01, 0x02, 0x03];
        let mut r = PayloadReader::new("TEST", &data);
        r.u16().unwrap();
        assert_eq!(
            r.u32(),
            Err(DecodeError::TruncatedPayload {
                packet: "TEST",
                expect: 6,
                got: 3
            })
        );
    }

    struct Fixed4;

    impl UbxPacketMeta for Fixed4 {
        const CLASS: u8 = 0x7f;
        const ID: u8 = 0x01;
        const FIXED_PAYLOAD_LEN: Option<u16> = Some(4);
        const NAME: &'static str = "FIXED4";
    }

    #[test]
    fn fixed_length_checked_up_front() {
        assert_eq!(
            PayloadReader::for_packet::<Fixed4>(&[1, 2, 3]).unwrap_err(),
            DecodeError::TruncatedPayload {
                packet: "FIXED4",
                expect: 4,
                got: 3
            }
        );
        let mut r = PayloadReader::for_packet::<Fixed4>(&[1, 0, 0, 0, 9]).unwrap();
        assert_eq!(r.u32().unwrap(), 1);
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn strips_null_padding() {
        assert_eq!(null_padded_str(b"ROM CORE 3.01\0\0\0"), "ROM CORE 3.01");
        assert_eq!(null_padded_str(b"no-null"), "no-null");
        assert_eq!(null_padded_str(b"\0\0"), "");
    }
}
