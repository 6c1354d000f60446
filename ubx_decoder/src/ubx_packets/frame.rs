use alloc::vec::Vec;

use crate::{
    constants::{UBX_CHECKSUM_LEN, UBX_HEADER_LEN, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2},
    error::MemWriterError,
    parser::checksum::UbxChecksumCalc,
    ubx_packets::MessageIdentity,
};

/// Byte sink that frames are written into.
///
/// With the `std` feature every [`std::io::Write`] is a `MemWriter`, so a
/// serial port handle or a `Vec<u8>` can be passed directly.
pub trait MemWriter {
    type Error;

    /// Make sure that we have at least `len` bytes for writing
    fn reserve_allocate(&mut self, len: usize) -> Result<(), MemWriterError<Self::Error>>;
    fn write(&mut self, buf: &[u8]) -> Result<(), MemWriterError<Self::Error>>;
}

#[cfg(feature = "std")]
impl<W: std::io::Write> MemWriter for W {
    type Error = std::io::Error;

    fn reserve_allocate(&mut self, _len: usize) -> Result<(), MemWriterError<Self::Error>> {
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), MemWriterError<Self::Error>> {
        self.write_all(buf).map_err(MemWriterError::Custom)
    }
}

#[cfg(not(feature = "std"))]
impl MemWriter for Vec<u8> {
    type Error = core::convert::Infallible;

    fn reserve_allocate(&mut self, len: usize) -> Result<(), MemWriterError<Self::Error>> {
        self.reserve(len);
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), MemWriterError<Self::Error>> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// A complete, checksum-valid UBX frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frame {
    pub class: u8,
    pub id: u8,
    pub payload: Vec<u8>,
    pub checksum: (u8, u8),
}

impl Frame {
    /// Build a frame around `payload`, computing its checksum.
    ///
    /// Payloads longer than `u16::MAX` cannot be represented on the wire;
    /// callers inside this crate never build one.
    pub fn new(identity: MessageIdentity, payload: Vec<u8>) -> Self {
        let mut calc = UbxChecksumCalc::new();
        calc.update(&[identity.class, identity.id]);
        calc.update(&(payload.len() as u16).to_le_bytes());
        calc.update(&payload);
        Self {
            class: identity.class,
            id: identity.id,
            payload,
            checksum: calc.result(),
        }
    }

    pub const fn identity(&self) -> MessageIdentity {
        MessageIdentity::new(self.class, self.id)
    }

    pub fn len(&self) -> u16 {
        self.payload.len() as u16
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Total size on the wire
    pub fn wire_len(&self) -> usize {
        UBX_HEADER_LEN + self.payload.len() + UBX_CHECKSUM_LEN
    }

    fn header(&self) -> [u8; UBX_HEADER_LEN] {
        let len = self.len().to_le_bytes();
        [
            UBX_SYNC_CHAR_1,
            UBX_SYNC_CHAR_2,
            self.class,
            self.id,
            len[0],
            len[1],
        ]
    }

    /// The frame exactly as sent on the wire, preamble and checksum included
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.wire_len());
        out.extend_from_slice(&self.header());
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&[self.checksum.0, self.checksum.1]);
        out
    }

    pub fn write_to<T: MemWriter>(&self, out: &mut T) -> Result<(), MemWriterError<T::Error>> {
        out.reserve_allocate(self.wire_len())?;
        out.write(&self.header())?;
        out.write(&self.payload)?;
        out.write(&[self.checksum.0, self.checksum.1])
    }
}

/// A validated frame borrowed from the parser's buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRef<'a> {
    pub class: u8,
    pub id: u8,
    pub payload: &'a [u8],
    pub checksum: (u8, u8),
}

impl FrameRef<'_> {
    pub const fn identity(&self) -> MessageIdentity {
        MessageIdentity::new(self.class, self.id)
    }

    pub fn wire_len(&self) -> usize {
        UBX_HEADER_LEN + self.payload.len() + UBX_CHECKSUM_LEN
    }

    pub fn to_frame(&self) -> Frame {
        Frame {
            class: self.class,
            id: self.id,
            payload: self.payload.to_vec(),
            checksum: self.checksum,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec;

    #[test]
    fn ack_ack_bytes() {
        let frame = Frame::new(MessageIdentity::new(0x05, 0x01), vec![0x04, 0x05]);
        assert_eq!(
            frame.to_bytes(),
            [0xb5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x04, 0x05, 0x11, 0x38]
        );
        assert_eq!(frame.wire_len(), 10);
    }

    #[test]
    fn write_to_matches_to_bytes() {
        let frame = Frame::new(MessageIdentity::new(0x0a, 0x04), vec![]);
        let mut out: Vec<u8> = Vec::new();
        frame.write_to(&mut out).unwrap();
        assert_eq!(out, frame.to_bytes());
        assert_eq!(out, [0xb5, 0x62, 0x0a, 0x04, 0x00, 0x00, 0x0e, 0x34]);
    }
}
