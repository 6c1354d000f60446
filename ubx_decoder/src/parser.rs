pub mod buffer;
pub(crate) mod checksum;

use alloc::vec::Vec;

use crate::{
    constants::{
        DEFAULT_MAX_PAYLOAD_LEN, UBX_CHECKSUM_LEN, UBX_CLASS_OFFSET, UBX_HEADER_LEN,
        UBX_LENGTH_OFFSET, UBX_MSG_ID_OFFSET, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2, UBX_SYNC_SIZE,
    },
    error::FramingError,
    ubx_packets::{Frame, FrameRef},
};

pub use buffer::{FixedBuffer, UnderlyingBuffer};
pub use checksum::ubx_checksum;
use checksum::UbxChecksumCalc;

/// Locate and validate the first frame in `buf`.
///
/// Returns the number of bytes the caller should drop from the front of
/// `buf` together with the outcome:
/// * `Ok(frame)`: garbage before the frame plus the frame itself;
/// * `IncompleteFrame`: only the garbage before a possible frame start,
///   the tail must be kept until more bytes arrive;
/// * `ChecksumError`: garbage plus the two preamble bytes, so the next scan
///   resynchronizes on whatever follows.
pub fn scan(buf: &[u8]) -> (usize, Result<FrameRef<'_>, FramingError>) {
    scan_with_limit(buf, usize::from(DEFAULT_MAX_PAYLOAD_LEN))
}

/// [`scan`] rejecting declared payload lengths above `max_payload_len`
pub fn scan_with_limit(
    buf: &[u8],
    max_payload_len: usize,
) -> (usize, Result<FrameRef<'_>, FramingError>) {
    let mut start = 0;
    loop {
        match buf[start..].iter().position(|b| *b == UBX_SYNC_CHAR_1) {
            Some(pos) => start += pos,
            None => {
                return (buf.len(), Err(FramingError::IncompleteFrame { needed: None }));
            },
        }
        let rest = &buf[start..];
        if rest.len() < UBX_SYNC_SIZE {
            return (start, Err(FramingError::IncompleteFrame { needed: None }));
        }
        if rest[1] != UBX_SYNC_CHAR_2 {
            start += 1;
            continue;
        }
        if rest.len() < UBX_HEADER_LEN {
            return (start, Err(FramingError::IncompleteFrame { needed: None }));
        }

        let pack_len = usize::from(u16::from_le_bytes([
            rest[UBX_LENGTH_OFFSET],
            rest[UBX_LENGTH_OFFSET + 1],
        ]));
        if pack_len > max_payload_len {
            tracing::debug!(
                "dropping preamble with payload length {} above limit {}",
                pack_len,
                max_payload_len
            );
            start += UBX_SYNC_SIZE;
            continue;
        }

        let frame_len = UBX_HEADER_LEN + pack_len + UBX_CHECKSUM_LEN;
        if rest.len() < frame_len {
            return (
                start,
                Err(FramingError::IncompleteFrame {
                    needed: Some(frame_len - rest.len()),
                }),
            );
        }

        let ck_offset = UBX_HEADER_LEN + pack_len;
        let mut checksummer = UbxChecksumCalc::new();
        checksummer.update(&rest[UBX_CLASS_OFFSET..ck_offset]);
        if let Err(e) = checksummer.validate_result(rest[ck_offset], rest[ck_offset + 1]) {
            return (start + UBX_SYNC_SIZE, Err(e));
        }

        if start > 0 {
            tracing::trace!("skipped {} bytes before frame", start);
        }
        let frame = FrameRef {
            class: rest[UBX_CLASS_OFFSET],
            id: rest[UBX_MSG_ID_OFFSET],
            payload: &rest[UBX_HEADER_LEN..ck_offset],
            checksum: (rest[ck_offset], rest[ck_offset + 1]),
        };
        return (start + frame_len, Ok(frame));
    }
}

/// Configures a [`Parser`] before construction
#[derive(Debug, Clone)]
pub struct ParserBuilder<B: UnderlyingBuffer = Vec<u8>> {
    buf: B,
    max_payload_len: u16,
}

impl Default for ParserBuilder<Vec<u8>> {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserBuilder<Vec<u8>> {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }
}

impl<B: UnderlyingBuffer> ParserBuilder<B> {
    /// Frames declaring a longer payload are treated as false sync matches
    pub fn max_payload_len(mut self, len: u16) -> Self {
        self.max_payload_len = len;
        self
    }

    /// Swap the carry-over buffer, e.g. for a [`FixedBuffer`]
    pub fn with_buffer<T: UnderlyingBuffer>(self, buf: T) -> ParserBuilder<T> {
        ParserBuilder {
            buf,
            max_payload_len: self.max_payload_len,
        }
    }

    pub fn build(self) -> Parser<B> {
        Parser {
            buf: self.buf,
            max_payload_len: usize::from(self.max_payload_len),
        }
    }
}

/// Streaming parser for UBX protocol with buffer. The default constructor will build
/// a parser containing a Vec, but you can pass your own underlying buffer by passing it
/// to Parser::new().
///
/// Bytes that do not yet form a complete frame stay in the buffer until the
/// next call to [`consume`](Parser::consume), so a frame may be split across
/// any number of reads.
///
/// If you pass your own buffer it has to fit the largest frame you expect:
/// a NAV-PVT frame takes 100 bytes.
#[derive(Debug)]
pub struct Parser<B: UnderlyingBuffer = Vec<u8>> {
    buf: B,
    max_payload_len: usize,
}

impl Default for Parser<Vec<u8>> {
    fn default() -> Self {
        ParserBuilder::new().build()
    }
}

impl<B: UnderlyingBuffer> Parser<B> {
    pub fn new(underlying: B) -> Self {
        ParserBuilder::new().with_buffer(underlying).build()
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    pub fn max_payload_len(&self) -> usize {
        self.max_payload_len
    }

    /// Forget any partially received frame
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Take the next frame out of the bytes already buffered.
    ///
    /// `IncompleteFrame` means more input is needed; the possible frame
    /// start is kept.
    pub fn next_frame(&mut self) -> Result<Frame, FramingError> {
        let (consumed, result) = scan_with_limit(self.buf.as_slice(), self.max_payload_len);
        let result = result.map(|frame| frame.to_frame());
        self.buf.drain(consumed);
        result
    }

    /// Append `new_data` and iterate over the frames it completes.
    ///
    /// Dropping the iterator early keeps the unread input buffered.
    pub fn consume<'a>(&'a mut self, new_data: &'a [u8]) -> ParserIter<'a, B> {
        ParserIter {
            parser: self,
            pending: new_data,
        }
    }
}

/// Iterator over the frames of one [`Parser::consume`] call.
///
/// Yields checksum-valid frames and framing errors; ends once the
/// remaining input is an incomplete frame.
pub struct ParserIter<'a, B: UnderlyingBuffer> {
    parser: &'a mut Parser<B>,
    pending: &'a [u8],
}

impl<B: UnderlyingBuffer> Iterator for ParserIter<'_, B> {
    type Item = Result<Frame, FramingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.parser.buf.is_empty() {
                if let Some(item) = self.next_in_place()? {
                    return Some(item);
                }
                continue;
            }
            match self.parser.next_frame() {
                Ok(frame) => return Some(Ok(frame)),
                Err(FramingError::IncompleteFrame { needed }) => {
                    if self.pending.is_empty() {
                        return None;
                    }
                    let buf = &mut self.parser.buf;
                    if buf.is_empty() {
                        continue;
                    }
                    // Only move over what the buffered frame start still lacks
                    let want = needed
                        .unwrap_or_else(|| UBX_HEADER_LEN.saturating_sub(buf.len()).max(1));
                    let to_copy = want.min(self.pending.len());
                    let copied = to_copy - buf.extend_from_slice(&self.pending[..to_copy]);
                    if copied > 0 {
                        self.pending = &self.pending[copied..];
                        continue;
                    }
                    // The frame at the head can never fit, drop its preamble
                    let required_size = buf.len() + want;
                    tracing::debug!(
                        "frame of {} bytes does not fit buffer of {}",
                        required_size,
                        buf.max_capacity()
                    );
                    buf.drain(UBX_SYNC_SIZE);
                    return Some(Err(FramingError::OutOfMemory { required_size }));
                },
                Err(e) => {
                    tracing::debug!("resync after {}", e);
                    return Some(Err(e));
                },
            }
        }
    }
}

impl<B: UnderlyingBuffer> ParserIter<'_, B> {
    /// Scan the input without copying it while nothing is buffered.
    ///
    /// `None` ends the iteration, `Some(None)` means the tail of the input
    /// was moved into the buffer.
    fn next_in_place(&mut self) -> Option<Option<Result<Frame, FramingError>>> {
        let pending = self.pending;
        if pending.is_empty() {
            return None;
        }
        let (consumed, result) = scan_with_limit(pending, self.parser.max_payload_len);
        match result {
            Ok(frame) => {
                let frame_len = frame.wire_len();
                let capacity = self.parser.buf.max_capacity();
                if frame_len > capacity {
                    tracing::debug!(
                        "frame of {} bytes does not fit buffer of {}",
                        frame_len,
                        capacity
                    );
                    self.pending = &pending[consumed - frame_len + UBX_SYNC_SIZE..];
                    return Some(Some(Err(FramingError::OutOfMemory {
                        required_size: frame_len,
                    })));
                }
                let frame = frame.to_frame();
                self.pending = &pending[consumed..];
                Some(Some(Ok(frame)))
            },
            Err(FramingError::IncompleteFrame { needed }) => {
                // At most one partial frame is left
                let tail = &pending[consumed..];
                if tail.is_empty() {
                    self.pending = tail;
                    return None;
                }
                let lost = self.parser.buf.extend_from_slice(tail);
                if lost == tail.len() {
                    let required_size = tail.len() + needed.unwrap_or(UBX_HEADER_LEN);
                    self.pending = &tail[tail.len().min(UBX_SYNC_SIZE)..];
                    return Some(Some(Err(FramingError::OutOfMemory { required_size })));
                }
                self.pending = &tail[tail.len() - lost..];
                Some(None)
            },
            Err(e) => {
                self.pending = &pending[consumed..];
                tracing::debug!("resync after {}", e);
                Some(Some(Err(e)))
            },
        }
    }
}

impl<B: UnderlyingBuffer> Drop for ParserIter<'_, B> {
    fn drop(&mut self) {
        let lost = self.parser.buf.extend_from_slice(self.pending);
        if lost > 0 {
            tracing::debug!("buffer full, dropped {} unread bytes", lost);
        }
    }
}
