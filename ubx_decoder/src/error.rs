use core::fmt;

/// Errors raised while locating and validating frames in a byte stream.
///
/// None of these are fatal: the parser has already resynchronized by the
/// time one is returned, so the caller can simply keep feeding bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingError {
    /// Not enough bytes buffered to finish the frame at the head of the
    /// buffer. `needed` is the number of missing bytes, if the header was
    /// complete enough to know it.
    IncompleteFrame { needed: Option<usize> },

    /// The trailing checksum did not match the frame contents
    ChecksumError { expect: u16, got: u16 },

    /// The frame does not fit in the parser's fixed-size buffer
    OutOfMemory { required_size: usize },
}

impl FramingError {
    /// `true` if feeding more bytes may resolve the condition
    pub const fn is_retryable(&self) -> bool {
        matches!(self, FramingError::IncompleteFrame { .. })
    }
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramingError::IncompleteFrame { needed: Some(n) } => {
                write!(f, "Incomplete frame, {} more bytes needed", n)
            },
            FramingError::IncompleteFrame { needed: None } => f.write_str("Incomplete frame"),
            FramingError::ChecksumError { expect, got } => write!(
                f,
                "Not valid frame checksum, expect {:x}, got {:x}",
                expect, got
            ),
            FramingError::OutOfMemory { required_size } => write!(
                f,
                "Not enough memory in buffer to parse frame of {} bytes",
                required_size
            ),
        }
    }
}

impl core::error::Error for FramingError {}

/// Errors raised while extracting fields from a checksum-valid frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A field read would have gone past the end of the payload
    TruncatedPayload {
        packet: &'static str,
        expect: usize,
        got: usize,
    },

    /// The repeating group's declared count disagrees with the payload length
    GroupSizeMismatch {
        packet: &'static str,
        count: usize,
        expect: usize,
        got: usize,
    },

    /// A field holds a value the packet layout does not allow
    InvalidField {
        packet: &'static str,
        field: &'static str,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::TruncatedPayload {
                packet,
                expect,
                got,
            } => write!(
                f,
                "Truncated payload of {}, need at least {} bytes, got {}",
                packet, expect, got
            ),
            DecodeError::GroupSizeMismatch {
                packet,
                count,
                expect,
                got,
            } => write!(
                f,
                "Repeating group of {} declares {} items ({} bytes), payload is {} bytes",
                packet, count, expect, got
            ),
            DecodeError::InvalidField { packet, field } => {
                write!(f, "Invalid field {} of packet {}", field, packet)
            },
        }
    }
}

impl core::error::Error for DecodeError {}

/// Any error surfaced by [`UbxDecoder`](crate::UbxDecoder)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Framing(FramingError),
    Decode(DecodeError),
}

impl From<FramingError> for Error {
    fn from(e: FramingError) -> Self {
        Error::Framing(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Framing(e) => write!(f, "framing error: {}", e),
            Error::Decode(e) => write!(f, "decode error: {}", e),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Framing(e) => Some(e),
            Error::Decode(e) => Some(e),
        }
    }
}

#[derive(Debug)]
pub enum MemWriterError<E> {
    NotEnoughMem,
    Custom(E),
}

impl<E: fmt::Display> fmt::Display for MemWriterError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemWriterError::NotEnoughMem => f.write_str("Not enough memory error"),
            MemWriterError::Custom(e) => write!(f, "MemWriterError: {}", e),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for MemWriterError<E> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
    InvalidNanoseconds,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
            DateTimeError::InvalidNanoseconds => f.write_str("invalid nanoseconds"),
        }
    }
}

impl core::error::Error for DateTimeError {}
