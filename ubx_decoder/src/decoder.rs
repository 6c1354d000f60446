use alloc::vec::Vec;

use crate::{
    error::Error,
    parser::{Parser, ParserBuilder, ParserIter, UnderlyingBuffer},
    ubx_packets::{dispatch, Frame, SemanticRecord},
};

/// What to do with a checksum-valid frame whose payload cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeErrorPolicy {
    /// Yield [`Error::Decode`] to the caller
    #[default]
    Surface,
    /// Log at `warn` level and continue with the next frame
    Drop,
}

/// A decoded frame together with the raw frame it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub frame: Frame,
    pub record: SemanticRecord,
}

/// Frame scanner and message dispatcher in one.
///
/// ```
/// use ubx_decoder::{SemanticRecord, UbxDecoder};
///
/// let mut decoder = UbxDecoder::default();
/// let bytes = [0xb5, 0x62, 0x05, 0x01, 0x02, 0x00, 0x06, 0x01, 0x0f, 0x38];
/// for item in decoder.consume(&bytes) {
///     match item {
///         Ok(decoded) => match decoded.record {
///             SemanticRecord::Acknowledge(ack) => {
///                 assert_eq!(ack.message_name(), Some("CFG-MSG"));
///             },
///             _ => {},
///         },
///         Err(e) => panic!("{}", e),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct UbxDecoder<B: UnderlyingBuffer = Vec<u8>> {
    parser: Parser<B>,
    policy: DecodeErrorPolicy,
}

impl Default for UbxDecoder<Vec<u8>> {
    fn default() -> Self {
        DecoderBuilder::new().build()
    }
}

impl UbxDecoder<Vec<u8>> {
    pub fn builder() -> DecoderBuilder<Vec<u8>> {
        DecoderBuilder::new()
    }
}

impl<B: UnderlyingBuffer> UbxDecoder<B> {
    pub fn policy(&self) -> DecodeErrorPolicy {
        self.policy
    }

    pub fn parser(&self) -> &Parser<B> {
        &self.parser
    }

    /// Forget any partially received frame
    pub fn reset(&mut self) {
        self.parser.reset();
    }

    /// Feed bytes and iterate over the records they complete
    pub fn consume<'a>(&'a mut self, data: &'a [u8]) -> DecoderIter<'a, B> {
        DecoderIter {
            inner: self.parser.consume(data),
            policy: self.policy,
        }
    }

    /// Feed bytes and hand every result to `handler`
    pub fn process<F>(&mut self, data: &[u8], mut handler: F)
    where
        F: FnMut(Result<Decoded, Error>),
    {
        for item in self.consume(data) {
            handler(item);
        }
    }
}

pub struct DecoderIter<'a, B: UnderlyingBuffer> {
    inner: ParserIter<'a, B>,
    policy: DecodeErrorPolicy,
}

impl<B: UnderlyingBuffer> Iterator for DecoderIter<'_, B> {
    type Item = Result<Decoded, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = match self.inner.next()? {
                Ok(frame) => frame,
                Err(e) => return Some(Err(e.into())),
            };
            match dispatch(&frame) {
                Ok(record) => return Some(Ok(Decoded { frame, record })),
                Err(e) => match self.policy {
                    DecodeErrorPolicy::Surface => return Some(Err(e.into())),
                    DecodeErrorPolicy::Drop => {
                        tracing::warn!("dropping {}: {}", frame.identity(), e);
                    },
                },
            }
        }
    }
}

/// Configures a [`UbxDecoder`]
#[derive(Debug, Clone)]
pub struct DecoderBuilder<B: UnderlyingBuffer = Vec<u8>> {
    parser: ParserBuilder<B>,
    policy: DecodeErrorPolicy,
}

impl Default for DecoderBuilder<Vec<u8>> {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderBuilder<Vec<u8>> {
    pub fn new() -> Self {
        Self {
            parser: ParserBuilder::new(),
            policy: DecodeErrorPolicy::default(),
        }
    }
}

impl<B: UnderlyingBuffer> DecoderBuilder<B> {
    pub fn max_payload_len(mut self, len: u16) -> Self {
        self.parser = self.parser.max_payload_len(len);
        self
    }

    pub fn decode_errors(mut self, policy: DecodeErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_buffer<T: UnderlyingBuffer>(self, buf: T) -> DecoderBuilder<T> {
        DecoderBuilder {
            parser: self.parser.with_buffer(buf),
            policy: self.policy,
        }
    }

    pub fn build(self) -> UbxDecoder<B> {
        UbxDecoder {
            parser: self.parser.build(),
            policy: self.policy,
        }
    }
}
