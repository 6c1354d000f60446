//! # ubx_decoder
//!
//! Decoder for the u-blox UBX binary protocol: frame synchronization, checksum
//! validation, dispatch by message class/id and extraction of scaled fields into
//! typed records. The counterpart for the other direction builds poll and
//! message rate configuration frames.
//!
//! The crate performs no I/O. Bytes read from a serial port, socket or file are
//! fed in, records come out; frames to send are written into any [`MemWriter`].
//!
//! Parsing Packets
//! ===============
//!
//! Instantiate a [`UbxDecoder`] and feed it data with `consume()`. Bytes that do
//! not complete a frame are kept until the next call:
//! ```
//! use ubx_decoder::{SemanticRecord, UbxDecoder};
//!
//! let mut decoder = UbxDecoder::default();
//! let my_raw_data = vec![1, 2, 3, 4]; // From your serial port
//! for item in decoder.consume(&my_raw_data) {
//!     match item {
//!         Ok(decoded) => match decoded.record {
//!             SemanticRecord::PositionFix(fix) => println!("{} {}", fix.lat, fix.lon),
//!             SemanticRecord::Raw(raw) => println!("unhandled {}", raw.identity()),
//!             _ => {},
//!         },
//!         Err(e) => println!("{}", e),
//!     }
//! }
//! ```
//!
//! Malformed payloads of known messages are reported as
//! [`Error::Decode`] unless the decoder is built with
//! [`DecodeErrorPolicy::Drop`]. Messages without a decode routine come back as
//! [`SemanticRecord::Raw`].
//!
//! Constructing Packets
//! ====================
//!
//! ```
//! use ubx_decoder::{packets::{CfgMsg, NavPvt, PortRates}, PollBuilder, UbxPacketMeta};
//!
//! let enable_pvt = PollBuilder::set_rate_for::<NavPvt>(PortRates::ALL_ON);
//! assert_eq!(enable_pvt.identity(), CfgMsg::IDENTITY);
//! let bytes: Vec<u8> = enable_pvt.to_bytes();
//! assert_eq!(&bytes[..2], &[0xb5, 0x62]);
//! ```
//!
//! no_std Support
//! ==============
//!
//! Without the default `std` feature the crate only needs `alloc`. A
//! [`FixedBuffer`] bounds the parser's memory regardless of input:
//! ```
//! let decoder = ubx_decoder::DecoderBuilder::new()
//!     .with_buffer(ubx_decoder::FixedBuffer::<1024>::new())
//!     .build();
//! ```
//! The buffer has to hold the largest frame you want decoded; larger frames
//! are reported as `OutOfMemory` and skipped.
//!
//! Logging goes through `tracing`; the crate installs no subscriber.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
extern crate core;
#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    constants::{DEFAULT_MAX_PAYLOAD_LEN, UBX_MIN_FRAME_LEN, UBX_SYNC_CHAR_1, UBX_SYNC_CHAR_2},
    decoder::{DecodeErrorPolicy, Decoded, DecoderBuilder, DecoderIter, UbxDecoder},
    error::{DateTimeError, DecodeError, Error, FramingError, MemWriterError},
    parser::{
        scan, scan_with_limit, ubx_checksum, FixedBuffer, Parser, ParserBuilder, ParserIter,
        UnderlyingBuffer,
    },
    ubx_packets::*,
};

mod constants;
mod decoder;
mod error;
mod parser;
mod ubx_packets;
