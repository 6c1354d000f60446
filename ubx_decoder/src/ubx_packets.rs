pub mod dispatch;
pub mod frame;
pub mod identity;
pub mod packets;
pub mod poll;
pub(crate) mod reader;
pub mod types;

use crate::error::DecodeError;

pub use dispatch::{
    dispatch, dispatch_ref, route_for, supported_messages, RawRecord, RecordKind, Route,
    SemanticRecord,
};
pub use frame::{Frame, FrameRef, MemWriter};
pub use identity::{resolve_message_name, MessageIdentity};
pub use poll::{build_config_message, build_poll, build_rate_poll, startup_polls, PollBuilder};
pub use packets::*;
pub use types::*;

/// Information about concrete UBX protocol's packet
pub trait UbxPacketMeta {
    const CLASS: u8;
    const ID: u8;
    /// `None` when the payload length varies with content or protocol version
    const FIXED_PAYLOAD_LEN: Option<u16>;
    const NAME: &'static str;

    const IDENTITY: MessageIdentity = MessageIdentity::new(Self::CLASS, Self::ID);
}

/// Packet the decoder can turn into a typed record
pub trait UbxPacketDecode: UbxPacketMeta {
    type Record;

    /// Extract and scale the payload fields.
    ///
    /// Reads are bounds checked; bytes past the last known field are ignored
    /// so newer firmware appending fields still decodes.
    fn decode(payload: &[u8]) -> Result<Self::Record, DecodeError>;
}
