use alloc::vec::Vec;

use crate::{
    error::DecodeError,
    ubx_packets::{
        frame::{Frame, FrameRef},
        packets::*,
        MessageIdentity, UbxPacketDecode,
    },
};

/// Message with an identity the decoder has no routine for.
///
/// Not an error: receivers emit plenty of messages this crate does not
/// interpret, and newer firmware keeps adding more.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RawRecord {
    pub class: u8,
    pub id: u8,
    pub payload: Vec<u8>,
}

impl RawRecord {
    pub const fn identity(&self) -> MessageIdentity {
        MessageIdentity::new(self.class, self.id)
    }
}

macro_rules! semantic_records {
    ($($variant:ident($record:ty),)*) => {
        /// Normalized content of one frame
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub enum SemanticRecord {
            $($variant($record),)*
            Raw(RawRecord),
        }

        /// Payload-free tag of a [`SemanticRecord`]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub enum RecordKind {
            $($variant,)*
            Raw,
        }

        impl SemanticRecord {
            pub const fn kind(&self) -> RecordKind {
                match self {
                    $(SemanticRecord::$variant(_) => RecordKind::$variant,)*
                    SemanticRecord::Raw(_) => RecordKind::Raw,
                }
            }
        }

        $(
            impl From<$record> for SemanticRecord {
                fn from(rec: $record) -> Self {
                    SemanticRecord::$variant(rec)
                }
            }
        )*
    };
}

semantic_records! {
    Acknowledge(Acknowledge),
    PortConfig(PortConfig),
    MessageRateConfig(MessageRateConfig),
    InfoConfig(InfoConfig),
    GeodeticPosition(GeodeticPosition),
    DilutionOfPrecision(DilutionOfPrecision),
    NavSolution(NavSolution),
    PositionFix(PositionFix),
    VelocityNed(VelocityNed),
    SatelliteInfo(SatelliteInfo),
    VersionInfo(VersionInfo),
}

type DecodeFn = fn(&[u8]) -> Result<SemanticRecord, DecodeError>;

/// Entry of the dispatch table
#[derive(Clone, Copy)]
pub struct Route {
    pub identity: MessageIdentity,
    pub name: &'static str,
    pub kind: RecordKind,
    /// Payload length a fixed-layout message must at least have
    pub fixed_payload_len: Option<u16>,
    decode: DecodeFn,
}

impl core::fmt::Debug for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Route")
            .field("identity", &self.identity)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("fixed_payload_len", &self.fixed_payload_len)
            .finish()
    }
}

fn decode_into<P>(payload: &[u8]) -> Result<SemanticRecord, DecodeError>
where
    P: UbxPacketDecode,
    P::Record: Into<SemanticRecord>,
{
    P::decode(payload).map(Into::into)
}

const fn route<P>(kind: RecordKind) -> Route
where
    P: UbxPacketDecode,
    P::Record: Into<SemanticRecord>,
{
    Route {
        identity: P::IDENTITY,
        name: P::NAME,
        kind,
        fixed_payload_len: P::FIXED_PAYLOAD_LEN,
        decode: decode_into::<P>,
    }
}

/// Every decodable identity, sorted by (class, id)
pub(crate) const DISPATCH_TABLE: &[Route] = &[
    route::<NavPosLlh>(RecordKind::GeodeticPosition),
    route::<NavDop>(RecordKind::DilutionOfPrecision),
    route::<NavSol>(RecordKind::NavSolution),
    route::<NavPvt>(RecordKind::PositionFix),
    route::<NavVelNed>(RecordKind::VelocityNed),
    route::<NavSvInfo>(RecordKind::SatelliteInfo),
    route::<AckNak>(RecordKind::Acknowledge),
    route::<AckAck>(RecordKind::Acknowledge),
    route::<CfgPrt>(RecordKind::PortConfig),
    route::<CfgMsg>(RecordKind::MessageRateConfig),
    route::<CfgInf>(RecordKind::InfoConfig),
    route::<MonVer>(RecordKind::VersionInfo),
];

const fn routes_sorted(table: &[Route]) -> bool {
    let mut i = 1;
    while i < table.len() {
        if table[i - 1].identity.key() >= table[i].identity.key() {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    routes_sorted(DISPATCH_TABLE),
    "DISPATCH_TABLE must be sorted by (class, id) without duplicates"
);

/// Table entry for `identity`, if the decoder interprets that message
pub fn route_for(identity: MessageIdentity) -> Option<&'static Route> {
    let key = identity.key();
    DISPATCH_TABLE
        .binary_search_by_key(&key, |route| route.identity.key())
        .ok()
        .map(|idx| &DISPATCH_TABLE[idx])
}

/// All identities with a decode routine
pub fn supported_messages() -> impl Iterator<Item = MessageIdentity> {
    DISPATCH_TABLE.iter().map(|route| route.identity)
}

fn dispatch_payload(
    identity: MessageIdentity,
    payload: &[u8],
) -> Result<SemanticRecord, DecodeError> {
    match route_for(identity) {
        Some(route) => (route.decode)(payload),
        None => {
            tracing::trace!("no decoder for {}, passing through raw", identity);
            Ok(SemanticRecord::Raw(RawRecord {
                class: identity.class,
                id: identity.id,
                payload: payload.to_vec(),
            }))
        },
    }
}

/// Decode a validated frame into its semantic record.
///
/// Unknown identities come back as [`SemanticRecord::Raw`]; only a
/// malformed payload of a known message is an error.
pub fn dispatch(frame: &Frame) -> Result<SemanticRecord, DecodeError> {
    dispatch_payload(frame.identity(), &frame.payload)
}

/// Same as [`dispatch`] for a frame still borrowed from the parser
pub fn dispatch_ref(frame: &FrameRef<'_>) -> Result<SemanticRecord, DecodeError> {
    dispatch_payload(frame.identity(), frame.payload)
}
